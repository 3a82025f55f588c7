mod cli;
mod dispatcher;

use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use flume::{Receiver, Sender};
use log::{LevelFilter, info, warn};

use specfall_engine::sinks::{ChannelSink, SummarySink};
use specfall_engine::{DisplayWorker, RenderSink, Spectrometer, device};
use specfall_messages::{Command, DisplayConfig, Event};

fn main() -> Result<()> {
    env_logger::builder()
        .format(|buf, record| {
            writeln!(
                buf,
                "{:<5} [{}] {}",
                record.level(),
                record.module_path().unwrap_or(""),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .filter_module("eframe", LevelFilter::Warn)
        .filter_module("egui_glow", LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = cli::Args::parse();
    let device_config = args.device_config()?;
    let display_config = args.display_config()?;

    let device = device::open(&device_config).context("Cannot open the spectrometer")?;
    info!(
        "Spectrometer ready: {} channels, reading {}",
        device.channel_count(),
        display_config.source_id
    );

    // The dispatcher is the only sender; when it quits the worker sees the hang-up
    let (cmd_tx, cmd_rx) = flume::unbounded();
    spawn_dispatcher(cmd_tx)?;

    if args.headless {
        let worker = spawn_worker(device, SummarySink::new(), cmd_rx, display_config)?;
        return join_worker(worker);
    }

    let (event_tx, event_rx) = flume::bounded(1);
    let worker = spawn_worker(device, ChannelSink::new(event_tx), cmd_rx, display_config)?;

    // Run UI on main thread (blocking)
    specfall_ui::run(event_rx.clone(), args.axis())?;

    finish_worker(worker, event_rx)
}

fn spawn_dispatcher(cmd_tx: Sender<Command>) -> Result<()> {
    thread::Builder::new()
        .name("dispatcher".to_owned())
        .spawn(move || {
            let stdin = io::stdin();
            if let Err(e) = dispatcher::run(stdin.lock(), io::stdout(), &cmd_tx) {
                warn!("Command dispatcher stopped: {e:#}");
            }
        })
        .context("Cannot start the command dispatcher")?;
    Ok(())
}

fn spawn_worker<D, S>(
    device: D,
    sink: S,
    cmd_rx: Receiver<Command>,
    config: DisplayConfig,
) -> Result<JoinHandle<Result<()>>>
where
    D: Spectrometer + Send + 'static,
    S: RenderSink + Send + 'static,
{
    thread::Builder::new()
        .name("display".to_owned())
        .spawn(move || DisplayWorker::new(device, sink, cmd_rx, &config)?.run())
        .context("Cannot start the display worker")
}

/// Report how the worker ended once the window is gone.
///
/// A worker that dropped its end of `events` has returned, so it is joined.
/// Otherwise the window was closed by hand and a paused worker may never notice;
/// the process exit ends it.
fn finish_worker(worker: JoinHandle<Result<()>>, events: Receiver<Event>) -> Result<()> {
    if events.is_disconnected() || worker.is_finished() {
        return join_worker(worker);
    }
    Ok(())
}

fn join_worker(worker: JoinHandle<Result<()>>) -> Result<()> {
    worker
        .join()
        .map_err(|_| anyhow!("Display worker panicked"))?
        .context("Display worker failed")
}
