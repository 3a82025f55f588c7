mod state;
mod waterfall;

use eframe::egui;
use flume::TryRecvError;
use log::info;
use specfall_messages::{ChannelAxis, Event};
use state::UiState;

/// Main application struct implementing the egui App trait.
pub struct SpecfallApp {
    /// Receiver for images from the display worker
    event_rx: flume::Receiver<Event>,

    /// Local application state
    state: UiState,
}

impl SpecfallApp {
    fn new(event_rx: flume::Receiver<Event>, axis: ChannelAxis) -> Self {
        Self {
            event_rx,
            state: UiState::new(axis),
        }
    }
}

impl eframe::App for SpecfallApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.event_rx.try_recv() {
            Ok(event) => self.state.handle_event(event),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                info!("Display worker is gone, closing the window");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }

        // Always request continuous repainting so new images show up promptly
        ctx.request_repaint();

        egui::SidePanel::right("view_info")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Spectrum");
                ui.separator();
                for line in self.state.describe() {
                    ui.label(line);
                }
                ui.separator();
                ui.label("x: Channel, y: Integration");
                ui.label("Type ? in the terminal for commands.");
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(&mut self.state.waterfall);
        });
    }
}

/// Entry point for the UI module.
///
/// Runs the eframe application on the calling thread (blocking) until the
/// window is closed or the display worker stops.
pub fn run(event_rx: flume::Receiver<Event>, axis: ChannelAxis) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("Spectrum"),
        ..Default::default()
    };

    eframe::run_native(
        "specfall",
        options,
        Box::new(move |_cc| Ok(Box::new(SpecfallApp::new(event_rx, axis)))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
