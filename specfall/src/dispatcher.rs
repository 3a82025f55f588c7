use std::io::{BufRead, Write};

use anyhow::{Result, anyhow};
use flume::Sender;
use log::debug;
use specfall_messages::Command;
use thiserror::Error;

pub const PROMPT: &str = "Enter a command to control the plot: ";

pub const HELP: &str = "\
Available commands:
c <start> <end>: Change the range of channels to be plotted.
n <count>:       Change the number of integrations displayed.
p / pause:       Pause updates for the plot.
q / quit:        Exit the program.
r / resume:      Resume updates for the plot.
R / reset:       Reset the channel range.
?:               Show this help.
";

/// One classified line of operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Blank,
    Help,
    Quit,
    Command(Command),
}

/// Operator input that is never forwarded to the display worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid arguments.")]
    InvalidArguments,
    #[error("Invalid command.")]
    InvalidCommand,
}

/// Classify one line. Only arity and integer syntax are checked here; value
/// ranges are up to the worker, which knows the channel count.
pub fn parse(line: &str) -> Result<Input, InputError> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Ok(Input::Blank);
    };
    let args: Vec<&str> = tokens.collect();

    let input = match head {
        "?" => Input::Help,
        "q" | "quit" => Input::Quit,
        "p" | "pause" => Input::Command(Command::Pause),
        "r" | "resume" => Input::Command(Command::Resume),
        "R" | "reset" => Input::Command(Command::Reset),
        "c" => match integers(&args)?[..] {
            [start, end] => Input::Command(Command::SetChannelRange { start, end }),
            _ => return Err(InputError::InvalidArguments),
        },
        "n" => match integers(&args)?[..] {
            [count] => Input::Command(Command::SetDepth(count)),
            _ => return Err(InputError::InvalidArguments),
        },
        _ => return Err(InputError::InvalidCommand),
    };

    let takes_args = matches!(head, "c" | "n");
    if !takes_args && !args.is_empty() {
        return Err(InputError::InvalidCommand);
    }
    Ok(input)
}

fn integers(args: &[&str]) -> Result<Vec<i64>, InputError> {
    args.iter()
        .map(|arg| arg.parse().map_err(|_| InputError::InvalidArguments))
        .collect()
}

/// Read commands from `input` until `quit` or end of input.
///
/// Diagnostics and help go to `output`. Fails only on I/O errors or when the
/// display worker has hung up.
pub fn run<R: BufRead, W: Write>(mut input: R, mut output: W, cmd_tx: &Sender<Command>) -> Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        match parse(&line) {
            Ok(Input::Blank) => {}
            Ok(Input::Quit) => return Ok(()),
            Ok(Input::Help) => output.write_all(HELP.as_bytes())?,
            Ok(Input::Command(command)) => {
                debug!("Dispatching {command:?}");
                cmd_tx
                    .send(command)
                    .map_err(|_| anyhow!("Display worker is no longer running"))?;
            }
            Err(e) => writeln!(output, "ERROR: {e}")?,
        }
    }
}
