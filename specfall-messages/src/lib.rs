mod command;
mod config;
mod event;
mod units;

pub use command::Command;
pub use config::{Antenna, DeviceConfig, DisplayConfig, Orientation};
pub use event::{Event, WaterfallImage};
pub use units::{ChannelAxis, Hertz};
