//! Command line text-to-speech with Hiroyuki's voice, generated by CoeFont.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod playback;
pub mod report;
pub mod sink;
pub mod text;

pub use app::{App, Command};
pub use config::{Config, API_URL_ENV};
pub use error::AppError;
pub use logging::init_logging;
pub use playback::{PlaybackError, Player, RodioPlayer};
pub use report::{ConsoleReporter, Reporter};
pub use sink::{Destination, OutputFile};
pub use text::{resolve, resolve_with, DecodingError};
