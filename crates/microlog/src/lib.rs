//! A small leveled console logger.
//!
//! Info, debug and trace messages go to stdout, errors to stderr. Output can be
//! colored by severity and prefixed with the time elapsed since the first
//! timestamped message.
//!
//! ```no_run
//! use microlog::{Feature, Level};
//!
//! microlog::set_output_level(Level::Trace);
//! microlog::enable_feature(Feature::Time);
//! microlog::debug!("loaded {} entries", 3);
//! microlog::error!("disk full");
//! ```

mod level;
mod feature;
mod config;
mod error;
mod log;
mod global;

pub use level::{Level, Severity};
pub use feature::{Feature, Features};
pub use config::{LogConfig, ENV_VAR};
pub use error::LogError;
pub use log::{Logger, supports_color};
pub use global::*;

pub use termcolor::{WriteColor, Buffer, StandardStream};

pub type Result<T> = core::result::Result<T, LogError>;
