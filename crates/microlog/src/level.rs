use core::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use termcolor::Color;

/// Output threshold. A message is written when its [`Severity`] ranks at or
/// below the active level.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Level {
    /// Do not show any log messages.
    None = 0,
    /// Only show error messages.
    Error = 1,
    /// Show info and error messages.
    #[default]
    Info = 2,
    /// Show debug, info and error messages.
    Debug = 3,
    /// Show every message.
    Trace = 4,
}

impl Level {

    #[inline(always)]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Error => "error",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("off") {
            Ok(Self::None)
        } else if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

impl Display for Level {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a single message.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Severity {
    Error,
    Info,
    Debug,
    Trace,
}

impl Severity {

    /// The lowest threshold at which this severity is written.
    #[inline(always)]
    pub fn level(self) -> Level {
        match self {
            Self::Error => Level::Error,
            Self::Info => Level::Info,
            Self::Debug => Level::Debug,
            Self::Trace => Level::Trace,
        }
    }

    #[inline(always)]
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Error => Some(Color::Red),
            Self::Debug => Some(Color::Yellow),
            Self::Trace => Some(Color::Blue),
            Self::Info => None,
        }
    }

    #[inline(always)]
    pub fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}
