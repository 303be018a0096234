use std::{
    ffi::OsStr,
    io::{self, Write},
    time::{Duration, Instant},
};

use core::fmt::{self, Arguments, Display, Formatter};

use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

use is_terminal::IsTerminal;

use crate::*;

/// Whether a stream should receive escape sequences. Dumb terminals and
/// anything that is not a terminal get plain text.
pub fn supports_color(is_terminal: bool, term: Option<&OsStr>) -> bool {
    is_terminal && term.is_some_and(|term| term != "dumb")
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if supports_color(is_terminal, std::env::var_os("TERM").as_deref()) {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    }
}

/// Time since the epoch, rendered as `SSS.UUUUUU | `.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub(crate) struct Elapsed(pub Duration);

impl Display for Elapsed {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}.{:06} | ", self.0.as_secs(), self.0.subsec_micros())
    }
}

/// Formats and routes messages to an output and an error stream.
///
/// Error messages go to `err`, everything else to `out`. The logger itself is
/// not synchronized; the global instance behind [`log`](crate::log) is.
pub struct Logger<W: WriteColor> {
    out: W,
    err: W,
    config: LogConfig,
    epoch: Option<Instant>,
}

impl Logger<StandardStream> {

    /// A logger over stdout and stderr, configured from the environment.
    pub fn stdio() -> Self {
        let out = StandardStream::stdout(color_choice(io::stdout().is_terminal()));
        let err = StandardStream::stderr(color_choice(io::stderr().is_terminal()));
        Self::with_config(out, err, LogConfig::from_env())
    }
}

impl<W: WriteColor> Logger<W> {

    #[inline(always)]
    pub fn new(out: W, err: W) -> Self {
        Self::with_config(out, err, LogConfig::default())
    }

    #[inline(always)]
    pub fn with_config(out: W, err: W, config: LogConfig) -> Self {
        Self {
            out,
            err,
            config,
            epoch: None,
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    #[inline(always)]
    pub fn output_level(&self) -> Level {
        self.config.output_level
    }

    #[inline(always)]
    pub fn set_output_level(&mut self, level: Level) {
        self.config.output_level = level;
    }

    #[inline(always)]
    pub fn enable_feature(&mut self, feature: Feature) {
        self.config.features.insert(feature);
    }

    #[inline(always)]
    pub fn disable_feature(&mut self, feature: Feature) {
        self.config.features.remove(feature);
    }

    #[inline(always)]
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.config.has_feature(feature)
    }

    #[inline(always)]
    pub fn set_target_level(&mut self, target: &str, level: Level) {
        self.config.set_target_level(target, level);
    }

    #[inline(always)]
    pub fn clear_target_level(&mut self, target: &str) {
        self.config.clear_target_level(target);
    }

    /// The instant of the first timestamped message, if any was written.
    #[inline(always)]
    pub fn epoch(&self) -> Option<Instant> {
        self.epoch
    }

    #[inline(always)]
    pub fn out(&self) -> &W {
        &self.out
    }

    #[inline(always)]
    pub fn err(&self) -> &W {
        &self.err
    }

    fn elapsed(&mut self) -> Elapsed {
        let epoch = *self.epoch.get_or_insert_with(Instant::now);
        Elapsed(epoch.elapsed())
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, severity: Severity) -> bool {
        self.config.enabled(target, severity)
    }

    /// Writes one line for `msg` unless `severity` is filtered out for
    /// `target`. Returns whether the line was written.
    pub fn log(&mut self, target: &str, severity: Severity, msg: Arguments) -> Result<bool> {
        if !self.enabled(target, severity) {
            return Ok(false)
        }
        self.write_line(severity, msg)?;
        Ok(true)
    }

    /// Writes one line for `msg` without consulting the output level.
    pub fn write_line(&mut self, severity: Severity, msg: Arguments) -> Result<()> {
        let color = self.config.has_feature(Feature::Color);
        let elapsed = self.config
            .has_feature(Feature::Time)
            .then(|| self.elapsed());
        let stream = if severity.is_error() {
            &mut self.err
        } else {
            &mut self.out
        };
        let color = color && stream.supports_color();
        if color {
            if let Some(fg) = severity.color() {
                stream.set_color(ColorSpec::new().set_fg(Some(fg)).set_reset(false))?;
            }
        }
        let body = write_body(stream, elapsed, msg);
        // the reset goes out even when the body failed
        let reset = if color { stream.reset() } else { Ok(()) };
        body?;
        reset?;
        stream.write_all(b"\n")?;
        stream.flush()?;
        Ok(())
    }
}

fn write_body<W: Write>(stream: &mut W, elapsed: Option<Elapsed>, msg: Arguments) -> io::Result<()> {
    if let Some(elapsed) = elapsed {
        write!(stream, "{}", elapsed)?;
    }
    stream.write_fmt(msg)
}

#[cfg(test)]
mod tests {

    use termcolor::Buffer;

    use super::*;

    const RED: &str = "\x1b[31m";
    const YELLOW: &str = "\x1b[33m";
    const BLUE: &str = "\x1b[34m";
    const RESET: &str = "\x1b[0m";

    fn ansi() -> Logger<Buffer> {
        Logger::new(Buffer::ansi(), Buffer::ansi())
    }

    fn text(buf: &Buffer) -> &str {
        core::str::from_utf8(buf.as_slice()).unwrap()
    }

    /// Splits `SSS.UUUUUU | rest` into the elapsed time and the rest.
    fn split_elapsed(line: &str) -> (Duration, &str) {
        let (stamp, rest) = line.split_once(" | ").unwrap();
        let (secs, micros) = stamp.split_once('.').unwrap();
        assert_eq!(secs.len(), 3);
        assert_eq!(micros.len(), 6);
        let elapsed = Duration::from_secs(secs.parse().unwrap())
            + Duration::from_micros(micros.parse().unwrap());
        (elapsed, rest)
    }

    #[test]
    fn elapsed_has_fixed_widths() {
        assert_eq!(Elapsed(Duration::ZERO).to_string(), "000.000000 | ");
        assert_eq!(
            Elapsed(Duration::from_secs(7) + Duration::from_micros(42)).to_string(),
            "007.000042 | ",
        );
        assert_eq!(Elapsed(Duration::from_millis(123_456_789)).to_string(), "123456.789000 | ");
    }

    #[test]
    fn color_requires_a_real_terminal() {
        assert!(supports_color(true, Some(OsStr::new("xterm-256color"))));
        assert!(!supports_color(true, Some(OsStr::new("dumb"))));
        assert!(!supports_color(true, None));
        assert!(!supports_color(false, Some(OsStr::new("xterm"))));
    }

    #[test]
    fn every_severity_gets_one_colored_line_on_its_stream() {
        let mut logger = ansi();
        logger.set_output_level(Level::Trace);
        assert!(logger.log("app", Severity::Info, format_args!("info {}", 1)).unwrap());
        assert!(logger.log("app", Severity::Debug, format_args!("debug {}", 2)).unwrap());
        assert!(logger.log("app", Severity::Trace, format_args!("trace {}", 3)).unwrap());
        assert!(logger.log("app", Severity::Error, format_args!("error {}", 4)).unwrap());
        assert_eq!(
            text(logger.out()),
            format!("info 1{RESET}\n{YELLOW}debug 2{RESET}\n{BLUE}trace 3{RESET}\n"),
        );
        assert_eq!(text(logger.err()), format!("{RED}error 4{RESET}\n"));
    }

    #[test]
    fn suppressed_messages_write_nothing() {
        let mut logger = ansi();
        logger.set_output_level(Level::Debug);
        assert!(!logger.log("app", Severity::Trace, format_args!("hidden")).unwrap());
        logger.set_output_level(Level::None);
        assert!(!logger.log("app", Severity::Error, format_args!("hidden")).unwrap());
        assert!(logger.out().is_empty());
        assert!(logger.err().is_empty());
    }

    #[test]
    fn without_color_output_is_the_raw_message() {
        let mut logger = ansi();
        logger.disable_feature(Feature::Color);
        logger.log("app", Severity::Error, format_args!("disk {} full", "/dev/sda")).unwrap();
        assert_eq!(logger.err().as_slice(), b"disk /dev/sda full\n");
    }

    #[test]
    fn plain_writers_ignore_the_color_feature() {
        let mut logger = Logger::new(Buffer::no_color(), Buffer::no_color());
        logger.set_output_level(Level::Debug);
        assert!(logger.has_feature(Feature::Color));
        logger.log("app", Severity::Debug, format_args!("plain")).unwrap();
        assert_eq!(logger.out().as_slice(), b"plain\n");
    }

    #[test]
    fn time_prefix_follows_color() {
        let mut logger = ansi();
        logger.set_output_level(Level::Trace);
        logger.enable_feature(Feature::Time);
        logger.log("app", Severity::Trace, format_args!("tick")).unwrap();
        let out = text(logger.out());
        let line = out.strip_prefix(BLUE).unwrap();
        let (_, rest) = split_elapsed(line);
        assert_eq!(rest, format!("tick{RESET}\n"));
    }

    #[test]
    fn elapsed_is_monotonic_and_epoch_is_captured_once() {
        let mut logger = ansi();
        logger.disable_feature(Feature::Color);
        logger.enable_feature(Feature::Time);
        assert_eq!(logger.epoch(), None);
        logger.log("app", Severity::Info, format_args!("first")).unwrap();
        let epoch = logger.epoch();
        assert!(epoch.is_some());
        std::thread::sleep(Duration::from_millis(2));
        logger.log("app", Severity::Info, format_args!("second")).unwrap();
        assert_eq!(logger.epoch(), epoch);
        let out = text(logger.out());
        let mut lines = out.lines();
        let (first, msg) = split_elapsed(lines.next().unwrap());
        assert_eq!(msg, "first");
        let (second, msg) = split_elapsed(lines.next().unwrap());
        assert_eq!(msg, "second");
        assert!(first <= second);
        assert!(second >= Duration::from_millis(2));
    }

    #[test]
    fn write_line_skips_the_level_check() {
        let mut logger = ansi();
        logger.disable_feature(Feature::Color);
        logger.set_output_level(Level::None);
        assert!(!logger.enabled("app", Severity::Trace));
        logger.write_line(Severity::Trace, format_args!("forced")).unwrap();
        assert_eq!(logger.out().as_slice(), b"forced\n");
    }

    #[test]
    fn untimed_messages_leave_the_epoch_alone() {
        let mut logger = ansi();
        logger.log("app", Severity::Info, format_args!("no time")).unwrap();
        assert_eq!(logger.epoch(), None);
    }

    #[test]
    fn target_overrides_apply_to_submodules() {
        let mut logger = ansi();
        logger.disable_feature(Feature::Color);
        logger.set_target_level("app::net", Level::Trace);
        assert!(logger.log("app::net::tcp", Severity::Trace, format_args!("syn")).unwrap());
        assert!(!logger.log("app::fs", Severity::Trace, format_args!("open")).unwrap());
        logger.clear_target_level("app::net");
        assert!(!logger.log("app::net::tcp", Severity::Trace, format_args!("ack")).unwrap());
        assert_eq!(logger.out().as_slice(), b"syn\n");
    }

    struct Broken {
        written: Vec<u8>,
    }

    impl Write for Broken {

        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.starts_with(b"\x1b") {
                self.written.extend_from_slice(buf);
                Ok(buf.len())
            } else {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl WriteColor for Broken {

        fn supports_color(&self) -> bool {
            true
        }

        fn set_color(&mut self, spec: &ColorSpec) -> io::Result<()> {
            if spec.fg() == Some(&termcolor::Color::Red) {
                self.write_all(RED.as_bytes())?;
            }
            Ok(())
        }

        fn reset(&mut self) -> io::Result<()> {
            self.write_all(RESET.as_bytes())
        }
    }

    #[test]
    fn failed_body_still_resets_color() {
        let broken = || Broken { written: Vec::new() };
        let mut logger = Logger::new(broken(), broken());
        let result = logger.log("app", Severity::Error, format_args!("lost"));
        assert!(matches!(result, Err(LogError::IoError(_))));
        assert_eq!(logger.err().written, format!("{RED}{RESET}").into_bytes());
    }
}
