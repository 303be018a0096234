use core::str::FromStr;

use rustc_hash::FxHashMap;

use compact_str::CompactString;

use crate::{Feature, Features, Level, Severity};

/// Environment variable read when the global logger is created.
pub const ENV_VAR: &str = "RUST_LOG";

/// Output threshold and features of a logger.
///
/// Targets are module paths. A target level applies to the target itself and
/// everything below it (`target::...`), the most specific entry winning.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct LogConfig {
    pub output_level: Level,
    pub features: Features,
    target_levels: FxHashMap<CompactString, Level>,
}

impl LogConfig {

    /// Builds a config from [`ENV_VAR`], falling back to the defaults when it
    /// is unset.
    pub fn from_env() -> Self {
        match std::env::var(ENV_VAR) {
            Ok(env) => Self::parse_directives(&env),
            Err(_) => Self::default(),
        }
    }

    /// Parses a comma separated list of `level` and `target=level` entries.
    /// Entries with an unknown level are skipped.
    pub fn parse_directives(directives: &str) -> Self {
        let mut config = Self::default();
        let parse_arg: for<'a> fn(&'a str) -> (Option<&'a str>, &'a str) = |arg: &str| -> (Option<&str>, &str) {
            let mut target = None;
            let mut level = arg.trim();
            if let Some(j) = arg.find("=") {
                target = Some(arg[0..j].trim());
                level = arg[j+1..].trim();
            }
            (target, level)
        };
        for arg in directives.split(",") {
            let (target, level) = parse_arg(arg);
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            match target {
                Some(target) if !target.is_empty() => {
                    let entry = config.target_levels
                        .entry(CompactString::new(target))
                        .or_insert(level);
                    *entry = (*entry).min(level);
                },
                _ => config.output_level = level,
            }
        }
        config
    }

    #[inline(always)]
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(feature)
    }

    pub fn set_target_level(&mut self, target: &str, level: Level) {
        self.target_levels.insert(CompactString::new(target), level);
    }

    pub fn clear_target_level(&mut self, target: &str) -> Option<Level> {
        self.target_levels.remove(target)
    }

    /// The threshold in effect for `target`.
    pub fn target_level(&self, target: &str) -> Level {
        if self.target_levels.is_empty() {
            return self.output_level
        }
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.output_level
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, severity: Severity) -> bool {
        severity.level() <= self.target_level(target)
    }
}
