//! Writes statistics as `{PREFIX} {NAME}={VALUE}` lines, optionally followed by a closing line.
//!
//! Nothing is written until [`configure_statistic_logging`] has been called.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;

use convert_case::Case;
use convert_case::Casing;

struct StatisticOptions {
    prefix: &'static str,
    after_statistics: Option<&'static str>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send + Sync>,
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("after_statistics", &self.after_statistics)
            .field("casing", &self.casing)
            .field("writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions>> = OnceLock::new();

/// Configures the logging of statistics. Only the first call has an effect.
///
/// If no writer is given, statistics are written to stdout.
pub fn configure_statistic_logging(
    prefix: &'static str,
    after: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| {
        RwLock::new(StatisticOptions {
            prefix,
            after_statistics: after,
            casing,
            writer: writer.unwrap_or(Box::new(stdout())),
        })
    });
}

/// Logs the statistic `name` with value `value`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    if let Some(lock) = STATISTIC_OPTIONS.get() {
        if let Ok(mut options) = lock.write() {
            let name = match options.casing {
                Some(casing) => name.to_string().to_case(casing),
                None => name.to_string(),
            };
            let prefix = options.prefix;
            let _ = writeln!(options.writer, "{prefix} {name}={value}");
        }
    }
}

/// Logs the closing line of a block of statistics, if one was configured.
pub fn log_statistic_postfix() {
    if let Some(lock) = STATISTIC_OPTIONS.get() {
        if let Ok(mut options) = lock.write() {
            if let Some(postfix) = options.after_statistics {
                let _ = writeln!(options.writer, "{postfix}");
            }
        }
    }
}

pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
