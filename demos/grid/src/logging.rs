//! Console logging for the demo.

use anyhow::Result;
use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

// ISO 8601 timestamp, color coded level, thread name.
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S%.3f)} {h({l:<5})} [{T}] {t} - {m}{n}";

/// Install a stdout appender at `level` for the engine crates; everything
/// else stays at `warn`.
pub fn init(level: LevelFilter) -> Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut config =
        Config::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));
    for module in ["grid", "vs_sim", "vs_output"] {
        config = config.logger(Logger::builder().build(module, level));
    }
    let config = config.build(Root::builder().appender("stdout").build(LevelFilter::Warn))?;

    log4rs::init_config(config)?;
    Ok(())
}
