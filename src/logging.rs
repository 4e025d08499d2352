use clap::ValueEnum;
use tracing::Level;

/// Log level names accepted on the command line.
///
/// `panic` and `fatal` have no tracing counterpart and both map to `ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Panic,
    Fatal,
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> Level {
        match self {
            LogLevel::Panic | LogLevel::Fatal | LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Install the global tracing subscriber, writing to stdout either as JSON
/// lines or as the default human-readable format.
pub fn init(json: bool, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level.as_tracing_level())
        .with_writer(std::io::stdout);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<LogLevel, String> {
        LogLevel::from_str(input, true)
    }

    #[test]
    fn parses_every_documented_level() {
        assert_eq!(parse("panic").unwrap(), LogLevel::Panic);
        assert_eq!(parse("fatal").unwrap(), LogLevel::Fatal);
        assert_eq!(parse("error").unwrap(), LogLevel::Error);
        assert_eq!(parse("warn").unwrap(), LogLevel::Warn);
        assert_eq!(parse("info").unwrap(), LogLevel::Info);
        assert_eq!(parse("debug").unwrap(), LogLevel::Debug);
        assert_eq!(parse("trace").unwrap(), LogLevel::Trace);
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!(parse("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(parse("Warning").unwrap(), LogLevel::Warn);
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(parse("verbose").is_err());
    }

    #[test]
    fn fatal_levels_map_to_error() {
        assert_eq!(LogLevel::Panic.as_tracing_level(), Level::ERROR);
        assert_eq!(LogLevel::Fatal.as_tracing_level(), Level::ERROR);
        assert_eq!(LogLevel::Info.as_tracing_level(), Level::INFO);
    }
}
