use crate::library::logger::interface::{Logger, LoggerError};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Writes log lines to stderr so that stdout stays reserved for command output.
#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset) -> Self {
        Self {
            namespace: None,
            timezone,
        }
    }

    fn format_line(&self, level: Level, message: &str) -> String {
        let local_time = Utc::now().with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %I:%M:%S%.3f %p");
        match &self.namespace {
            Some(namespace) => format!(
                "[{}] {} {}: {}",
                formatted,
                level.as_str(),
                namespace,
                message
            ),
            None => format!("[{}] {} {}", formatted, level.as_str(), message),
        }
    }

    fn write(&self, level: Level, message: &str) -> Result<(), LoggerError> {
        let line = self.format_line(level, message);
        writeln!(std::io::stderr().lock(), "{}", line)?;
        Ok(())
    }
}

impl Logger for LoggerConsole {
    fn info(&self, message: &str) -> Result<(), LoggerError> {
        self.write(Level::Info, message)
    }

    fn warn(&self, message: &str) -> Result<(), LoggerError> {
        self.write(Level::Warn, message)
    }

    fn error(&self, message: &str) -> Result<(), LoggerError> {
        self.write(Level::Error, message)
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerConsole {
            namespace: Some(new_namespace),
            timezone: self.timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_format_line_without_namespace() {
        let logger = LoggerConsole::new(utc());
        let line = logger.format_line(Level::Info, "ready");
        assert!(line.ends_with("] INFO ready"));
    }

    #[test]
    fn test_format_line_with_nested_namespace() {
        let logger = LoggerConsole {
            namespace: Some("history:sqlite".to_string()),
            timezone: utc(),
        };
        let line = logger.format_line(Level::Warn, "slow query");
        assert!(line.ends_with("] WARN history:sqlite: slow query"));
    }

    #[test]
    fn test_with_namespace_logs_without_error() {
        let logger = LoggerConsole::new(utc()).with_namespace("service");
        assert!(logger.info("hello").is_ok());
        assert!(logger.with_namespace("classify").error("boom").is_ok());
    }
}
