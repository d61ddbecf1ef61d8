//! Console logger implementation

use super::traits::Logger;

/// A logger that writes info to stdout and everything else to stderr
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    verbose: bool,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Console logger with the `[CourseRAG]` prefix; debug lines are dropped
    pub fn new() -> Self {
        Self {
            prefix: "[CourseRAG]".to_string(),
            verbose: false,
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::new()
        }
    }

    /// Also print debug lines
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{} DEBUG: {}", self.prefix, message);
        }
    }

    fn info(&self, message: &str) {
        println!("{} INFO: {}", self.prefix, message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} WARN: {}", self.prefix, message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} ERROR: {}", self.prefix, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_creation() {
        let logger = ConsoleLogger::new();
        assert_eq!(logger.prefix, "[CourseRAG]");
        assert!(!logger.verbose);

        let custom = ConsoleLogger::with_prefix("[api]").verbose();
        assert_eq!(custom.prefix, "[api]");
        assert!(custom.verbose);
    }
}
