use crate::domains::logger::{DomainLogger, DynLogger};
use std::sync::Arc;

/// Console-backed DomainLogger, the fallback when no log file is
/// configured.
pub struct ConsoleLogger;

impl DomainLogger for ConsoleLogger {
    fn info(&self, msg: &str) {
        println!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        println!("WARN: {}", msg);
    }

    fn error(&self, msg: &str) {
        eprintln!("ERROR: {}", msg);
    }
}

pub fn init_console_logger() -> DynLogger {
    Arc::new(ConsoleLogger)
}
