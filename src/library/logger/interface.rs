use std::sync::Arc;

pub type LoggerError = Box<dyn std::error::Error + Send + Sync>;

pub trait Logger: Send + Sync {
    fn info(&self, message: &str) -> Result<(), LoggerError>;
    fn warn(&self, message: &str) -> Result<(), LoggerError>;
    fn error(&self, message: &str) -> Result<(), LoggerError>;
    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync>;
}
