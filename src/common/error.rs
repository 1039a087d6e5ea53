use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Agent not found: {id}")]
    AgentNotFound { id: String },

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("No feasible sample region: {attempts} rejection-sampling attempts exhausted")]
    NoFeasibleSample { attempts: u32 },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Snapshot encoding error: {0}")]
    SnapshotError(String),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Event sink error: {0}")]
    EventSink(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
