pub mod console_logger;
pub mod event_sink;
pub mod file_logger;
pub mod noop_logger;
pub mod tree_store;
pub mod workspace_data;

pub use console_logger::*;
pub use event_sink::*;
pub use file_logger::*;
pub use noop_logger::*;
pub use tree_store::*;
pub use workspace_data::*;
