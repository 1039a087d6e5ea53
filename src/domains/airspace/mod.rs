pub mod conflict;
pub mod ports;
pub mod target;
pub mod workspace;

pub use conflict::*;
pub use ports::*;
pub use target::*;
pub use workspace::*;
