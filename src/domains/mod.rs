pub mod agent;
pub mod airspace;
pub mod logger;
pub mod planning;
pub mod world;

pub use agent::*;
pub use airspace::*;
pub use logger::*;
pub use planning::*;
pub use world::*;
