// Application layer - orchestration between the CLI, the fleet core,
// and the snapshot store.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
