mod boat;
mod fleet;

pub use boat::*;
pub use fleet::*;
