mod pairing;
mod registry;

pub use pairing::*;
pub use registry::*;
