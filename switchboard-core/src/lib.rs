pub mod error;
pub mod model;

pub use error::RelayError;
pub use model::*;
