pub mod config;
pub mod gateway;
pub mod registry;
pub mod relay;

pub use config::*;
pub use gateway::*;
pub use registry::*;
pub use relay::*;
