pub mod mock_gateway;
pub mod relay_helpers;

pub use mock_gateway::*;
pub use relay_helpers::*;
