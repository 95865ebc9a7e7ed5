mod command;
mod presence;
mod relay;
mod router;

pub use command::*;
pub use presence::*;
pub use relay::*;
pub use router::*;
