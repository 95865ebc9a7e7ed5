mod connection;
mod message;
mod room;
mod signaling;

pub use connection::ConnectionId;
pub use message::{ClientMessage, ServerMessage};
pub use room::Room;
pub use signaling::{SignalEnvelope, SignalKind};
