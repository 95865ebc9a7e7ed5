use crate::model::ConnectionId;
use thiserror::Error;

/// Failures inside the relay. All of them are contained locally: logged,
/// never surfaced back to the originating client.
#[derive(Debug, Error, PartialEq)]
pub enum RelayError {
    #[error("connection {0} is already registered")]
    DuplicateConnection(ConnectionId),

    #[error("recipient {0} is no longer connected")]
    UnknownRecipient(ConnectionId),

    #[error("signal envelope has no recognized kind")]
    MalformedEnvelope,
}
