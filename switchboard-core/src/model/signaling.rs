use crate::error::RelayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Offer,
    Answer,
    Candidate,
}

impl SignalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::Candidate => "candidate",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The envelope the relay forwards between peers. `payload` stays opaque;
/// the relay reads only `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalEnvelope {
    pub kind: SignalKind,
    pub payload: Value,
}

impl SignalEnvelope {
    /// Read the `kind` tag out of a raw envelope without touching the payload.
    pub fn kind_of(envelope: &Value) -> Result<SignalKind, RelayError> {
        envelope
            .get("kind")
            .and_then(|kind| serde_json::from_value(kind.clone()).ok())
            .ok_or(RelayError::MalformedEnvelope)
    }
}
