use anyhow::{Context, Result};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// How signaling envelopes are delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignalScope {
    /// Every envelope goes to all connected peers except the sender. Works
    /// only while a single pair is negotiating; kept as the default because
    /// it is the relay's original contract.
    #[default]
    Broadcast,
    /// Envelopes reach only the sender's paired room member. Signals from
    /// unpaired senders are dropped.
    RoomScoped,
}

impl FromStr for SignalScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "broadcast" => Ok(SignalScope::Broadcast),
            "room" | "room-scoped" => Ok(SignalScope::RoomScoped),
            other => Err(format!("unknown signal scope '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub signal_scope: SignalScope,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000),
            signal_scope: SignalScope::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment: `PORT` (default 3000) and
    /// `SIGNAL_SCOPE` (`broadcast` | `room-scoped`).
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(port) = env::var("PORT") {
            let port = port
                .parse::<u16>()
                .context("PORT must be a valid port number")?;
            config.bind_addr.set_port(port);
        }

        if let Ok(scope) = env::var("SIGNAL_SCOPE") {
            config.signal_scope = scope.parse().map_err(anyhow::Error::msg)?;
        }

        Ok(config)
    }
}
