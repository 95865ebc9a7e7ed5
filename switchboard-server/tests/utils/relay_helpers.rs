use std::time::{Duration, Instant};
use switchboard_core::ConnectionId;
use switchboard_server::RelayCommand;
use tokio::sync::mpsc;

use super::mock_gateway::MockGatewaySink;

/// Timeout for waiting on relay output (ms).
pub const RELAY_TIMEOUT_MS: u64 = 2000;

/// Connect and announce in one step, returning the new connection id.
/// Produces two deliveries: the name ack and a presence broadcast.
pub async fn join(cmd_tx: &mpsc::Sender<RelayCommand>, name: &str) -> ConnectionId {
    let connection_id = ConnectionId::new();

    cmd_tx
        .send(RelayCommand::Connect {
            connection_id: connection_id.clone(),
        })
        .await
        .expect("relay closed");

    cmd_tx
        .send(RelayCommand::SetName {
            connection_id: connection_id.clone(),
            name: name.to_string(),
        })
        .await
        .expect("relay closed");

    connection_id
}

pub async fn disconnect(cmd_tx: &mpsc::Sender<RelayCommand>, id: &ConnectionId) {
    cmd_tx
        .send(RelayCommand::Disconnect {
            connection_id: id.clone(),
        })
        .await
        .expect("relay closed");
}

/// Poll until the mock has captured at least `expected` deliveries.
/// The relay handles commands strictly in order, so once the delivery for
/// the last command is visible, everything before it has been processed.
pub async fn wait_for_deliveries(sink: &MockGatewaySink, expected: usize, timeout_ms: u64) {
    let start = Instant::now();

    loop {
        let seen = sink.delivery_count().await;
        if seen >= expected {
            return;
        }
        if start.elapsed() > Duration::from_millis(timeout_ms) {
            panic!("Timed out waiting for {expected} deliveries, saw {seen}");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
