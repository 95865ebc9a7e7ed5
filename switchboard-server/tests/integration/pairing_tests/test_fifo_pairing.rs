use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{RELAY_TIMEOUT_MS, Recipient, join, wait_for_deliveries};
use serde_json::json;
use switchboard_core::ConnectionId;
use switchboard_server::{RelayCommand, SignalScope};
use tokio::sync::mpsc;

async fn signal_target(
    cmd_tx: &mpsc::Sender<RelayCommand>,
    sink: &crate::utils::MockGatewaySink,
    sender: &ConnectionId,
    expected_deliveries: usize,
) -> Recipient {
    cmd_tx
        .send(RelayCommand::Signal {
            connection_id: sender.clone(),
            envelope: json!({ "kind": "candidate", "payload": {} }),
        })
        .await
        .unwrap();
    wait_for_deliveries(sink, expected_deliveries, RELAY_TIMEOUT_MS).await;

    sink.deliveries().await.pop().unwrap().recipient
}

#[tokio::test]
async fn test_rooms_form_in_strict_arrival_order() {
    init_tracing();

    let (cmd_tx, sink) = create_test_relay(SignalScope::RoomScoped);

    let a = join(&cmd_tx, "alice").await;
    let b = join(&cmd_tx, "bob").await;
    let c = join(&cmd_tx, "carol").await;
    let d = join(&cmd_tx, "dave").await;
    wait_for_deliveries(&sink, 8, RELAY_TIMEOUT_MS).await;

    // Arrival order [a, b, c, d] must yield Room(a, b) and Room(c, d).
    assert_eq!(
        signal_target(&cmd_tx, &sink, &a, 9).await,
        Recipient::One(b.clone())
    );
    assert_eq!(
        signal_target(&cmd_tx, &sink, &b, 10).await,
        Recipient::One(a.clone())
    );
    assert_eq!(
        signal_target(&cmd_tx, &sink, &c, 11).await,
        Recipient::One(d.clone())
    );
    assert_eq!(
        signal_target(&cmd_tx, &sink, &d, 12).await,
        Recipient::One(c.clone())
    );
}
