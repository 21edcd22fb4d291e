//! Device actor - simulates the base-unit pairing handshake in the Tokio runtime
//!
//! There is no real hardware protocol; the actor only models the connect
//! delay the companion app shows while a colony's base unit "pairs".

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::constants::PAIRING_DELAY_MS;
use crate::messages::{DeviceCommand, DeviceEvent};

/// Device actor that processes pairing commands
pub struct DeviceActor {
    event_tx: mpsc::UnboundedSender<DeviceEvent>,
    handshakes: JoinSet<()>,
}

impl DeviceActor {
    pub fn new(event_tx: mpsc::UnboundedSender<DeviceEvent>) -> Self {
        DeviceActor {
            event_tx,
            handshakes: JoinSet::new(),
        }
    }

    /// Run the device actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<DeviceCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(DeviceCommand::Pair { colony_id }) => {
                            let event_tx = self.event_tx.clone();
                            self.handshakes.spawn(async move {
                                tracing::info!(colony = %colony_id, "Pairing handshake started");
                                tokio::time::sleep(Duration::from_millis(PAIRING_DELAY_MS)).await;
                                tracing::info!(colony = %colony_id, "Pairing handshake finished");
                                let _ = event_tx.send(DeviceEvent::Paired { colony_id });
                            });
                        }

                        Some(DeviceCommand::Shutdown) => {
                            self.handshakes.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed handshakes
                Some(_result) = self.handshakes.join_next() => {}
            }
        }
    }
}
