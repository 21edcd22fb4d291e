//! Device messages - commands to and events from the pairing simulator

/// Commands sent from the App layer to the device actor
#[derive(Debug, Clone)]
pub enum DeviceCommand {
    /// Begin the (simulated) pairing handshake with a colony's base unit
    Pair { colony_id: String },
    Shutdown,
}

/// Events sent from the device actor back to the App layer
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// Pairing handshake finished for the given colony
    Paired { colony_id: String },
}
