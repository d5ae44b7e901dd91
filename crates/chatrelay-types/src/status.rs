use serde::{Deserialize, Serialize};
use std::fmt;

/// Connectivity of the bot process to the Discord gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayStatus {
    Online,
    Offline,
}

impl From<bool> for GatewayStatus {
    fn from(online: bool) -> Self {
        if online {
            GatewayStatus::Online
        } else {
            GatewayStatus::Offline
        }
    }
}

impl fmt::Display for GatewayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayStatus::Online => write!(f, "online"),
            GatewayStatus::Offline => write!(f, "offline"),
        }
    }
}
