//! Gateway liveness as seen by the status endpoint.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chatrelay_types::status::GatewayStatus;

/// Shared liveness flag for the Discord gateway connection.
///
/// Starts offline. The Discord event handler flips it on ready/resume and
/// off on disconnect; if the gateway never runs it stays offline.
#[derive(Debug, Clone, Default)]
pub struct StatusReporter {
    online: Arc<AtomicBool>,
}

impl StatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Release);
    }

    pub fn status(&self) -> GatewayStatus {
        GatewayStatus::from(self.online.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_offline() {
        assert_eq!(StatusReporter::new().status(), GatewayStatus::Offline);
    }

    #[test]
    fn test_toggle_visible_through_clones() {
        let reporter = StatusReporter::new();
        let observer = reporter.clone();

        reporter.set_online(true);
        assert_eq!(observer.status(), GatewayStatus::Online);

        reporter.set_online(false);
        assert_eq!(observer.status(), GatewayStatus::Offline);
    }
}
