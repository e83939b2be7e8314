use std::time::Duration;

use common::log;

use crate::game_registry::GameRegistry;

/// Periodically drops game sessions nobody has touched for a while.
pub struct CleanupTask {
    registry: GameRegistry,
    check_interval: Duration,
    inactivity_timeout: Duration,
}

impl CleanupTask {
    pub fn new(
        registry: GameRegistry,
        check_interval: Duration,
        inactivity_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            check_interval,
            inactivity_timeout,
        }
    }

    pub async fn run(&self) {
        let mut interval = tokio::time::interval(self.check_interval);

        loop {
            interval.tick().await;

            let expired = self.registry.remove_inactive(self.inactivity_timeout).await;
            if expired.is_empty() {
                continue;
            }

            for game_id in &expired {
                log!("Cleaning up inactive game session: {}", game_id);
            }
            log!(
                "{} game sessions remain after cleanup",
                self.registry.session_count().await
            );
        }
    }
}
