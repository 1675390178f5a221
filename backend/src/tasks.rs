use std::time::Duration;

use crate::constants::PURGE_INTERVAL_SECS;
use crate::state::Store;

pub async fn run_tasks(store: Store) {
    let mut interval_timer = tokio::time::interval(Duration::from_secs(PURGE_INTERVAL_SECS));
    loop {
        interval_timer.tick().await;
        // drop expired sessions
        let purged = store.purge_sessions();
        if purged > 0 {
            tracing::info!("sessions purged: {purged}");
        }
    }
}
