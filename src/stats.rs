use crate::backend::Backend;
use crate::store::{Action, SiteState};
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Fetches the backend totals and swaps them into the cache. Failures are
/// logged and leave the previous snapshot in place. Concurrent refreshes are
/// not deduplicated; whichever response lands last wins.
pub async fn refresh_stats<B: Backend>(backend: &B, state: &Mutex<SiteState>) {
    match backend.fetch_stats().await {
        Ok(snapshot) => {
            debug!(
                total_donations = snapshot.total_donations,
                total_contacts = snapshot.total_contacts,
                "stats refreshed"
            );
            state.lock().await.apply(Action::StatsLoaded(snapshot));
        }
        Err(err) => error!("error fetching stats: {err}"),
    }
}

/// Renders a total with thousands separators and at most two decimals,
/// e.g. `4300.5` as `4,300.5`.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("{sign}{grouped}"),
        f if f % 10 == 0 => format!("{sign}{grouped}.{}", f / 10),
        f => format!("{sign}{grouped}.{f:02}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BackendError;
    use crate::models::{ContactRequest, DonationRequest, StatsSnapshot};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedStats {
        response: Option<StatsSnapshot>,
        calls: AtomicUsize,
    }

    impl Backend for ScriptedStats {
        async fn fetch_stats(&self) -> Result<StatsSnapshot, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .ok_or(BackendError::Status(reqwest::StatusCode::BAD_GATEWAY))
        }

        async fn submit_donation(&self, _: &DonationRequest) -> Result<(), BackendError> {
            Ok(())
        }

        async fn submit_contact(&self, _: &ContactRequest) -> Result<(), BackendError> {
            Ok(())
        }
    }

    fn startup_totals() -> StatsSnapshot {
        StatsSnapshot {
            total_donations: 12,
            total_amount: 4300.5,
            total_contacts: 3,
        }
    }

    #[tokio::test]
    async fn successful_fetch_replaces_cache_exactly() {
        let backend = ScriptedStats {
            response: Some(startup_totals()),
            calls: AtomicUsize::new(0),
        };
        let state = Mutex::new(SiteState::default());

        refresh_stats(&backend, &state).await;

        assert_eq!(state.lock().await.stats, startup_totals());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_snapshot() {
        let state = Mutex::new(SiteState::default());
        state
            .lock()
            .await
            .apply(Action::StatsLoaded(startup_totals()));

        let backend = ScriptedStats {
            response: None,
            calls: AtomicUsize::new(0),
        };
        refresh_stats(&backend, &state).await;
        refresh_stats(&backend, &state).await;

        assert_eq!(state.lock().await.stats, startup_totals());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_first_fetch_keeps_zero_default() {
        let state = Mutex::new(SiteState::default());
        let backend = ScriptedStats {
            response: None,
            calls: AtomicUsize::new(0),
        };
        refresh_stats(&backend, &state).await;

        let state = state.lock().await;
        assert_eq!(state.stats, StatsSnapshot::default());
        assert!(state.stats_refreshed_at.is_none());
    }

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(format_amount(4300.5), "4,300.5");
        assert_eq!(format_amount(1_234_567.0), "1,234,567");
        assert_eq!(format_amount(999.99), "999.99");
        assert_eq!(format_amount(25.05), "25.05");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(f64::NAN), "0");
    }
}
