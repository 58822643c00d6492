use crate::backend::Backend;
use crate::errors::BackendError;
use crate::models::{
    ContactField, ContactRequest, DonationField, DonationRequest, FormKind, Page, SubmissionStatus,
};
use crate::stats::refresh_stats;
use crate::store::{Action, Effect, SiteState};
use std::{sync::Arc, time::Duration};
use tokio::{sync::Mutex, task::AbortHandle};
use tracing::{info, warn};

/// Mediates between form/navigation events and the backend. Owns the site
/// state, the two draft buffers inside it, and the pending status revert.
pub struct Controller<B> {
    state: Arc<Mutex<SiteState>>,
    backend: Arc<B>,
    revert_delay: Duration,
    pending_revert: std::sync::Mutex<Option<AbortHandle>>,
}

impl<B: Backend> Controller<B> {
    pub fn new(backend: B, revert_delay: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(SiteState::default())),
            backend: Arc::new(backend),
            revert_delay,
            pending_revert: std::sync::Mutex::new(None),
        }
    }

    pub async fn snapshot(&self) -> SiteState {
        self.state.lock().await.clone()
    }

    pub async fn navigate_to(&self, page: Page) {
        self.dispatch(Action::Navigate(page)).await;
    }

    pub async fn edit_donation(&self, field: DonationField, value: String) {
        self.dispatch(Action::EditDonation(field, value)).await;
    }

    pub async fn edit_contact(&self, field: ContactField, value: String) {
        self.dispatch(Action::EditContact(field, value)).await;
    }

    pub async fn refresh_stats(&self) {
        refresh_stats(self.backend.as_ref(), &self.state).await;
    }

    pub async fn submit_donation(&self) -> SubmissionStatus {
        let payload = {
            let mut state = self.state.lock().await;
            let effects = state.apply(Action::SubmitStarted(FormKind::Donation));
            self.cancel_if_asked(&effects);
            DonationRequest::from(&state.donation)
        };
        let outcome = self.backend.submit_donation(&payload).await;
        self.finish(FormKind::Donation, outcome).await
    }

    pub async fn submit_contact(&self) -> SubmissionStatus {
        let payload = {
            let mut state = self.state.lock().await;
            let effects = state.apply(Action::SubmitStarted(FormKind::Contact));
            self.cancel_if_asked(&effects);
            ContactRequest::from(&state.contact)
        };
        let outcome = self.backend.submit_contact(&payload).await;
        self.finish(FormKind::Contact, outcome).await
    }

    async fn finish(&self, kind: FormKind, outcome: Result<(), BackendError>) -> SubmissionStatus {
        let (status, effects) = {
            let mut state = self.state.lock().await;
            let effects = match outcome {
                Ok(()) => {
                    info!(form = kind.label(), "submission accepted");
                    state.apply(Action::SubmitSucceeded(kind))
                }
                Err(err) => {
                    warn!(form = kind.label(), "error submitting {}: {err}", kind.label());
                    state.apply(Action::SubmitFailed(kind))
                }
            };
            (state.status, effects)
        };

        for effect in effects {
            match effect {
                Effect::CancelRevert => self.shutdown(),
                Effect::ScheduleRevert { generation } => self.schedule_revert(generation),
                Effect::RefreshStats => self.refresh_stats().await,
            }
        }
        status
    }

    async fn dispatch(&self, action: Action) {
        let effects = self.state.lock().await.apply(action);
        self.cancel_if_asked(&effects);
    }

    fn cancel_if_asked(&self, effects: &[Effect]) {
        if effects.contains(&Effect::CancelRevert) {
            self.shutdown();
        }
    }

    fn schedule_revert(&self, generation: u64) {
        let state = Arc::clone(&self.state);
        let delay = self.revert_delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            state
                .lock()
                .await
                .apply(Action::RevertStatus { generation });
        });

        if let Ok(mut slot) = self.pending_revert.lock() {
            if let Some(previous) = slot.replace(task.abort_handle()) {
                previous.abort();
            }
        }
    }
}

impl<B> Controller<B> {
    /// Aborts the pending status revert, if any.
    pub fn shutdown(&self) {
        if let Ok(mut slot) = self.pending_revert.lock() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

impl<B> Drop for Controller<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactDraft, DonationDraft, StatsSnapshot};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    const DELAY: Duration = Duration::from_secs(3);

    #[derive(Default)]
    struct FakeBackend {
        reject_writes: AtomicBool,
        slow_stats: AtomicBool,
        stats_calls: AtomicUsize,
        donations: std::sync::Mutex<Vec<DonationRequest>>,
        contacts: std::sync::Mutex<Vec<ContactRequest>>,
    }

    impl FakeBackend {
        fn rejecting() -> Self {
            let backend = Self::default();
            backend.reject_writes.store(true, Ordering::SeqCst);
            backend
        }

        fn write_outcome(&self) -> Result<(), BackendError> {
            if self.reject_writes.load(Ordering::SeqCst) {
                Err(BackendError::Status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ))
            } else {
                Ok(())
            }
        }
    }

    impl Backend for FakeBackend {
        async fn fetch_stats(&self) -> Result<StatsSnapshot, BackendError> {
            if self.slow_stats.load(Ordering::SeqCst) {
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
            let calls = self.stats_calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(StatsSnapshot {
                total_donations: calls as u64,
                total_amount: 50.0,
                total_contacts: 0,
            })
        }

        async fn submit_donation(&self, donation: &DonationRequest) -> Result<(), BackendError> {
            self.donations.lock().unwrap().push(donation.clone());
            self.write_outcome()
        }

        async fn submit_contact(&self, contact: &ContactRequest) -> Result<(), BackendError> {
            self.contacts.lock().unwrap().push(contact.clone());
            self.write_outcome()
        }
    }

    async fn fill_donation(controller: &Controller<FakeBackend>) {
        controller.edit_donation(DonationField::Amount, "50".into()).await;
        controller.edit_donation(DonationField::DonorName, "Ada".into()).await;
        controller
            .edit_donation(DonationField::DonorEmail, "a@x.com".into())
            .await;
    }

    async fn fill_contact(controller: &Controller<FakeBackend>) {
        controller.edit_contact(ContactField::Name, "Grace".into()).await;
        controller
            .edit_contact(ContactField::Email, "grace@example.org".into())
            .await;
        controller
            .edit_contact(ContactField::Message, "How can I volunteer?".into())
            .await;
    }

    async fn wait_past_delay() {
        tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn donation_success_clears_draft_and_refreshes_once() {
        let controller = Controller::new(FakeBackend::default(), DELAY);
        fill_donation(&controller).await;

        let status = controller.submit_donation().await;
        assert_eq!(status, SubmissionStatus::Success);

        let state = controller.snapshot().await;
        assert_eq!(state.status, SubmissionStatus::Success);
        assert_eq!(state.donation, DonationDraft::default());
        assert_eq!(state.stats.total_donations, 1);
        assert_eq!(controller.backend.stats_calls.load(Ordering::SeqCst), 1);

        let sent = controller.backend.donations.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![DonationRequest {
                amount: 50.0,
                donor_name: "Ada".into(),
                donor_email: "a@x.com".into(),
                message: String::new(),
            }]
        );

        wait_past_delay().await;
        assert_eq!(controller.snapshot().await.status, SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn contact_failure_keeps_draft_and_skips_stats() {
        let controller = Controller::new(FakeBackend::rejecting(), DELAY);
        fill_contact(&controller).await;
        let before = controller.snapshot().await.contact;

        let status = controller.submit_contact().await;
        assert_eq!(status, SubmissionStatus::Error);

        let state = controller.snapshot().await;
        assert_eq!(state.contact, before);
        assert_ne!(state.contact, ContactDraft::default());
        assert_eq!(controller.backend.stats_calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.backend.contacts.lock().unwrap().len(), 1);

        wait_past_delay().await;
        let state = controller.snapshot().await;
        assert_eq!(state.status, SubmissionStatus::Idle);
        assert_eq!(state.contact, before);
    }

    #[tokio::test(start_paused = true)]
    async fn status_holds_until_the_delay_elapses() {
        let controller = Controller::new(FakeBackend::default(), DELAY);
        controller.submit_contact().await;

        tokio::time::sleep(DELAY - Duration::from_millis(10)).await;
        assert_eq!(controller.snapshot().await.status, SubmissionStatus::Success);

        wait_past_delay().await;
        assert_eq!(controller.snapshot().await.status, SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn revert_clock_starts_at_success_not_after_stats() {
        let backend = FakeBackend::default();
        backend.slow_stats.store(true, Ordering::SeqCst);
        let controller = Controller::new(backend, DELAY);

        let submitted_at = tokio::time::Instant::now();
        assert_eq!(controller.submit_contact().await, SubmissionStatus::Success);
        assert_eq!(controller.snapshot().await.stats.total_donations, 1);

        tokio::time::sleep_until(submitted_at + DELAY + Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.snapshot().await.status, SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_failure_resends_the_preserved_draft() {
        let controller = Controller::new(FakeBackend::rejecting(), DELAY);
        fill_donation(&controller).await;
        assert_eq!(controller.submit_donation().await, SubmissionStatus::Error);

        controller.backend.reject_writes.store(false, Ordering::SeqCst);
        assert_eq!(controller.submit_donation().await, SubmissionStatus::Success);

        let sent = controller.backend.donations.lock().unwrap().clone();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], sent[1]);
        assert_eq!(controller.backend.stats_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn a_newer_banner_is_not_reverted_by_the_older_timer() {
        let controller = Controller::new(FakeBackend::default(), DELAY);
        controller.submit_contact().await;

        tokio::time::sleep(Duration::from_secs(2)).await;
        controller.backend.reject_writes.store(true, Ordering::SeqCst);
        assert_eq!(controller.submit_contact().await, SubmissionStatus::Error);

        // The first timer would have fired here.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert_eq!(controller.snapshot().await.status, SubmissionStatus::Error);

        wait_past_delay().await;
        assert_eq!(controller.snapshot().await.status, SubmissionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_the_pending_revert() {
        let controller = Controller::new(FakeBackend::default(), DELAY);
        controller.submit_contact().await;
        controller.shutdown();

        wait_past_delay().await;
        assert_eq!(controller.snapshot().await.status, SubmissionStatus::Success);
    }

    #[tokio::test]
    async fn navigation_and_stats_refresh() {
        let controller = Controller::new(FakeBackend::default(), DELAY);
        controller.navigate_to(Page::Donate).await;
        controller.refresh_stats().await;

        let state = controller.snapshot().await;
        assert_eq!(state.page, Page::Donate);
        assert_eq!(state.stats.total_donations, 1);
        assert_eq!(state.status, SubmissionStatus::Idle);
    }
}
