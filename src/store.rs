use crate::models::{
    ContactDraft, ContactField, DonationDraft, DonationField, FormKind, Page, StatsSnapshot,
    SubmissionStatus,
};
use chrono::{DateTime, Local};
use serde::Serialize;

/// Everything the site renders. Mutated only through [`SiteState::apply`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteState {
    pub page: Page,
    pub donation: DonationDraft,
    pub contact: ContactDraft,
    pub status: SubmissionStatus,
    pub stats: StatsSnapshot,
    #[serde(skip)]
    pub stats_refreshed_at: Option<DateTime<Local>>,
    #[serde(skip)]
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Page),
    EditDonation(DonationField, String),
    EditContact(ContactField, String),
    SubmitStarted(FormKind),
    SubmitSucceeded(FormKind),
    SubmitFailed(FormKind),
    RevertStatus { generation: u64 },
    StatsLoaded(StatsSnapshot),
}

/// Work the caller must carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    CancelRevert,
    ScheduleRevert { generation: u64 },
    RefreshStats,
}

impl SiteState {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Navigate(page) => {
                self.page = page;
                Vec::new()
            }
            Action::EditDonation(field, value) => {
                self.donation.set(field, value);
                Vec::new()
            }
            Action::EditContact(field, value) => {
                self.contact.set(field, value);
                Vec::new()
            }
            Action::SubmitStarted(_) => {
                // Starting over a success/error banner retires its pending revert.
                let banner_visible = self.status.is_terminal();
                self.generation += 1;
                self.status = SubmissionStatus::Submitting;
                if banner_visible {
                    vec![Effect::CancelRevert]
                } else {
                    Vec::new()
                }
            }
            Action::SubmitSucceeded(kind) => {
                match kind {
                    FormKind::Donation => self.donation = DonationDraft::default(),
                    FormKind::Contact => self.contact = ContactDraft::default(),
                }
                let generation = self.finish(SubmissionStatus::Success);
                // The revert clock starts at the transition, not after the refresh.
                vec![Effect::ScheduleRevert { generation }, Effect::RefreshStats]
            }
            Action::SubmitFailed(_) => {
                let generation = self.finish(SubmissionStatus::Error);
                vec![Effect::ScheduleRevert { generation }]
            }
            Action::RevertStatus { generation } => {
                if generation == self.generation && self.status.is_terminal() {
                    self.status = SubmissionStatus::Idle;
                }
                Vec::new()
            }
            Action::StatsLoaded(snapshot) => {
                self.stats = snapshot;
                self.stats_refreshed_at = Some(Local::now());
                Vec::new()
            }
        }
    }

    fn finish(&mut self, status: SubmissionStatus) -> u64 {
        self.generation += 1;
        self.status = status;
        self.generation
    }
}
