use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonationDraft {
    pub amount: String,
    pub donor_name: String,
    pub donor_email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationField {
    Amount,
    DonorName,
    DonorEmail,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl DonationDraft {
    pub fn set(&mut self, field: DonationField, value: String) {
        match field {
            DonationField::Amount => self.amount = value,
            DonationField::DonorName => self.donor_name = value,
            DonationField::DonorEmail => self.donor_email = value,
            DonationField::Message => self.message = value,
        }
    }
}

impl ContactDraft {
    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }
}

/// Lifecycle of the most recent form submission, shared by both forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Donation,
    Contact,
}

impl FormKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Donation => "donation",
            Self::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_donations: u64,
    pub total_amount: f64,
    pub total_contacts: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    About,
    Donate,
    Stories,
    Contact,
}

impl Page {
    pub const ALL: [Page; 5] = [Page::Home, Page::About, Page::Donate, Page::Stories, Page::Contact];

    /// Unknown selectors land on the home page.
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "about" => Self::About,
            "donate" => Self::Donate,
            "stories" => Self::Stories,
            "contact" => Self::Contact,
            _ => Self::Home,
        }
    }

    pub fn selector(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Donate => "donate",
            Self::Stories => "stories",
            Self::Contact => "contact",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Donate => "Donate",
            Self::Stories => "Stories",
            Self::Contact => "Contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationRequest {
    pub amount: f64,
    pub donor_name: String,
    pub donor_email: String,
    pub message: String,
}

impl From<&DonationDraft> for DonationRequest {
    fn from(draft: &DonationDraft) -> Self {
        Self {
            amount: parse_amount(&draft.amount),
            donor_name: draft.donor_name.clone(),
            donor_email: draft.donor_email.clone(),
            message: draft.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl From<&ContactDraft> for ContactRequest {
    fn from(draft: &ContactDraft) -> Self {
        Self {
            name: draft.name.clone(),
            email: draft.email.clone(),
            message: draft.message.clone(),
        }
    }
}

/// One keystroke-level edit of a draft field.
#[derive(Debug, Clone, Deserialize)]
pub struct DraftEdit<F> {
    pub field: F,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub status: SubmissionStatus,
}

/// Reads the longest leading decimal number, so `"50abc"` is `50`. Input with
/// no numeric prefix (including words like `"inf"`) becomes NaN, which
/// serializes as `null` and is left to the backend to reject.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let numeric_len = trimmed
        .find(|ch: char| !(ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(trimmed.len());
    let candidate = &trimmed[..numeric_len];

    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
