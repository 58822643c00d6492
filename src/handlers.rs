use crate::errors::AppError;
use crate::models::{
    ContactDraft, ContactField, DonationDraft, DonationField, DraftEdit, Page, StatsSnapshot,
    SubmitResponse,
};
use crate::state::AppState;
use crate::store::SiteState;
use crate::ui::{render_page, QUICK_AMOUNTS};
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

/// Full set of fields a browser posts with the donation form.
#[derive(Debug, Deserialize)]
pub struct DonationForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub donor_name: String,
    #[serde(default)]
    pub donor_email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let site = state.controller.snapshot().await;
    let refresh_secs = state.status_reset_delay.as_secs_f64().ceil() as u64;
    Html(render_page(&site, refresh_secs))
}

pub async fn navigate(State(state): State<AppState>, Path(page): Path<String>) -> Redirect {
    state.controller.navigate_to(Page::from_selector(&page)).await;
    Redirect::to("/")
}

pub async fn donate(State(state): State<AppState>, Form(form): Form<DonationForm>) -> Redirect {
    apply_donation_form(&state, form).await;
    state.controller.submit_donation().await;
    Redirect::to("/")
}

pub async fn donate_preset(
    State(state): State<AppState>,
    Path(preset): Path<u32>,
    Form(form): Form<DonationForm>,
) -> Result<Redirect, AppError> {
    if !QUICK_AMOUNTS.contains(&preset) {
        return Err(AppError::bad_request("amount must be one of the preset values"));
    }

    apply_donation_form(&state, form).await;
    state
        .controller
        .edit_donation(DonationField::Amount, preset.to_string())
        .await;
    Ok(Redirect::to("/"))
}

pub async fn contact(State(state): State<AppState>, Form(form): Form<ContactForm>) -> Redirect {
    let controller = &state.controller;
    controller.edit_contact(ContactField::Name, form.name).await;
    controller.edit_contact(ContactField::Email, form.email).await;
    controller.edit_contact(ContactField::Message, form.message).await;
    controller.submit_contact().await;
    Redirect::to("/")
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn get_state(State(state): State<AppState>) -> Json<SiteState> {
    Json(state.controller.snapshot().await)
}

pub async fn edit_donation(
    State(state): State<AppState>,
    Json(edit): Json<DraftEdit<DonationField>>,
) -> Json<DonationDraft> {
    state.controller.edit_donation(edit.field, edit.value).await;
    Json(state.controller.snapshot().await.donation)
}

pub async fn edit_contact(
    State(state): State<AppState>,
    Json(edit): Json<DraftEdit<ContactField>>,
) -> Json<ContactDraft> {
    state.controller.edit_contact(edit.field, edit.value).await;
    Json(state.controller.snapshot().await.contact)
}

pub async fn submit_donation(State(state): State<AppState>) -> Json<SubmitResponse> {
    let status = state.controller.submit_donation().await;
    Json(SubmitResponse { status })
}

pub async fn submit_contact(State(state): State<AppState>) -> Json<SubmitResponse> {
    let status = state.controller.submit_contact().await;
    Json(SubmitResponse { status })
}

pub async fn refresh_stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    state.controller.refresh_stats().await;
    Json(state.controller.snapshot().await.stats)
}

async fn apply_donation_form(state: &AppState, form: DonationForm) {
    let controller = &state.controller;
    controller.edit_donation(DonationField::Amount, form.amount).await;
    controller.edit_donation(DonationField::DonorName, form.donor_name).await;
    controller.edit_donation(DonationField::DonorEmail, form.donor_email).await;
    controller.edit_donation(DonationField::Message, form.message).await;
}
