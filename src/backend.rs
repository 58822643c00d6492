use crate::errors::BackendError;
use crate::models::{ContactRequest, DonationRequest, StatsSnapshot};
use reqwest::{Client, Response};
use std::{future::Future, time::Duration};

/// The external service that stores donations and contacts and computes
/// aggregate statistics.
pub trait Backend: Send + Sync + 'static {
    fn fetch_stats(&self) -> impl Future<Output = Result<StatsSnapshot, BackendError>> + Send;

    fn submit_donation(
        &self,
        donation: &DonationRequest,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn submit_contact(
        &self,
        contact: &ContactRequest,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Backend for HttpBackend {
    async fn fetch_stats(&self) -> Result<StatsSnapshot, BackendError> {
        let response = self.client.get(self.url("/api/stats")).send().await?;
        let response = ensure_success(response)?;
        Ok(response.json().await?)
    }

    async fn submit_donation(&self, donation: &DonationRequest) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/api/donations"))
            .json(donation)
            .send()
            .await?;
        ensure_success(response).map(drop)
    }

    async fn submit_contact(&self, contact: &ContactRequest) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url("/api/contacts"))
            .json(contact)
            .send()
            .await?;
        ensure_success(response).map(drop)
    }
}

// Any 2xx counts; the body of a write response is never read.
fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BackendError::Status(status))
    }
}
