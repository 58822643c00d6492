use crate::backend::HttpBackend;
use crate::controller::Controller;
use std::{sync::Arc, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller<HttpBackend>>,
    pub status_reset_delay: Duration,
}

impl AppState {
    pub fn new(backend: HttpBackend, status_reset_delay: Duration) -> Self {
        Self {
            controller: Arc::new(Controller::new(backend, status_reset_delay)),
            status_reset_delay,
        }
    }
}
