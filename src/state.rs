use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkStore;

/// Shared state handed to every handler.
///
/// The store behind the service is chosen at startup (`STORE_BACKEND`), so
/// handlers only ever see `dyn LinkStore`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkStore>>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService<dyn LinkStore>>) -> Self {
        Self { link_service }
    }
}
