use std::sync::Arc;

use crate::config::Config;
use crate::notify::ProfileNotifier;
use crate::parser::ResumeParser;
use crate::store::{ProfileStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
/// Stores and external services sit behind trait objects so tests can swap in
/// in-memory and stub implementations.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub parser: Arc<dyn ResumeParser>,
    pub notifier: Arc<dyn ProfileNotifier>,
    pub config: Config,
}
