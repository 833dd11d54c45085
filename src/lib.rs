pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod store;

use std::sync::Arc;

use store::PatientStore;

pub use config::Config;
pub use router::router;

/// State shared by every handler: the storage backend behind a trait
/// object, so tests can swap the file store for an in-memory one.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PatientStore>,
}
