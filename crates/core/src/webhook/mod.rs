//! Webhook subscription module

mod file_store;
mod model;
mod repository;

pub use file_store::FileWebhookStore;
pub use model::*;
pub use repository::WebhookRepository;
