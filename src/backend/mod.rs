use async_trait::async_trait;
use crate::domain::*;
use crate::error::Result;

pub mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::InMemoryBackend;

/// Feedback endpoints of the platform backend.
///
/// The backend identifies the caller from its own session, so `submitter`
/// is informational for remote implementations.
#[async_trait]
pub trait FeedbackApi: Send + Sync {
    async fn create(&self, submitter: &UserRef, request: &CreateFeedbackRequest) -> Result<Feedback>;
    async fn list(&self) -> Result<Vec<Feedback>>;
    async fn list_by_submitter(&self, user_id: &str) -> Result<Vec<Feedback>>;
    /// Returns the record as the backend stored it.
    async fn update_status(&self, id: &str, status: FeedbackStatus, resolution: Option<&str>) -> Result<Feedback>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait AnnouncementApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Announcement>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Announcement>>;
    async fn create(&self, author: &UserRef, request: &CreateAnnouncementRequest) -> Result<Announcement>;
    async fn update(&self, announcement: &Announcement) -> Result<Announcement>;
    async fn set_active(&self, id: &str, is_active: bool) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
}
