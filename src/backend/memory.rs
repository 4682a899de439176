use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    backend::{AnnouncementApi, FeedbackApi},
    domain::*,
    error::{AppError, Result},
};

/// Backend held in process memory. Lists come back in insertion order.
#[derive(Default)]
pub struct InMemoryBackend {
    feedback: RwLock<Vec<Feedback>>,
    announcements: RwLock<Vec<Announcement>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_announcements(announcements: Vec<Announcement>) -> Self {
        Self {
            feedback: RwLock::new(Vec::new()),
            announcements: RwLock::new(announcements),
        }
    }

    pub async fn insert_feedback(&self, feedback: Feedback) {
        self.feedback.write().await.push(feedback);
    }

    pub async fn find_feedback(&self, id: &str) -> Option<Feedback> {
        self.feedback.read().await.iter().find(|f| f.id == id).cloned()
    }
}

#[async_trait]
impl FeedbackApi for InMemoryBackend {
    async fn create(&self, submitter: &UserRef, request: &CreateFeedbackRequest) -> Result<Feedback> {
        let feedback = Feedback {
            id: Uuid::new_v4().to_string(),
            feedback_type: request.feedback_type,
            title: request.title.clone(),
            content: request.content.clone(),
            status: FeedbackStatus::Pending,
            resolution: None,
            reviewed_at: None,
            demo_id: request.demo_id.clone(),
            demo_title: request.demo_title.clone(),
            community_id: request.community_id.clone(),
            community_name: request.community_name.clone(),
            submitted_by: submitter.id.clone(),
            submitted_by_username: submitter.username.clone(),
            created_at: Utc::now(),
        };

        self.feedback.write().await.push(feedback.clone());
        Ok(feedback)
    }

    async fn list(&self) -> Result<Vec<Feedback>> {
        Ok(self.feedback.read().await.clone())
    }

    async fn list_by_submitter(&self, user_id: &str) -> Result<Vec<Feedback>> {
        Ok(self
            .feedback
            .read()
            .await
            .iter()
            .filter(|f| f.submitted_by == user_id)
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: &str, status: FeedbackStatus, resolution: Option<&str>) -> Result<Feedback> {
        let mut feedback = self.feedback.write().await;
        let record = feedback
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::NotFound("Feedback not found".to_string()))?;

        // Last write wins
        record.status = status;
        if let Some(resolution) = resolution {
            record.resolution = Some(resolution.to_string());
            record.reviewed_at = Some(Utc::now());
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut feedback = self.feedback.write().await;
        let before = feedback.len();
        feedback.retain(|f| f.id != id);
        if feedback.len() == before {
            return Err(AppError::NotFound("Feedback not found".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AnnouncementApi for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Announcement>> {
        Ok(self.announcements.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Announcement>> {
        Ok(self
            .announcements
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, author: &UserRef, request: &CreateAnnouncementRequest) -> Result<Announcement> {
        let announcement = Announcement {
            id: Uuid::new_v4().to_string(),
            announcement_type: request.announcement_type,
            community_id: request.community_id.clone(),
            community_name: request.community_name.clone(),
            title: request.title.clone(),
            content: request.content.clone(),
            is_active: request.is_active,
            created_at: Utc::now(),
            expires_at: request.expires_at,
            created_by: author.id.clone(),
            created_by_username: author.username.clone(),
        };

        self.announcements.write().await.push(announcement.clone());
        Ok(announcement)
    }

    async fn update(&self, announcement: &Announcement) -> Result<Announcement> {
        let mut announcements = self.announcements.write().await;
        let record = announcements
            .iter_mut()
            .find(|a| a.id == announcement.id)
            .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))?;

        *record = announcement.clone();
        Ok(record.clone())
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<()> {
        let mut announcements = self.announcements.write().await;
        let record = announcements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))?;

        record.is_active = is_active;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut announcements = self.announcements.write().await;
        let before = announcements.len();
        announcements.retain(|a| a.id != id);
        if announcements.len() == before {
            return Err(AppError::NotFound("Announcement not found".to_string()));
        }
        Ok(())
    }
}
