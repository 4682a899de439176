use std::sync::Arc;

use chrono::Utc;

use crate::{
    backend::FeedbackApi,
    domain::*,
    error::{AppError, Result},
};

pub struct FeedbackService {
    api: Arc<dyn FeedbackApi>,
    limits: FeedbackLimits,
}

impl FeedbackService {
    pub fn new(api: Arc<dyn FeedbackApi>, limits: FeedbackLimits) -> Self {
        Self { api, limits }
    }

    /// Validate and submit new feedback. Nothing is sent if validation fails.
    pub async fn submit(&self, submitter: &UserRef, request: CreateFeedbackRequest) -> Result<Feedback> {
        let request = request.validate(&self.limits).map_err(|e| {
            tracing::debug!("Rejected feedback from {}: {}", submitter.username, e);
            e
        })?;

        let feedback = self.api.create(submitter, &request).await?;
        tracing::info!(
            "Feedback {} ({}) submitted by {}",
            feedback.id,
            feedback.feedback_type.as_str(),
            submitter.username
        );
        Ok(feedback)
    }

    pub async fn list_mine(&self, submitter: &UserRef) -> Result<Vec<Feedback>> {
        self.api.list_by_submitter(&submitter.id).await
    }

    pub async fn list_all(&self, actor: &Actor) -> Result<Vec<Feedback>> {
        require_admin(actor)?;
        self.api.list().await
    }

    /// Move feedback to `target` and return the record the backend stored.
    ///
    /// The transition is checked locally before the backend is called. The
    /// backend stamps `reviewed_at`, so its copy is the one handed back.
    pub async fn update_status(
        &self,
        actor: &Actor,
        feedback: &Feedback,
        target: FeedbackStatus,
        resolution: Option<&str>,
    ) -> Result<Feedback> {
        require_admin(actor)?;

        let updated = feedback.transition(target, resolution, Utc::now()).map_err(|e| {
            tracing::warn!("Feedback {}: {}", feedback.id, e);
            e
        })?;

        let resolution = if target.is_terminal() {
            updated.resolution.as_deref()
        } else {
            None
        };
        let stored = self.api.update_status(&feedback.id, target, resolution).await?;

        tracing::info!(
            "Feedback {} moved {} -> {} by {}",
            feedback.id,
            feedback.status,
            target,
            actor.user().username
        );
        Ok(stored)
    }

    /// Submitters may withdraw their own feedback while it is still pending.
    /// Admins have no delete path.
    pub async fn delete(&self, actor: &Actor, feedback: &Feedback) -> Result<()> {
        let user = match actor {
            Actor::Admin(_) => {
                return Err(AppError::Forbidden("Admins cannot delete feedback".to_string()));
            }
            Actor::Submitter(user) => user,
        };

        if !feedback.is_submitted_by(&user.id) {
            return Err(AppError::Forbidden("Cannot delete someone else's feedback".to_string()));
        }
        if feedback.status != FeedbackStatus::Pending {
            return Err(AppError::Forbidden(
                "Feedback that is under review cannot be deleted".to_string(),
            ));
        }

        self.api.delete(&feedback.id).await?;
        tracing::info!("Feedback {} deleted by {}", feedback.id, user.username);
        Ok(())
    }
}

fn require_admin(actor: &Actor) -> Result<()> {
    if !actor.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }
    Ok(())
}
