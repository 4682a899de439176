use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    backend::AnnouncementApi,
    domain::*,
    error::{AppError, Result},
};

pub struct AnnouncementService {
    api: Arc<dyn AnnouncementApi>,
}

impl AnnouncementService {
    pub fn new(api: Arc<dyn AnnouncementApi>) -> Self {
        Self { api }
    }

    /// Announcements shown on the viewer's management screen
    pub async fn list_manageable(&self, viewer: &Viewer) -> Result<Vec<Announcement>> {
        let all = self.api.list().await?;
        let total = all.len();
        let manageable = filter_announcements(all, viewer);
        tracing::debug!(
            "{} of {} announcements manageable by {}",
            manageable.len(),
            total,
            viewer.user.username
        );
        Ok(manageable)
    }

    /// Announcements shown to a regular member
    pub async fn list_for_member(
        &self,
        community_ids: &HashSet<String>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Announcement>> {
        let all = self.api.list().await?;
        Ok(visible_to_member(all, community_ids, now))
    }

    pub async fn create(
        &self,
        viewer: &Viewer,
        request: CreateAnnouncementRequest,
    ) -> Result<Announcement> {
        request.validate()?;

        if !viewer.is_global_admin {
            let allowed = match (request.announcement_type, &request.community_id) {
                (AnnouncementType::Community, Some(id)) => viewer.is_member_of(id),
                _ => false,
            };
            if !allowed {
                tracing::warn!(
                    "{} tried to create a {} announcement outside their communities",
                    viewer.user.username,
                    request.announcement_type.as_str()
                );
                return Err(AppError::Forbidden(
                    "Cannot create announcements for this scope".to_string(),
                ));
            }
        }

        let created = self.api.create(&viewer.user, &request).await?;
        tracing::info!("Announcement {} created by {}", created.id, viewer.user.username);
        Ok(created)
    }

    pub async fn update(
        &self,
        viewer: &Viewer,
        id: &str,
        request: UpdateAnnouncementRequest,
    ) -> Result<Announcement> {
        let mut announcement = self.find_manageable(viewer, id).await?;
        request.apply(&mut announcement)?;

        let updated = self.api.update(&announcement).await?;
        tracing::info!("Announcement {} updated by {}", id, viewer.user.username);
        Ok(updated)
    }

    /// Show or hide an announcement on end-user surfaces.
    pub async fn set_active(&self, viewer: &Viewer, id: &str, is_active: bool) -> Result<Announcement> {
        let mut announcement = self.find_manageable(viewer, id).await?;
        if announcement.is_active == is_active {
            return Ok(announcement);
        }

        self.api.set_active(id, is_active).await?;
        announcement.is_active = is_active;
        tracing::info!(
            "Announcement {} {} by {}",
            id,
            if is_active { "activated" } else { "deactivated" },
            viewer.user.username
        );
        Ok(announcement)
    }

    pub async fn delete(&self, viewer: &Viewer, id: &str) -> Result<()> {
        self.find_manageable(viewer, id).await?;
        self.api.delete(id).await?;
        tracing::info!("Announcement {} deleted by {}", id, viewer.user.username);
        Ok(())
    }

    async fn find_manageable(&self, viewer: &Viewer, id: &str) -> Result<Announcement> {
        let announcement = self
            .api
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))?;

        if !can_manage(viewer, &announcement) {
            tracing::warn!("{} may not manage announcement {}", viewer.user.username, id);
            return Err(AppError::Forbidden("Cannot manage this announcement".to_string()));
        }
        Ok(announcement)
    }
}
