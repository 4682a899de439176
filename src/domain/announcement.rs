use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Viewer;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    #[serde(rename = "type")]
    pub announcement_type: AnnouncementType,
    #[serde(default)]
    pub community_id: Option<String>,
    #[serde(default)]
    pub community_name: Option<String>,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_by_username: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementType {
    General,
    Community,
}

impl AnnouncementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementType::General => "general",
            AnnouncementType::Community => "community",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "general" => Some(AnnouncementType::General),
            "community" => Some(AnnouncementType::Community),
            _ => None,
        }
    }
}

impl Announcement {
    /// Community that owns this announcement, if it is well formed.
    ///
    /// A `community` announcement without a community id is orphaned and
    /// yields `None`, as does every `general` announcement.
    pub fn owning_community(&self) -> Option<&str> {
        match self.announcement_type {
            AnnouncementType::Community => self.community_id.as_deref(),
            AnnouncementType::General => None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires < now)
    }

    /// Whether end users should see it right now.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }
}

/// Whether `viewer` may edit, delete or toggle `announcement`.
pub fn can_manage(viewer: &Viewer, announcement: &Announcement) -> bool {
    if viewer.is_global_admin {
        return true;
    }
    announcement
        .owning_community()
        .is_some_and(|community_id| viewer.is_member_of(community_id))
}

/// Announcements the viewer may manage, in input order.
///
/// Global admins get the list back untouched. Everyone else only sees
/// community announcements for communities they belong to; platform-wide
/// announcements are never included, not even ones they wrote.
pub fn filter_announcements(all: Vec<Announcement>, viewer: &Viewer) -> Vec<Announcement> {
    if viewer.is_global_admin {
        return all;
    }
    all.into_iter()
        .filter(|announcement| can_manage(viewer, announcement))
        .collect()
}

/// End-user feed: live announcements that are platform-wide or belong to
/// one of the member's communities.
pub fn visible_to_member(
    all: Vec<Announcement>,
    community_ids: &HashSet<String>,
    now: DateTime<Utc>,
) -> Vec<Announcement> {
    all.into_iter()
        .filter(|a| a.is_live(now))
        .filter(|a| match a.announcement_type {
            AnnouncementType::General => true,
            AnnouncementType::Community => a
                .community_id
                .as_ref()
                .is_some_and(|id| community_ids.contains(id)),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[serde(rename = "type")]
    pub announcement_type: AnnouncementType,
    pub community_id: Option<String>,
    pub community_name: Option<String>,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateAnnouncementRequest {
    pub fn general(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            announcement_type: AnnouncementType::General,
            community_id: None,
            community_name: None,
            title: title.into(),
            content: content.into(),
            is_active: true,
            expires_at: None,
        }
    }

    pub fn community(
        community_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            announcement_type: AnnouncementType::Community,
            community_id: Some(community_id.into()),
            ..Self::general(title, content)
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("Title", &self.title)?;
        require_text("Content", &self.content)?;

        match (self.announcement_type, &self.community_id) {
            (AnnouncementType::Community, None) => Err(AppError::Validation(
                "Community announcements must name a community".to_string(),
            )),
            (AnnouncementType::Community, Some(id)) if id.trim().is_empty() => Err(
                AppError::Validation("Community announcements must name a community".to_string()),
            ),
            (AnnouncementType::General, Some(_)) => Err(AppError::Validation(
                "General announcements cannot belong to a community".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Editable fields. The scope of an announcement is fixed at creation.
#[derive(Debug, Clone, Default)]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl UpdateAnnouncementRequest {
    pub fn apply(self, announcement: &mut Announcement) -> Result<()> {
        if let Some(title) = self.title {
            require_text("Title", &title)?;
            announcement.title = title;
        }
        if let Some(content) = self.content {
            require_text("Content", &content)?;
            announcement.content = content;
        }
        if let Some(expires_at) = self.expires_at {
            announcement.expires_at = expires_at;
        }
        Ok(())
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRef;
    use chrono::{Duration, TimeZone};

    fn announcement(id: &str, announcement_type: AnnouncementType, community: Option<&str>) -> Announcement {
        Announcement {
            id: id.to_string(),
            announcement_type,
            community_id: community.map(str::to_string),
            community_name: None,
            title: format!("Title {}", id),
            content: "Body".to_string(),
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            expires_at: None,
            created_by: "u1".to_string(),
            created_by_username: "alice".to_string(),
        }
    }

    fn sample() -> Vec<Announcement> {
        vec![
            announcement("a1", AnnouncementType::General, None),
            announcement("a2", AnnouncementType::Community, Some("c1")),
            announcement("a3", AnnouncementType::Community, Some("c2")),
            announcement("a4", AnnouncementType::Community, None),
            announcement("a5", AnnouncementType::Community, Some("c1")),
        ]
    }

    fn ids(list: &[Announcement]) -> Vec<&str> {
        list.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_global_admin_sees_everything_in_order() {
        let viewer = Viewer::global_admin(UserRef::new("u1", "alice"));
        let filtered = filter_announcements(sample(), &viewer);
        assert_eq!(filtered, sample());
    }

    #[test]
    fn test_community_manager_sees_only_member_communities() {
        let viewer = Viewer::community_manager(UserRef::new("u1", "alice"), ["c1"]);
        let filtered = filter_announcements(sample(), &viewer);
        assert_eq!(ids(&filtered), vec!["a2", "a5"]);
        assert!(filtered
            .iter()
            .all(|a| a.announcement_type == AnnouncementType::Community));
    }

    #[test]
    fn test_own_general_announcement_is_not_manageable() {
        // a1 was written by u1, but general announcements need a global admin
        let viewer = Viewer::community_manager(UserRef::new("u1", "alice"), ["c1", "c2"]);
        let filtered = filter_announcements(sample(), &viewer);
        assert_eq!(ids(&filtered), vec!["a2", "a3", "a5"]);
    }

    #[test]
    fn test_non_member_community_is_filtered_out() {
        let viewer = Viewer::community_manager(UserRef::new("u2", "bob"), ["c2"]);
        let list = vec![announcement("x", AnnouncementType::Community, Some("c1"))];
        assert!(filter_announcements(list, &viewer).is_empty());
    }

    #[test]
    fn test_orphaned_community_announcement_is_excluded() {
        let viewer = Viewer::community_manager(UserRef::new("u2", "bob"), ["c1"]);
        let orphan = announcement("a4", AnnouncementType::Community, None);
        assert!(!can_manage(&viewer, &orphan));
        assert!(filter_announcements(vec![orphan], &viewer).is_empty());
    }

    #[test]
    fn test_no_memberships_sees_nothing() {
        let viewer = Viewer::community_manager(UserRef::new("u2", "bob"), Vec::<String>::new());
        assert!(filter_announcements(sample(), &viewer).is_empty());
    }

    #[test]
    fn test_visible_to_member_hides_inactive_and_expired() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let mut list = sample();
        list[0].is_active = false;
        list[1].expires_at = Some(now - Duration::hours(1));
        list[4].expires_at = Some(now + Duration::hours(1));

        let member_of: HashSet<String> = ["c1".to_string()].into_iter().collect();
        let visible = visible_to_member(list, &member_of, now);
        assert_eq!(ids(&visible), vec!["a5"]);
    }

    #[test]
    fn test_visible_to_member_includes_general() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let visible = visible_to_member(sample(), &HashSet::new(), now);
        assert_eq!(ids(&visible), vec!["a1"]);
    }

    #[test]
    fn test_create_request_enforces_scope_invariant() {
        assert!(CreateAnnouncementRequest::general("Hi", "There").validate().is_ok());
        assert!(CreateAnnouncementRequest::community("c1", "Hi", "There").validate().is_ok());

        let mut orphan = CreateAnnouncementRequest::general("Hi", "There");
        orphan.announcement_type = AnnouncementType::Community;
        assert!(matches!(orphan.validate(), Err(AppError::Validation(_))));

        let mut scoped_general = CreateAnnouncementRequest::general("Hi", "There");
        scoped_general.community_id = Some("c1".to_string());
        assert!(matches!(scoped_general.validate(), Err(AppError::Validation(_))));

        let blank = CreateAnnouncementRequest::general("   ", "There");
        assert!(matches!(blank.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": "a9",
            "type": "community",
            "communityId": "c1",
            "title": "Meetup",
            "content": "Friday",
            "isActive": true,
            "createdAt": 1709294400000,
            "createdBy": "u1",
            "createdByUsername": "alice"
        }"#;
        let parsed: Announcement = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.announcement_type, AnnouncementType::Community);
        assert_eq!(parsed.owning_community(), Some("c1"));
        assert_eq!(parsed.created_at.timestamp_millis(), 1709294400000);
        assert!(parsed.expires_at.is_none());
    }
}
