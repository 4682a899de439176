use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use demohub::{
    backend::{AnnouncementApi, InMemoryBackend},
    domain::{
        Announcement, AnnouncementType, CreateAnnouncementRequest, UpdateAnnouncementRequest,
        UserRef, Viewer,
    },
    error::AppError,
    service::announcement_service::AnnouncementService,
};

fn announcement(id: &str, announcement_type: AnnouncementType, community: Option<&str>) -> Announcement {
    Announcement {
        id: id.to_string(),
        announcement_type,
        community_id: community.map(str::to_string),
        community_name: None,
        title: format!("Announcement {}", id),
        content: "Details".to_string(),
        is_active: true,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        expires_at: None,
        created_by: "u1".to_string(),
        created_by_username: "alice".to_string(),
    }
}

fn seeded() -> (Arc<InMemoryBackend>, AnnouncementService) {
    let backend = Arc::new(InMemoryBackend::with_announcements(vec![
        announcement("g1", AnnouncementType::General, None),
        announcement("c1-a", AnnouncementType::Community, Some("c1")),
        announcement("c2-a", AnnouncementType::Community, Some("c2")),
        announcement("orphan", AnnouncementType::Community, None),
    ]));
    let service = AnnouncementService::new(backend.clone());
    (backend, service)
}

fn manager_of(communities: &[&str]) -> Viewer {
    Viewer::community_manager(UserRef::new("u1", "alice"), communities.iter().copied())
}

fn ids(list: &[Announcement]) -> Vec<&str> {
    list.iter().map(|a| a.id.as_str()).collect()
}

#[tokio::test]
async fn test_list_manageable() -> anyhow::Result<()> {
    let (_, service) = seeded();

    let admin = Viewer::global_admin(UserRef::new("root", "root"));
    let all = service.list_manageable(&admin).await?;
    assert_eq!(ids(&all), vec!["g1", "c1-a", "c2-a", "orphan"]);

    let scoped = service.list_manageable(&manager_of(&["c2"])).await?;
    assert_eq!(ids(&scoped), vec!["c2-a"]);
    Ok(())
}

#[tokio::test]
async fn test_list_for_member() -> anyhow::Result<()> {
    let now = Utc::now();
    let mut expired = announcement("c1-old", AnnouncementType::Community, Some("c1"));
    expired.expires_at = Some(now - Duration::days(1));
    let mut inactive = announcement("g2", AnnouncementType::General, None);
    inactive.is_active = false;

    let backend = Arc::new(InMemoryBackend::with_announcements(vec![
        announcement("g1", AnnouncementType::General, None),
        expired,
        announcement("c1-a", AnnouncementType::Community, Some("c1")),
        inactive,
        announcement("c2-a", AnnouncementType::Community, Some("c2")),
    ]));
    let service = AnnouncementService::new(backend);

    let member_of: HashSet<String> = ["c1".to_string()].into_iter().collect();
    let visible = service.list_for_member(&member_of, now).await?;
    assert_eq!(ids(&visible), vec!["g1", "c1-a"]);
    Ok(())
}

#[tokio::test]
async fn test_community_manager_creates_in_own_community_only() -> anyhow::Result<()> {
    let (_, service) = seeded();
    let viewer = manager_of(&["c1"]);

    let created = service
        .create(&viewer, CreateAnnouncementRequest::community("c1", "Meetup", "Saturday"))
        .await?;
    assert_eq!(created.owning_community(), Some("c1"));
    assert_eq!(created.created_by_username, "alice");

    let err = service
        .create(&viewer, CreateAnnouncementRequest::community("c2", "Meetup", "Saturday"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = service
        .create(&viewer, CreateAnnouncementRequest::general("Maintenance", "Tonight"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let admin = Viewer::global_admin(UserRef::new("root", "root"));
    let general = service
        .create(&admin, CreateAnnouncementRequest::general("Maintenance", "Tonight"))
        .await?;
    assert_eq!(general.announcement_type, AnnouncementType::General);
    Ok(())
}

#[tokio::test]
async fn test_update_and_toggle_require_permission() -> anyhow::Result<()> {
    let (backend, service) = seeded();
    let viewer = manager_of(&["c1"]);

    let updated = service
        .update(
            &viewer,
            "c1-a",
            UpdateAnnouncementRequest {
                title: Some("Rescheduled".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.title, "Rescheduled");

    let err = service
        .update(&viewer, "g1", UpdateAnnouncementRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let hidden = service.set_active(&viewer, "c1-a", false).await?;
    assert!(!hidden.is_active);
    let stored = backend.find_by_id("c1-a").await?.expect("stored");
    assert!(!stored.is_active);
    assert_eq!(stored.title, "Rescheduled");

    let err = service.set_active(&viewer, "orphan", false).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    Ok(())
}

#[tokio::test]
async fn test_blank_title_update_is_rejected() -> anyhow::Result<()> {
    let (backend, service) = seeded();
    let viewer = manager_of(&["c1"]);

    let err = service
        .update(
            &viewer,
            "c1-a",
            UpdateAnnouncementRequest {
                title: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = backend.find_by_id("c1-a").await?.expect("stored");
    assert_eq!(stored.title, "Announcement c1-a");
    Ok(())
}

#[tokio::test]
async fn test_delete() -> anyhow::Result<()> {
    let (backend, service) = seeded();

    let err = service.delete(&manager_of(&["c1"]), "c2-a").await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = service.delete(&manager_of(&["c1"]), "missing").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    service.delete(&manager_of(&["c2"]), "c2-a").await?;
    assert!(backend.find_by_id("c2-a").await?.is_none());
    Ok(())
}
