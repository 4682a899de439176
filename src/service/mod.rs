pub mod announcement_service;
pub mod feedback_service;

use std::sync::Arc;
use crate::backend::*;
use crate::config::Settings;
use crate::domain::TagSelection;
use crate::error::Result;
use announcement_service::AnnouncementService;
use feedback_service::FeedbackService;

pub struct ServiceContext {
    pub announcement_service: Arc<AnnouncementService>,
    pub feedback_service: Arc<FeedbackService>,
    pub max_tags: usize,
}

impl ServiceContext {
    pub fn new(
        feedback_api: Arc<dyn FeedbackApi>,
        announcement_api: Arc<dyn AnnouncementApi>,
        settings: &Settings,
    ) -> Self {
        Self {
            announcement_service: Arc::new(AnnouncementService::new(announcement_api)),
            feedback_service: Arc::new(FeedbackService::new(feedback_api, settings.feedback.limits())),
            max_tags: settings.tags.max_tags,
        }
    }

    /// Context talking to the configured backend over HTTP.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let backend = Arc::new(HttpBackend::new(&settings.backend)?);
        tracing::info!("Using backend at {}", settings.backend.base_url);
        Ok(Self::new(backend.clone(), backend, settings))
    }

    pub fn tag_selection(&self) -> TagSelection {
        TagSelection::new(self.max_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[test]
    fn test_tag_selection_uses_configured_capacity() {
        let mut settings = Settings::default();
        settings.tags.max_tags = 1;
        let backend = Arc::new(InMemoryBackend::new());
        let ctx = ServiceContext::new(backend.clone(), backend, &settings);

        let mut selection = ctx.tag_selection();
        selection.toggle("rust");
        selection.toggle("speedrun");
        assert_eq!(selection.selected(), ["rust".to_string()].as_slice());
    }

    #[test]
    fn test_from_settings_rejects_bad_url() {
        let mut settings = Settings::default();
        settings.backend = BackendConfig {
            base_url: "::nope".to_string(),
            timeout_secs: 1,
        };
        assert!(ServiceContext::from_settings(&settings).is_err());
        assert!(ServiceContext::from_settings(&Settings::default()).is_ok());
    }
}
