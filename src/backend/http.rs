use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, Response, StatusCode, Url};
use serde::Serialize;

use crate::{
    backend::{AnnouncementApi, FeedbackApi},
    config::BackendConfig,
    domain::*,
    error::{AppError, Result},
};

/// JSON client for the platform backend.
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: FeedbackStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActiveUpdate {
    is_active: bool,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::Collaborator(format!("Invalid backend URL {}: {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Collaborator(format!("Backend URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Map non-2xx responses to errors.
    ///
    /// The backend answers a missing record with a JSON error body. A 404
    /// without one means the route itself is wrong, which is a collaborator
    /// failure rather than a missing record.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::NOT_FOUND && is_json {
            tracing::debug!("Backend has no record at {}", url);
            return Err(AppError::NotFound(format!("{} not found", url.path())));
        }

        tracing::error!("Backend returned {} for {}: {}", status, url, body);
        Err(AppError::Collaborator(format!("{} from {}: {}", status, url, body)))
    }
}

#[async_trait]
impl FeedbackApi for HttpBackend {
    async fn create(&self, submitter: &UserRef, request: &CreateFeedbackRequest) -> Result<Feedback> {
        let url = self.url(&["api", "feedback"])?;
        tracing::debug!("POST {} on behalf of {}", url, submitter.username);

        let response = self.client.post(url).json(request).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list(&self) -> Result<Vec<Feedback>> {
        let url = self.url(&["api", "feedback"])?;
        let response = self.client.get(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_by_submitter(&self, user_id: &str) -> Result<Vec<Feedback>> {
        let url = self.url(&["api", "feedback"])?;
        let response = self
            .client
            .get(url)
            .query(&[("submittedBy", user_id)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_status(&self, id: &str, status: FeedbackStatus, resolution: Option<&str>) -> Result<Feedback> {
        let url = self.url(&["api", "feedback", id, "status"])?;
        tracing::debug!("PATCH {} -> {}", url, status);

        let response = self
            .client
            .patch(url)
            .json(&StatusUpdate { status, resolution })
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.url(&["api", "feedback", id])?;
        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl AnnouncementApi for HttpBackend {
    async fn list(&self) -> Result<Vec<Announcement>> {
        let url = self.url(&["api", "announcements"])?;
        let response = self.client.get(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Announcement>> {
        let url = self.url(&["api", "announcements", id])?;
        let response = self.client.get(url).send().await?;
        match Self::check(response).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create(&self, author: &UserRef, request: &CreateAnnouncementRequest) -> Result<Announcement> {
        let url = self.url(&["api", "announcements"])?;
        tracing::debug!("POST {} on behalf of {}", url, author.username);

        let response = self.client.post(url).json(request).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update(&self, announcement: &Announcement) -> Result<Announcement> {
        let url = self.url(&["api", "announcements", announcement.id.as_str()])?;
        let response = self.client.put(url).json(announcement).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn set_active(&self, id: &str, is_active: bool) -> Result<()> {
        let url = self.url(&["api", "announcements", id, "active"])?;
        let response = self
            .client
            .patch(url)
            .json(&ActiveUpdate { is_active })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.url(&["api", "announcements", id])?;
        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
