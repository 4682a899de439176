use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::announcement::require_text;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,
    pub title: String,
    pub content: String,
    pub status: FeedbackStatus,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub demo_id: Option<String>,
    #[serde(default)]
    pub demo_title: Option<String>,
    #[serde(default)]
    pub community_id: Option<String>,
    #[serde(default)]
    pub community_name: Option<String>,
    pub submitted_by: String,
    pub submitted_by_username: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    DemoComplaint,
    CommunityFeedback,
    WebsiteFeedback,
    BanAppeal,
}

impl FeedbackType {
    pub const ALL: [FeedbackType; 4] = [
        FeedbackType::DemoComplaint,
        FeedbackType::CommunityFeedback,
        FeedbackType::WebsiteFeedback,
        FeedbackType::BanAppeal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::DemoComplaint => "demo_complaint",
            FeedbackType::CommunityFeedback => "community_feedback",
            FeedbackType::WebsiteFeedback => "website_feedback",
            FeedbackType::BanAppeal => "ban_appeal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s.to_lowercase())
    }

    pub fn requires_demo(&self) -> bool {
        matches!(self, FeedbackType::DemoComplaint)
    }

    pub fn requires_community(&self) -> bool {
        matches!(self, FeedbackType::CommunityFeedback)
    }

    /// Whether a community reference is kept at all for this type.
    pub fn accepts_community(&self) -> bool {
        matches!(self, FeedbackType::CommunityFeedback | FeedbackType::BanAppeal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    Pending,
    InProgress,
    Resolved,
    Dismissed,
}

impl FeedbackStatus {
    pub const ALL: [FeedbackStatus; 4] = [
        FeedbackStatus::Pending,
        FeedbackStatus::InProgress,
        FeedbackStatus::Resolved,
        FeedbackStatus::Dismissed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::InProgress => "in_progress",
            FeedbackStatus::Resolved => "resolved",
            FeedbackStatus::Dismissed => "dismissed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s.to_lowercase())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FeedbackStatus::Resolved | FeedbackStatus::Dismissed)
    }

    /// Statuses an admin can move a record to from here.
    pub fn next_states(&self) -> &'static [FeedbackStatus] {
        match self {
            FeedbackStatus::Pending => &[
                FeedbackStatus::InProgress,
                FeedbackStatus::Resolved,
                FeedbackStatus::Dismissed,
            ],
            FeedbackStatus::InProgress => &[FeedbackStatus::Resolved, FeedbackStatus::Dismissed],
            FeedbackStatus::Resolved | FeedbackStatus::Dismissed => &[],
        }
    }

    pub fn can_transition_to(&self, target: FeedbackStatus) -> bool {
        self.next_states().contains(&target)
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Feedback {
    /// Apply an admin status change, returning the updated record.
    ///
    /// `self` is left untouched so a caller can hold on to the old record
    /// until the backend confirms the change.
    pub fn transition(
        &self,
        target: FeedbackStatus,
        resolution: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Feedback> {
        if !self.status.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }

        let mut updated = self.clone();
        updated.status = target;
        if target.is_terminal() {
            // Blank resolutions are recorded as-is
            updated.resolution = Some(resolution.unwrap_or_default().to_string());
            updated.reviewed_at = Some(now);
        }
        Ok(updated)
    }

    pub fn is_submitted_by(&self, user_id: &str) -> bool {
        self.submitted_by == user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackRequest {
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,
    pub title: String,
    pub content: String,
    pub demo_id: Option<String>,
    pub demo_title: Option<String>,
    pub community_id: Option<String>,
    pub community_name: Option<String>,
}

/// Length limits for submitted feedback.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackLimits {
    pub max_title_len: usize,
    pub max_content_len: usize,
}

impl Default for FeedbackLimits {
    fn default() -> Self {
        Self {
            max_title_len: 200,
            max_content_len: 5000,
        }
    }
}

impl CreateFeedbackRequest {
    pub fn new(
        feedback_type: FeedbackType,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            feedback_type,
            title: title.into(),
            content: content.into(),
            demo_id: None,
            demo_title: None,
            community_id: None,
            community_name: None,
        }
    }

    pub fn with_demo(mut self, demo_id: impl Into<String>, demo_title: impl Into<String>) -> Self {
        self.demo_id = Some(demo_id.into());
        self.demo_title = Some(demo_title.into());
        self
    }

    pub fn with_community(
        mut self,
        community_id: impl Into<String>,
        community_name: impl Into<String>,
    ) -> Self {
        self.community_id = Some(community_id.into());
        self.community_name = Some(community_name.into());
        self
    }

    /// Check required fields and drop references the type does not use.
    pub fn validate(mut self, limits: &FeedbackLimits) -> Result<Self> {
        require_text("Title", &self.title)?;
        require_text("Content", &self.content)?;

        if self.title.chars().count() > limits.max_title_len {
            return Err(AppError::Validation(format!(
                "Title must be at most {} characters",
                limits.max_title_len
            )));
        }
        if self.content.chars().count() > limits.max_content_len {
            return Err(AppError::Validation(format!(
                "Content must be at most {} characters",
                limits.max_content_len
            )));
        }

        if self.feedback_type.requires_demo() && is_blank(&self.demo_id) {
            return Err(AppError::Validation("Please select a demo".to_string()));
        }
        if self.feedback_type.requires_community() && is_blank(&self.community_id) {
            return Err(AppError::Validation("Please select a community".to_string()));
        }

        if !self.feedback_type.requires_demo() {
            self.demo_id = None;
            self.demo_title = None;
        }
        if !self.feedback_type.accepts_community() {
            self.community_id = None;
            self.community_name = None;
        }

        Ok(self)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
