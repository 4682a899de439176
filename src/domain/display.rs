use serde::Serialize;

use crate::domain::{AnnouncementType, FeedbackStatus, FeedbackType};

/// How a type or status tag is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayMeta {
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

pub trait Describe {
    fn display(&self) -> DisplayMeta;
}

impl Describe for AnnouncementType {
    fn display(&self) -> DisplayMeta {
        match self {
            AnnouncementType::General => DisplayMeta {
                label: "Platform-wide",
                icon: "globe",
                color: "#2196F3",
            },
            AnnouncementType::Community => DisplayMeta {
                label: "Community",
                icon: "users",
                color: "#9C27B0",
            },
        }
    }
}

impl Describe for FeedbackType {
    fn display(&self) -> DisplayMeta {
        match self {
            FeedbackType::DemoComplaint => DisplayMeta {
                label: "Demo Complaint",
                icon: "flag",
                color: "#F44336",
            },
            FeedbackType::CommunityFeedback => DisplayMeta {
                label: "Community Feedback",
                icon: "users",
                color: "#9C27B0",
            },
            FeedbackType::WebsiteFeedback => DisplayMeta {
                label: "Website Feedback",
                icon: "message-square",
                color: "#2196F3",
            },
            FeedbackType::BanAppeal => DisplayMeta {
                label: "Ban Appeal",
                icon: "shield",
                color: "#FF9800",
            },
        }
    }
}

impl Describe for FeedbackStatus {
    fn display(&self) -> DisplayMeta {
        match self {
            FeedbackStatus::Pending => DisplayMeta {
                label: "Pending",
                icon: "clock",
                color: "#FFC107",
            },
            FeedbackStatus::InProgress => DisplayMeta {
                label: "In Progress",
                icon: "loader",
                color: "#2196F3",
            },
            FeedbackStatus::Resolved => DisplayMeta {
                label: "Resolved",
                icon: "check-circle",
                color: "#4CAF50",
            },
            FeedbackStatus::Dismissed => DisplayMeta {
                label: "Dismissed",
                icon: "x-circle",
                color: "#9E9E9E",
            },
        }
    }
}

/// Which reference pickers a feedback form shows for a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedbackFormFields {
    pub demo_picker: bool,
    pub community_picker: bool,
}

pub fn feedback_form_fields(feedback_type: FeedbackType) -> FeedbackFormFields {
    FeedbackFormFields {
        demo_picker: feedback_type.requires_demo(),
        community_picker: feedback_type.accepts_community(),
    }
}
