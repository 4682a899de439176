use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: String,
    pub username: String,
}

impl UserRef {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// Authorization context of someone managing announcements.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub user: UserRef,
    pub is_global_admin: bool,
    pub community_ids: HashSet<String>,
}

impl Viewer {
    pub fn global_admin(user: UserRef) -> Self {
        Self {
            user,
            is_global_admin: true,
            community_ids: HashSet::new(),
        }
    }

    pub fn community_manager<I, S>(user: UserRef, community_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user,
            is_global_admin: false,
            community_ids: community_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_member_of(&self, community_id: &str) -> bool {
        self.community_ids.contains(community_id)
    }
}

/// Who is acting on a feedback record.
#[derive(Debug, Clone)]
pub enum Actor {
    Submitter(UserRef),
    Admin(UserRef),
}

impl Actor {
    pub fn user(&self) -> &UserRef {
        match self {
            Actor::Submitter(user) | Actor::Admin(user) => user,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin(_))
    }
}
