use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Toggle `tag_id` in an ordered selection capped at `max_tags`.
///
/// Removing is always allowed. Adding past the cap is a no-op, not an error.
pub fn toggle_tag(selected: &[String], tag_id: &str, max_tags: usize) -> Vec<String> {
    if selected.iter().any(|id| id == tag_id) {
        return selected.iter().filter(|id| *id != tag_id).cloned().collect();
    }

    let mut next = selected.to_vec();
    if next.len() < max_tags {
        next.push(tag_id.to_string());
    }
    next
}

/// Tag picker state owned by a form.
#[derive(Debug, Clone, Default)]
pub struct TagSelection {
    selected: Vec<String>,
    max_tags: usize,
}

impl TagSelection {
    pub fn new(max_tags: usize) -> Self {
        Self {
            selected: Vec::new(),
            max_tags,
        }
    }

    pub fn toggle(&mut self, tag_id: &str) {
        self.selected = toggle_tag(&self.selected, tag_id, self.max_tags);
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, tag_id: &str) -> bool {
        self.selected.iter().any(|id| id == tag_id)
    }

    pub fn is_at_capacity(&self) -> bool {
        self.selected.len() >= self.max_tags
    }

    /// False when the chip should render disabled.
    pub fn can_select(&self, tag_id: &str) -> bool {
        self.is_selected(tag_id) || !self.is_at_capacity()
    }

    pub fn remaining(&self) -> usize {
        self.max_tags.saturating_sub(self.selected.len())
    }
}
