//! Selection state: the set of entry paths marked for a bulk action.
//!
//! Membership keeps the order the widget reported it in, which becomes the
//! order of the delete request.

use indexmap::IndexSet;

use crate::model::fs_state::Listing;

/// Shape of a selection-change report from the table widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionInput {
    Many(Vec<String>),
    Single(String),
}

impl From<Vec<String>> for SelectionInput {
    fn from(ids: Vec<String>) -> Self {
        Self::Many(ids)
    }
}

impl From<String> for SelectionInput {
    fn from(id: String) -> Self {
        Self::Single(id)
    }
}

impl From<&str> for SelectionInput {
    fn from(id: &str) -> Self {
        Self::Single(id.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    selected: IndexSet<String>,
}

impl SelectionModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection wholesale. Duplicates collapse.
    pub fn set_selection(&mut self, input: impl Into<SelectionInput>) {
        self.selected = match input.into() {
            SelectionInput::Many(ids) => ids.into_iter().collect(),
            SelectionInput::Single(id) => std::iter::once(id).collect(),
        };
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop members that are not paths of `listing`. Returns how many were dropped.
    pub fn retain_listed(&mut self, listing: &Listing) -> usize {
        let before = self.selected.len();
        self.selected.retain(|path| listing.contains(path));
        before - self.selected.len()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.selected.contains(path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_set(&self) -> &IndexSet<String> {
        &self.selected
    }

    /// Selection in report order, as sent to the delete command.
    #[must_use]
    pub fn to_ordered_vec(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }
}
