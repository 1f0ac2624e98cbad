//! Authorization group management screen state

use bcozy_core::prelude::*;
use bcozy_core::GroupRecord;

/// One rendered row of the group table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRow {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

/// Project the registry's group list onto table rows
pub fn project_rows(groups: &[GroupRecord], selected: usize) -> Vec<GroupRow> {
    groups
        .iter()
        .enumerate()
        .map(|(i, g)| GroupRow {
            id: g.id.clone(),
            label: g.label.clone(),
            selected: i == selected,
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct GroupsState {
    /// Latest list published by the registry
    pub groups: Vec<GroupRecord>,
    /// New group name being typed
    pub input: String,
    /// Set when the last submission was rejected, cleared by editing
    pub input_invalid: bool,
    pub selected: usize,
    /// Registry operations in flight
    pub pending: usize,
}

impl GroupsState {
    pub fn set_groups(&mut self, groups: Vec<GroupRecord>) {
        self.groups = groups;
        self.selected = self.selected.min(self.groups.len().saturating_sub(1));
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.input_invalid = false;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.input_invalid = false;
    }

    /// Trimmed input, or a validation error if it is blank
    pub fn validated_input(&self) -> Result<String> {
        let label = self.input.trim();
        if label.is_empty() {
            return Err(Error::validation("Group name must not be empty"));
        }
        Ok(label.to_string())
    }

    /// Whether the input still holds the name `label` was submitted from
    pub fn input_matches(&self, label: &str) -> bool {
        self.input.trim() == label
    }

    pub fn selected_group(&self) -> Option<&GroupRecord> {
        self.groups.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.groups.is_empty() {
            self.selected = (self.selected + 1) % self.groups.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.groups.is_empty() {
            self.selected = (self.selected + self.groups.len() - 1) % self.groups.len();
        }
    }

    pub fn rows(&self) -> Vec<GroupRow> {
        project_rows(&self.groups, self.selected)
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }
}
