//! Admin panel state
//!
//! The panel keeps the active category tab, the current page, the selected
//! rows and the record being edited. Each transition consumes the state and
//! returns the next one.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::ValidityCategory;
use crate::types::{Pagination, PaginationMeta};

/// Identifier assigned by the record store
pub type RecordId = u64;

/// Whether the create/edit form is open
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", content = "id", rename_all = "snake_case")]
pub enum FormMode {
    #[default]
    Closed,
    Creating,
    Editing(RecordId),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelState {
    pub active_tab: ValidityCategory,
    pub pagination: PaginationMeta,
    pub selected: BTreeSet<RecordId>,
    pub form: FormMode,
}

impl Default for PanelState {
    fn default() -> Self {
        Self::new(Pagination::default().per_page)
    }
}

impl PanelState {
    pub fn new(per_page: u32) -> Self {
        Self {
            active_tab: ValidityCategory::Aso,
            pagination: PaginationMeta::new(Pagination { page: 1, per_page }, 0),
            selected: BTreeSet::new(),
            form: FormMode::Closed,
        }
    }

    /// Page request for the record store
    pub fn query(&self) -> Pagination {
        Pagination {
            page: self.pagination.page,
            per_page: self.pagination.per_page,
        }
    }

    /// Apply the item count reported by the record store
    pub fn with_total_items(mut self, total_items: u64) -> Self {
        self.pagination = PaginationMeta::new(self.query(), total_items);
        self
    }

    /// Move to `page`, clamped to the known page range
    pub fn go_to_page(mut self, page: u32) -> Self {
        self.pagination.page = page.clamp(1, self.pagination.total_pages);
        self
    }

    pub fn next_page(self) -> Self {
        let page = self.pagination.page.saturating_add(1);
        self.go_to_page(page)
    }

    pub fn previous_page(self) -> Self {
        let page = self.pagination.page.saturating_sub(1);
        self.go_to_page(page)
    }

    pub fn toggle_selection(mut self, id: RecordId) -> Self {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self
    }

    pub fn select_all<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.selected.extend(ids);
        self
    }

    pub fn clear_selection(mut self) -> Self {
        self.selected.clear();
        self
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.selected.contains(&id)
    }

    pub fn begin_create(mut self) -> Self {
        self.form = FormMode::Creating;
        self
    }

    pub fn begin_edit(mut self, id: RecordId) -> Self {
        self.form = FormMode::Editing(id);
        self
    }

    pub fn finish_edit(mut self) -> Self {
        self.form = FormMode::Closed;
        self
    }

    /// Record currently loaded in the form, if any
    pub fn editing_id(&self) -> Option<RecordId> {
        match self.form {
            FormMode::Editing(id) => Some(id),
            _ => None,
        }
    }

    /// Switch category tab; page, selection and form start over
    pub fn switch_tab(self, tab: ValidityCategory) -> Self {
        if tab == self.active_tab {
            return self;
        }
        Self {
            active_tab: tab,
            ..Self::new(self.pagination.per_page)
        }
    }
}
