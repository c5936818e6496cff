use std::collections::BTreeSet;

use chatsweep_types::ChatSession;
use serde::Serialize;

use crate::list::{ProjectListCriteria, WorkspaceListCriteria};
use crate::query::{filtered_ids, render, Criteria, Page};

/// The list a selection belongs to. Each scope owns an independent selection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum SelectionScope {
    ProjectSessions(String),
    WorkspaceSessions(String),
    ProjectList,
    WorkspaceList,
}

/// Set of selected identifiers for one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Replace the selection with exactly the visible page ids.
    pub fn select_all<I, S>(&mut self, visible_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = visible_ids.into_iter().map(Into::into).collect();
    }

    /// Replace the selection with every id passing the current filter.
    pub fn select_all_filtered<I, S>(&mut self, all_filtered_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = all_filtered_ids.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// True when the page is non-empty and every id on it is selected.
    pub fn is_page_fully_selected<S: AsRef<str>>(&self, page_ids: &[S]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.ids.contains(id.as_ref()))
    }

    /// Page checkbox: deselect the page if it is fully selected, else select it.
    pub fn toggle_page<S: AsRef<str>>(&mut self, page_ids: &[S]) {
        if self.is_page_fully_selected(page_ids) {
            for id in page_ids {
                self.ids.remove(id.as_ref());
            }
        } else {
            self.select_all(page_ids.iter().map(|id| id.as_ref().to_string()));
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

/// Criteria whose changes invalidate a selection.
///
/// Only the page number may change without clearing the selection.
pub trait ViewCriteria: Clone + PartialEq {
    fn page(&self) -> usize;
    fn set_page(&mut self, page: usize);

    fn same_view(&self, other: &Self) -> bool {
        let mut normalized = other.clone();
        normalized.set_page(self.page());
        *self == normalized
    }
}

impl ViewCriteria for Criteria {
    fn page(&self) -> usize {
        self.page
    }

    fn set_page(&mut self, page: usize) {
        self.page = page;
    }
}

impl ViewCriteria for ProjectListCriteria {
    fn page(&self) -> usize {
        self.page
    }

    fn set_page(&mut self, page: usize) {
        self.page = page;
    }
}

impl ViewCriteria for WorkspaceListCriteria {
    fn page(&self) -> usize {
        self.page
    }

    fn set_page(&mut self, page: usize) {
        self.page = page;
    }
}

/// One list view: its criteria, current page and selection.
#[derive(Debug, Clone, Default)]
pub struct ListState<C> {
    criteria: C,
    selection: Selection,
}

impl<C: ViewCriteria> ListState<C> {
    pub fn new(criteria: C) -> Self {
        Self {
            criteria,
            selection: Selection::new(),
        }
    }

    pub fn criteria(&self) -> &C {
        &self.criteria
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Apply new criteria. Anything beyond a page change clears the selection
    /// and returns to page 1.
    pub fn set_criteria(&mut self, criteria: C) {
        if self.criteria.same_view(&criteria) {
            self.criteria = criteria;
            return;
        }
        self.criteria = criteria;
        self.criteria.set_page(1);
        self.selection.clear();
    }

    /// Change only the page. The selection spans pages and is kept.
    pub fn set_page(&mut self, page: usize) {
        self.criteria.set_page(page.max(1));
    }
}

impl ListState<Criteria> {
    pub fn render<'a>(&self, sessions: &'a [ChatSession]) -> Page<&'a ChatSession> {
        render(sessions, &self.criteria)
    }

    pub fn page_ids(&self, sessions: &[ChatSession]) -> Vec<String> {
        self.render(sessions)
            .items
            .into_iter()
            .map(|s| s.id.clone())
            .collect()
    }

    pub fn select_page(&mut self, sessions: &[ChatSession]) {
        let ids = self.page_ids(sessions);
        self.selection.select_all(ids);
    }

    pub fn select_all_filtered(&mut self, sessions: &[ChatSession]) {
        let ids = filtered_ids(sessions, &self.criteria);
        self.selection.select_all_filtered(ids);
    }
}
