use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chatsweep_types::{ChatMode, ChatSession};
use serde::Serialize;

/// Rows per page for every list view.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    FilesChanged,
    LinesAdded,
    LinesRemoved,
    NetLines,
    UpdatedAt,
    CreatedAt,
    ContextUsage,
    Name,
}

impl SortField {
    pub const ALL: [SortField; 8] = [
        SortField::FilesChanged,
        SortField::LinesAdded,
        SortField::LinesRemoved,
        SortField::NetLines,
        SortField::UpdatedAt,
        SortField::CreatedAt,
        SortField::ContextUsage,
        SortField::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::FilesChanged => "files_changed",
            SortField::LinesAdded => "lines_added",
            SortField::LinesRemoved => "lines_removed",
            SortField::NetLines => "net_lines",
            SortField::UpdatedAt => "updated_at",
            SortField::CreatedAt => "created_at",
            SortField::ContextUsage => "context_usage",
            SortField::Name => "name",
        }
    }

    /// Ascending comparison of two sessions on this field.
    ///
    /// Missing timestamps compare as the empty string; missing context usage
    /// sorts below any recorded value.
    pub fn compare(&self, a: &ChatSession, b: &ChatSession) -> Ordering {
        match self {
            SortField::FilesChanged => a.files_changed.cmp(&b.files_changed),
            SortField::LinesAdded => a.lines_added.cmp(&b.lines_added),
            SortField::LinesRemoved => a.lines_removed.cmp(&b.lines_removed),
            SortField::NetLines => a.net_lines().cmp(&b.net_lines()),
            SortField::UpdatedAt => timestamp(&a.updated_at).cmp(timestamp(&b.updated_at)),
            SortField::CreatedAt => timestamp(&a.created_at).cmp(timestamp(&b.created_at)),
            SortField::ContextUsage => match (a.context_usage, b.context_usage) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            },
            SortField::Name => a.name.cmp(&b.name),
        }
    }
}

fn timestamp(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = SortField::ALL.iter().map(|f| f.as_str()).collect();
                format!("unknown sort field '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("unknown sort order '{}' (expected asc or desc)", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(into = "String")]
pub enum ModeFilter {
    #[default]
    All,
    Only(ChatMode),
}

impl ModeFilter {
    pub fn matches(&self, mode: &ChatMode) -> bool {
        match self {
            ModeFilter::All => true,
            ModeFilter::Only(wanted) => wanted == mode,
        }
    }
}

impl From<ModeFilter> for String {
    fn from(filter: ModeFilter) -> Self {
        filter.to_string()
    }
}

impl fmt::Display for ModeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeFilter::All => write!(f, "all"),
            ModeFilter::Only(mode) => write!(f, "{}", mode),
        }
    }
}

impl FromStr for ModeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err("mode filter must not be empty".to_string()),
            "all" => Ok(ModeFilter::All),
            other => Ok(ModeFilter::Only(ChatMode::from(other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveFilter {
    #[default]
    All,
    Active,
    Archived,
}

impl ArchiveFilter {
    pub fn matches(&self, is_archived: bool) -> bool {
        match self {
            ArchiveFilter::All => true,
            ArchiveFilter::Active => !is_archived,
            ArchiveFilter::Archived => is_archived,
        }
    }
}

impl fmt::Display for ArchiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFilter::All => write!(f, "all"),
            ArchiveFilter::Active => write!(f, "active"),
            ArchiveFilter::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for ArchiveFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ArchiveFilter::All),
            "active" => Ok(ArchiveFilter::Active),
            "archived" => Ok(ArchiveFilter::Archived),
            _ => Err(format!(
                "unknown archive filter '{}' (expected all, active or archived)",
                s
            )),
        }
    }
}

/// Filter, sort and page parameters of a session list render.
///
/// All four filters combine with logical AND.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criteria {
    pub hide_zero_change: bool,
    pub search_term: String,
    pub mode: ModeFilter,
    pub archive: ArchiveFilter,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    /// 1-based. Zero is treated as the first page.
    pub page: usize,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            hide_zero_change: true,
            search_term: String::new(),
            mode: ModeFilter::All,
            archive: ArchiveFilter::All,
            sort_field: SortField::FilesChanged,
            sort_order: SortOrder::Desc,
            page: 1,
        }
    }
}

impl Criteria {
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn matches(&self, session: &ChatSession) -> bool {
        if self.hide_zero_change && session.is_zero_change() {
            return false;
        }
        if !self.search_term.is_empty() {
            let needle = self.search_term.to_lowercase();
            if !session.name.to_lowercase().contains(&needle)
                && !session.subtitle.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        self.mode.matches(&session.mode) && self.archive.matches(session.is_archived)
    }

    /// Filtered and ordered, before pagination.
    pub fn apply<'a>(&self, sessions: &'a [ChatSession]) -> Vec<&'a ChatSession> {
        let mut rows: Vec<&ChatSession> = sessions.iter().filter(|s| self.matches(s)).collect();
        // sort_by is stable, so equal keys keep input order in both directions
        rows.sort_by(|a, b| self.sort_order.apply(self.sort_field.compare(a, b)));
        rows
    }
}

/// One page of a filtered, ordered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_filtered: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_filtered: self.total_filtered,
            total_pages: self.total_pages,
        }
    }
}

/// Slice `[(page-1)*PAGE_SIZE, page*PAGE_SIZE)` out of an ordered list.
///
/// A page past the end is empty rather than an error.
pub fn paginate<T>(rows: Vec<T>, page: usize) -> Page<T> {
    let page = page.max(1);
    let total_filtered = rows.len();
    let total_pages = total_filtered.div_ceil(PAGE_SIZE);
    let start = (page - 1).saturating_mul(PAGE_SIZE);

    let items = rows.into_iter().skip(start).take(PAGE_SIZE).collect();

    Page {
        items,
        page,
        total_filtered,
        total_pages,
    }
}

/// Render one page of sessions under the given criteria.
pub fn render<'a>(sessions: &'a [ChatSession], criteria: &Criteria) -> Page<&'a ChatSession> {
    paginate(criteria.apply(sessions), criteria.page)
}

/// Every id that passes the filter, in sorted order, ignoring pagination.
pub fn filtered_ids(sessions: &[ChatSession], criteria: &Criteria) -> Vec<String> {
    criteria
        .apply(sessions)
        .into_iter()
        .map(|s| s.id.clone())
        .collect()
}
