use chatsweep_engine::{ArchiveFilter, Criteria, ModeFilter, SortField, SortOrder};
use clap::{Args, ValueEnum};

use super::hints;

/// Filter, sort and paging flags shared by every session listing.
#[derive(Debug, Clone, Args)]
pub struct CriteriaArgs {
    #[arg(long, help = "Case-insensitive substring of the session name")]
    pub search: Option<String>,

    #[arg(long, default_value = "all", help = "all, agent, chat or any recorded mode name")]
    pub mode: ModeFilter,

    #[arg(long, default_value = "all", help = "all, active or archived")]
    pub archive: ArchiveFilter,

    #[arg(long, help = "Include sessions that changed no lines and no files")]
    pub show_zero: bool,

    #[arg(long, default_value = "files_changed")]
    pub sort: SortField,

    #[arg(long, default_value = "desc")]
    pub order: SortOrder,

    #[arg(long, default_value = "1")]
    pub page: usize,
}

impl CriteriaArgs {
    pub fn to_criteria(&self) -> Criteria {
        Criteria {
            hide_zero_change: !self.show_zero,
            search_term: self.search.clone().unwrap_or_default(),
            mode: self.mode.clone(),
            archive: self.archive,
            sort_field: self.sort,
            sort_order: self.order,
            page: self.page,
        }
    }

    /// Non-default filter and sort flags, each with a leading space, for
    /// repeating the listing in a tip. The page is left out.
    pub fn flags(&self) -> String {
        let defaults = Criteria::default();
        let mut out = String::new();
        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            out.push_str(&format!(" --search {}", hints::fmt::arg(term)));
        }
        if self.mode != defaults.mode {
            out.push_str(&format!(" --mode {}", hints::fmt::arg(&self.mode.to_string())));
        }
        if self.archive != defaults.archive {
            out.push_str(&format!(" --archive {}", self.archive));
        }
        if self.show_zero {
            out.push_str(" --show-zero");
        }
        if self.sort != defaults.sort_field {
            out.push_str(&format!(" --sort {}", self.sort));
        }
        if self.order != defaults.sort_order {
            out.push_str(&format!(" --order {}", self.order));
        }
        out
    }
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ConfirmArgs {
    #[arg(long, short = 'y', help = "Actually delete; without it only the plan is printed")]
    pub yes: bool,
}

/// What `session delete --select` picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum SelectMode {
    Page,
    Filtered,
}
