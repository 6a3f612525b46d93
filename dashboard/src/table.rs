//! Sortable table state: sort spec cycling, row ordering, year drill-down.
//!
//! DESIGN
//! ======
//! `TableState` only holds view interactions. Rows are recomputed from the
//! mounted [`Dashboard`] on every call instead of being kept sorted, so data
//! and sort changes can never drift apart.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aggregate::{Dashboard, JobTitleCount, YearAggregate};

// =============================================================================
// SORT SPEC
// =============================================================================

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Year,
    TotalJobs,
    AverageSalary,
}

impl SortKey {
    pub const ALL: [Self; 3] = [Self::Year, Self::TotalJobs, Self::AverageSalary];

    /// Query-string / wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::TotalJobs => "totalJobs",
            Self::AverageSalary => "averageSalary",
        }
    }

    /// Column heading.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::TotalJobs => "Total Jobs",
            Self::AverageSalary => "Average Salary (USD)",
        }
    }

    fn compare(self, a: &YearAggregate, b: &YearAggregate) -> Ordering {
        match self {
            Self::Year => a.year.cmp(&b.year),
            Self::TotalJobs => a.total_jobs.cmp(&b.total_jobs),
            Self::AverageSalary => a.average_salary.total_cmp(&b.average_salary),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn ascending(key: SortKey) -> Self {
        Self { key, direction: SortDirection::Ascending }
    }

    /// The sort that results from clicking `key`'s header while `current` is active.
    ///
    /// A different key (or no sort) starts ascending; the same key toggles.
    #[must_use]
    pub fn after_click(current: Option<Self>, key: SortKey) -> Self {
        match current {
            Some(Self { key: current_key, direction: SortDirection::Ascending }) if current_key == key => {
                Self { key, direction: SortDirection::Descending }
            }
            _ => Self::ascending(key),
        }
    }

    fn compare(self, a: &YearAggregate, b: &YearAggregate) -> Ordering {
        let ordering = self.key.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Errors parsing sort keys and directions from their string forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortParseError {
    #[error("unknown sort key '{0}' (expected year, totalJobs or averageSalary)")]
    UnknownKey(String),
    #[error("unknown sort direction '{0}' (expected ascending or descending)")]
    UnknownDirection(String),
}

impl FromStr for SortKey {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Self::Year),
            "totalJobs" => Ok(Self::TotalJobs),
            "averageSalary" => Ok(Self::AverageSalary),
            other => Err(SortParseError::UnknownKey(other.to_string())),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" => Ok(Self::Ascending),
            "descending" => Ok(Self::Descending),
            other => Err(SortParseError::UnknownDirection(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header icon state for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Unsorted => "↕",
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

// =============================================================================
// TABLE STATE
// =============================================================================

/// Sort and drill-down state of one table view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    pub sort: Option<SortSpec>,
    pub selected_year: Option<i32>,
    pub drill_down: Vec<JobTitleCount>,
}

impl TableState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a header click and return the new spec.
    pub fn click_header(&mut self, key: SortKey) -> SortSpec {
        let next = SortSpec::after_click(self.sort, key);
        self.sort = Some(next);
        next
    }

    #[must_use]
    pub fn indicator(&self, key: SortKey) -> SortIndicator {
        match self.sort {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::Unsorted,
        }
    }

    /// Aggregate rows in display order.
    #[must_use]
    pub fn rows<'a>(&self, dashboard: &'a Dashboard) -> Vec<&'a YearAggregate> {
        sorted_rows(dashboard.aggregates(), self.sort)
    }

    /// Select a row's year, replacing any previous drill-down.
    pub fn select_year(&mut self, dashboard: &Dashboard, year: i32) -> &[JobTitleCount] {
        self.selected_year = Some(year);
        self.drill_down = dashboard.job_title_counts(year);
        &self.drill_down
    }

    pub fn clear_selection(&mut self) {
        self.selected_year = None;
        self.drill_down.clear();
    }
}

/// Order aggregates by `sort`; `None` keeps natural order. Ties keep their
/// natural relative order.
#[must_use]
pub fn sorted_rows(aggregates: &[YearAggregate], sort: Option<SortSpec>) -> Vec<&YearAggregate> {
    let mut rows: Vec<&YearAggregate> = aggregates.iter().collect();
    if let Some(spec) = sort {
        rows.sort_by(|a, b| spec.compare(a, b));
    }
    rows
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
