//! Salary dataset models, aggregation, and view state for the dashboard.
//!
//! This crate is UI-framework agnostic: the server renders it as HTML and the
//! CLI renders it in the terminal. Nothing here performs IO.

pub mod aggregate;
pub mod api;
pub mod chart;
pub mod chat;
pub mod record;
pub mod table;

pub use aggregate::{Dashboard, JobTitleCount, YearAggregate, aggregate_by_year, job_title_counts};
pub use chart::{ChartSeries, PlotPoint};
pub use chat::{ChatMessage, ChatSession, FALLBACK_REPLY, PendingRequest, Sender};
pub use record::{DatasetError, JobRecord, ParsedRecords, SkippedRecord, parse_records};
pub use table::{SortDirection, SortIndicator, SortKey, SortParseError, SortSpec, TableState};
