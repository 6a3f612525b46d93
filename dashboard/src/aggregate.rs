//! Per-year aggregation and job-title drill-down.
//!
//! Both transforms preserve first-occurrence order of their keys, so the
//! natural order of the aggregates follows the dataset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::JobRecord;

/// Job count and mean USD salary for one `work_year`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearAggregate {
    pub year: i32,
    pub total_jobs: u64,
    pub average_salary: f64,
}

/// Occurrences of one job title within a selected year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTitleCount {
    pub job_title: String,
    pub count: u64,
}

/// Group records by `work_year`.
///
/// The mean is computed as sum-then-divide per year rather than as a running
/// mean, so the result does not depend on record order beyond summation.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate_by_year(records: &[JobRecord]) -> Vec<YearAggregate> {
    let mut index: HashMap<i32, usize> = HashMap::new();
    let mut sums: Vec<(i32, u64, f64)> = Vec::new();

    for record in records {
        let slot = *index.entry(record.work_year).or_insert_with(|| {
            sums.push((record.work_year, 0, 0.0));
            sums.len() - 1
        });
        let (_, count, total) = &mut sums[slot];
        *count += 1;
        *total += record.salary_in_usd;
    }

    sums.into_iter()
        .map(|(year, count, total)| YearAggregate {
            year,
            total_jobs: count,
            average_salary: total / count as f64,
        })
        .collect()
}

/// Count job titles among the records of one year.
///
/// A year with no records yields an empty list.
#[must_use]
pub fn job_title_counts(records: &[JobRecord], year: i32) -> Vec<JobTitleCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<JobTitleCount> = Vec::new();

    for record in records.iter().filter(|r| r.work_year == year) {
        match index.get(record.job_title.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(record.job_title.as_str(), counts.len());
                counts.push(JobTitleCount { job_title: record.job_title.clone(), count: 1 });
            }
        }
    }
    counts
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// Dataset mounted into a view: the raw records and their year aggregates.
///
/// Built once when a view loads its data and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    records: Vec<JobRecord>,
    aggregates: Vec<YearAggregate>,
}

impl Dashboard {
    #[must_use]
    pub fn mount(records: Vec<JobRecord>) -> Self {
        let aggregates = aggregate_by_year(&records);
        Self { records, aggregates }
    }

    #[must_use]
    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    /// Aggregates in natural (first-occurrence) order.
    #[must_use]
    pub fn aggregates(&self) -> &[YearAggregate] {
        &self.aggregates
    }

    #[must_use]
    pub fn year(&self, year: i32) -> Option<&YearAggregate> {
        self.aggregates.iter().find(|a| a.year == year)
    }

    #[must_use]
    pub fn job_title_counts(&self, year: i32) -> Vec<JobTitleCount> {
        job_title_counts(&self.records, year)
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
