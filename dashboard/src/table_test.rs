use super::*;
use crate::record::JobRecord;

fn record(year: i32, title: &str, usd: f64) -> JobRecord {
    JobRecord {
        work_year: year,
        experience_level: String::new(),
        employment_type: String::new(),
        job_title: title.into(),
        salary: usd,
        salary_currency: "USD".into(),
        salary_in_usd: usd,
        employee_residence: String::new(),
        remote_ratio: 0,
        company_location: String::new(),
        company_size: String::new(),
    }
}

/// 2022: 2 jobs avg 110k; 2023: 3 jobs avg 150k; 2021: 1 job avg 200k.
fn dashboard() -> Dashboard {
    Dashboard::mount(vec![
        record(2022, "ML Engineer", 100_000.0),
        record(2023, "ML Engineer", 140_000.0),
        record(2022, "Data Scientist", 120_000.0),
        record(2021, "Research Scientist", 200_000.0),
        record(2023, "AI Scientist", 160_000.0),
        record(2023, "ML Engineer", 150_000.0),
    ])
}

fn years(rows: &[&YearAggregate]) -> Vec<i32> {
    rows.iter().map(|r| r.year).collect()
}

// =============================================================================
// click_header cycling
// =============================================================================

#[test]
fn fresh_table_has_no_sort() {
    let state = TableState::new();
    assert!(state.sort.is_none());
    assert_eq!(years(&state.rows(&dashboard())), vec![2022, 2023, 2021]);
}

#[test]
fn first_click_sorts_ascending() {
    let mut state = TableState::new();
    let spec = state.click_header(SortKey::TotalJobs);
    assert_eq!(spec, SortSpec { key: SortKey::TotalJobs, direction: SortDirection::Ascending });
    assert_eq!(years(&state.rows(&dashboard())), vec![2021, 2022, 2023]);
}

#[test]
fn second_click_on_same_key_sorts_descending() {
    let mut state = TableState::new();
    state.click_header(SortKey::TotalJobs);
    let spec = state.click_header(SortKey::TotalJobs);
    assert_eq!(spec.direction, SortDirection::Descending);
    assert_eq!(years(&state.rows(&dashboard())), vec![2023, 2022, 2021]);
}

#[test]
fn third_click_on_same_key_flips_back_to_ascending() {
    let mut state = TableState::new();
    state.click_header(SortKey::AverageSalary);
    state.click_header(SortKey::AverageSalary);
    let spec = state.click_header(SortKey::AverageSalary);
    assert_eq!(spec.direction, SortDirection::Ascending);
}

#[test]
fn clicking_other_key_resets_to_ascending() {
    let mut state = TableState::new();
    state.click_header(SortKey::TotalJobs);
    state.click_header(SortKey::TotalJobs);
    let spec = state.click_header(SortKey::Year);
    assert_eq!(spec, SortSpec::ascending(SortKey::Year));
    assert_eq!(years(&state.rows(&dashboard())), vec![2021, 2022, 2023]);
}

#[test]
fn sort_by_average_salary_descending() {
    let state = TableState {
        sort: Some(SortSpec { key: SortKey::AverageSalary, direction: SortDirection::Descending }),
        ..TableState::default()
    };
    assert_eq!(years(&state.rows(&dashboard())), vec![2021, 2023, 2022]);
}

#[test]
fn sorting_twice_is_idempotent() {
    let dashboard = dashboard();
    for key in SortKey::ALL {
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let spec = Some(SortSpec { key, direction });
            let once = sorted_rows(dashboard.aggregates(), spec);
            let owned: Vec<YearAggregate> = once.iter().map(|r| **r).collect();
            let twice = sorted_rows(&owned, spec);
            assert_eq!(years(&once), years(&twice), "{key} {direction}");
        }
    }
}

#[test]
fn ties_keep_natural_order() {
    let dashboard = Dashboard::mount(vec![
        record(2020, "A", 1.0),
        record(2019, "A", 1.0),
        record(2018, "A", 1.0),
    ]);
    let rows = sorted_rows(dashboard.aggregates(), Some(SortSpec::ascending(SortKey::TotalJobs)));
    assert_eq!(years(&rows), vec![2020, 2019, 2018]);
}

#[test]
fn sorting_table_leaves_aggregates_in_natural_order() {
    let dashboard = dashboard();
    let mut state = TableState::new();
    state.click_header(SortKey::Year);
    let _ = state.rows(&dashboard);
    let natural: Vec<i32> = dashboard.aggregates().iter().map(|a| a.year).collect();
    assert_eq!(natural, vec![2022, 2023, 2021]);
}

// =============================================================================
// indicators
// =============================================================================

#[test]
fn indicator_tracks_active_column() {
    let mut state = TableState::new();
    assert_eq!(state.indicator(SortKey::Year), SortIndicator::Unsorted);
    state.click_header(SortKey::Year);
    assert_eq!(state.indicator(SortKey::Year), SortIndicator::Ascending);
    assert_eq!(state.indicator(SortKey::TotalJobs), SortIndicator::Unsorted);
    state.click_header(SortKey::Year);
    assert_eq!(state.indicator(SortKey::Year), SortIndicator::Descending);
    assert_eq!(SortIndicator::Descending.glyph(), "▼");
}

// =============================================================================
// drill-down
// =============================================================================

#[test]
fn select_year_replaces_previous_drill_down() {
    let dashboard = dashboard();
    let mut state = TableState::new();
    state.select_year(&dashboard, 2023);
    assert_eq!(state.drill_down.len(), 2);
    state.select_year(&dashboard, 2021);
    assert_eq!(state.selected_year, Some(2021));
    assert_eq!(state.drill_down, vec![JobTitleCount { job_title: "Research Scientist".into(), count: 1 }]);
}

#[test]
fn select_year_counts_sum_to_total_jobs() {
    let dashboard = dashboard();
    let mut state = TableState::new();
    let total: u64 = state.select_year(&dashboard, 2023).iter().map(|c| c.count).sum();
    assert_eq!(Some(total), dashboard.year(2023).map(|a| a.total_jobs));
}

#[test]
fn clear_selection_drops_drill_down() {
    let dashboard = dashboard();
    let mut state = TableState::new();
    state.select_year(&dashboard, 2022);
    state.clear_selection();
    assert!(state.selected_year.is_none());
    assert!(state.drill_down.is_empty());
}

// =============================================================================
// parsing
// =============================================================================

#[test]
fn sort_key_round_trips_query_names() {
    for key in SortKey::ALL {
        assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
    }
    for dir in [SortDirection::Ascending, SortDirection::Descending] {
        assert_eq!(dir.as_str().parse::<SortDirection>().unwrap(), dir);
    }
}

#[test]
fn sort_parsing_rejects_spelling_variants() {
    for key in ["total_jobs", "total-jobs", "average_salary", "average-salary", "Year", "totaljobs"] {
        assert_eq!(key.parse::<SortKey>().unwrap_err(), SortParseError::UnknownKey(key.into()));
    }
    for dir in ["asc", "desc", "Ascending", "DESCENDING"] {
        assert_eq!(dir.parse::<SortDirection>().unwrap_err(), SortParseError::UnknownDirection(dir.into()));
    }
}

#[test]
fn sort_parse_errors_name_the_value() {
    let err = "salary".parse::<SortKey>().unwrap_err();
    assert_eq!(err, SortParseError::UnknownKey("salary".into()));
    let err = "up".parse::<SortDirection>().unwrap_err();
    assert!(err.to_string().contains("'up'"));
}
