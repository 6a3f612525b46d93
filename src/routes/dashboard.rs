//! Dashboard page and its JSON views.
//!
//! DESIGN
//! ======
//! The page is rendered on the server from the mounted [`Dashboard`] and a
//! [`TableState`] rebuilt from the query string, so every interaction is a
//! plain link: header links carry the sort a click would produce and row
//! links select a year while keeping the current sort.

use std::fmt::Write as _;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use dashboard::api::YearTitles;
use dashboard::{ChartSeries, Dashboard, SortDirection, SortKey, SortParseError, SortSpec, TableState, YearAggregate};
use serde::Deserialize;

use crate::state::AppState;

const TITLE: &str = "ML Engineer Salaries";
const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 320.0;
const CHART_PADDING: f64 = 40.0;

// =============================================================================
// QUERY
// =============================================================================

/// Query string shared by the page and `/api/aggregates`.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub year: Option<i32>,
}

impl ViewQuery {
    /// The requested sort. A missing key means natural order; a key without
    /// a direction sorts ascending.
    fn sort_spec(&self) -> Result<Option<SortSpec>, SortParseError> {
        let Some(key) = self.sort.as_deref().filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let key: SortKey = key.parse()?;
        let direction = match self.dir.as_deref().filter(|s| !s.is_empty()) {
            Some(dir) => dir.parse()?,
            None => SortDirection::Ascending,
        };
        Ok(Some(SortSpec { key, direction }))
    }
}

fn bad_request(e: SortParseError) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, e.to_string())
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /`: server-rendered dashboard.
///
/// # Errors
///
/// Returns 400 for an unknown sort key or direction.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Html<String>, (StatusCode, String)> {
    let mut table = TableState::new();
    table.sort = query.sort_spec().map_err(bad_request)?;
    if let Some(year) = query.year {
        table.select_year(&state.dashboard, year);
    }
    Ok(Html(render_page(&state.dashboard, &table)))
}

/// `GET /api/aggregates`: aggregate rows in table order.
///
/// # Errors
///
/// Returns 400 for an unknown sort key or direction.
pub async fn aggregates(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Vec<YearAggregate>>, (StatusCode, String)> {
    let sort = query.sort_spec().map_err(bad_request)?;
    let rows = dashboard::table::sorted_rows(state.dashboard.aggregates(), sort)
        .into_iter()
        .copied()
        .collect();
    Ok(Json(rows))
}

/// `GET /api/years/{year}/titles`: job title counts for one year.
///
/// # Errors
///
/// Returns 404 when the dataset has no records for `year`.
pub async fn year_titles(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Result<Json<YearTitles>, StatusCode> {
    if state.dashboard.year(year).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(YearTitles { year, titles: state.dashboard.job_title_counts(year) }))
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render the full dashboard page for `table` over `dashboard`.
#[must_use]
pub fn render_page(dashboard: &Dashboard, table: &TableState) -> String {
    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{TITLE}</title>\n</head>\n<body>\n<h1>{TITLE}</h1>\n"
    );
    render_chart(&mut html, dashboard);
    render_table(&mut html, dashboard, table);
    if let Some(year) = table.selected_year {
        render_drill_down(&mut html, table, year);
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn render_chart(html: &mut String, dashboard: &Dashboard) {
    let series = ChartSeries::from_aggregates(dashboard.aggregates());
    let points = series.project(CHART_WIDTH, CHART_HEIGHT, CHART_PADDING);

    let _ = write!(
        html,
        "<section id=\"chart\">\n<h2>{}</h2>\n<svg width=\"{CHART_WIDTH}\" height=\"{CHART_HEIGHT}\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" role=\"img\">\n",
        escape_html(series.label)
    );
    if !points.is_empty() {
        let coords: Vec<String> = points.iter().map(|p| format!("{:.1},{:.1}", p.x, p.y)).collect();
        let _ = writeln!(
            html,
            "<polyline fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\" points=\"{}\"/>",
            coords.join(" ")
        );
    }
    let baseline = CHART_HEIGHT - CHART_PADDING;
    for p in &points {
        let _ = writeln!(
            html,
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"3\"><title>{}: {}</title></circle>",
            p.x, p.y, p.year, p.total_jobs
        );
        let _ = writeln!(
            html,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>",
            p.x,
            baseline + 16.0,
            p.year
        );
    }
    html.push_str("</svg>\n</section>\n");
}

fn render_table(html: &mut String, dashboard: &Dashboard, table: &TableState) {
    html.push_str("<section id=\"table\">\n<table>\n<thead>\n<tr>");
    for key in SortKey::ALL {
        let next = SortSpec::after_click(table.sort, key);
        let _ = write!(
            html,
            "<th><a href=\"{}\">{} {}</a></th>",
            escape_html(&view_href(Some(next), table.selected_year)),
            escape_html(key.label()),
            table.indicator(key).glyph()
        );
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in table.rows(dashboard) {
        let _ = writeln!(
            html,
            "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td></tr>",
            escape_html(&view_href(table.sort, Some(row.year))),
            row.year,
            row.total_jobs,
            format_usd(row.average_salary)
        );
    }
    html.push_str("</tbody>\n</table>\n</section>\n");
}

fn render_drill_down(html: &mut String, table: &TableState, year: i32) {
    let _ = write!(
        html,
        "<section id=\"drill-down\">\n<h2>Job Titles in {year}</h2>\n<table>\n<thead>\n<tr><th>Job Title</th><th>Count</th></tr>\n</thead>\n<tbody>\n"
    );
    for title in &table.drill_down {
        let _ = writeln!(html, "<tr><td>{}</td><td>{}</td></tr>", escape_html(&title.job_title), title.count);
    }
    let _ = write!(
        html,
        "</tbody>\n</table>\n<a href=\"{}\">Close</a>\n</section>\n",
        escape_html(&view_href(table.sort, None))
    );
}

/// Page link for a sort spec and selected year.
fn view_href(sort: Option<SortSpec>, year: Option<i32>) -> String {
    let mut params = Vec::new();
    if let Some(spec) = sort {
        params.push(format!("sort={}", spec.key));
        params.push(format!("dir={}", spec.direction));
    }
    if let Some(year) = year {
        params.push(format!("year={year}"));
    }
    if params.is_empty() { "/".to_string() } else { format!("/?{}", params.join("&")) }
}

/// `$` followed by the amount with two decimals.
fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
