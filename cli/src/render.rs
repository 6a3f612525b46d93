//! Plain-text rendering of the dashboard views.

use std::fmt::Write as _;

use dashboard::{ChartSeries, ChatMessage, Dashboard, Sender, SortKey, TableState};

/// Aggregate table in display order, followed by the drill-down when a year
/// is selected.
#[must_use]
pub fn render_table(dashboard: &Dashboard, table: &TableState) -> String {
    let header: Vec<String> = SortKey::ALL
        .iter()
        .map(|&key| format!("{} {}", key.label(), table.indicator(key).glyph()))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{:<8} {:>14} {:>24}", header[0], header[1], header[2]);
    for row in table.rows(dashboard) {
        let _ = writeln!(out, "{:<8} {:>14} {:>24}", row.year, row.total_jobs, format!("${:.2}", row.average_salary));
    }

    if let Some(year) = table.selected_year {
        let _ = writeln!(out, "\nJob Titles in {year}");
        let width = table
            .drill_down
            .iter()
            .map(|t| t.job_title.chars().count())
            .max()
            .unwrap_or(0)
            .max("Job Title".len());
        let _ = writeln!(out, "{:<width$}  {:>5}", "Job Title", "Count");
        for title in &table.drill_down {
            let _ = writeln!(out, "{:<width$}  {:>5}", title.job_title, title.count);
        }
    }
    out
}

/// Line chart drawn on a `width` x `height` character grid. Points are `*`,
/// the segments between them `.`, and years label the x axis.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn render_chart(series: &ChartSeries, width: usize, height: usize) -> String {
    let mut out = format!("{} (max {})\n", series.label, series.max_value());
    if series.points.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let width = width.max(2);
    let height = height.max(2);
    let mut grid = vec![vec![' '; width]; height];
    let cell = |x: f64, y: f64| (x.round().max(0.0) as usize, y.round().max(0.0) as usize);

    let points = series.project((width - 1) as f64, (height - 1) as f64, 0.0);
    for pair in points.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let (col, row) = cell(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t);
            if let Some(c) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                if *c == ' ' {
                    *c = '.';
                }
            }
        }
    }
    for p in &points {
        let (col, row) = cell(p.x, p.y);
        if let Some(c) = grid.get_mut(row).and_then(|r| r.get_mut(col)) {
            *c = '*';
        }
    }

    for row in &grid {
        let line: String = row.iter().collect();
        let _ = writeln!(out, "|{}", line.trim_end());
    }
    let _ = writeln!(out, "+{}", "-".repeat(width));

    let mut labels = vec![' '; width + 4];
    let mut next_free = 0;
    for p in &points {
        let (col, _) = cell(p.x, p.y);
        let text = p.year.to_string();
        let start = col.saturating_sub(text.len() / 2).max(next_free);
        if start + text.len() > labels.len() {
            break;
        }
        for (i, ch) in text.chars().enumerate() {
            labels[start + i] = ch;
        }
        next_free = start + text.len() + 1;
    }
    let labels: String = labels.into_iter().collect();
    let _ = writeln!(out, " {}", labels.trim_end());
    out
}

/// One transcript line.
#[must_use]
pub fn render_message(message: &ChatMessage) -> String {
    match message.sender {
        Sender::User => format!("you> {}", message.text),
        Sender::Bot => format!("bot> {}", message.text),
    }
}
