use super::escape;
use crate::model::{MonthLabel, WeekGrid, DAYS_PER_WEEK};
use crate::palette::Theme;
use chrono::Datelike;
use std::fmt::Write;

pub const CELL_SIZE: u32 = 12;
pub const CELL_MARGIN: u32 = 2;
pub const TOP_MARGIN: u32 = 20;

const CELL_STEP: u32 = CELL_SIZE + CELL_MARGIN;
const DARK_STROKE: &str = "#333333";

fn week_x(week_index: usize) -> u32 {
    CELL_MARGIN + week_index as u32 * CELL_STEP
}

/// One label per week containing the 1st of a month, unless it would repeat
/// the previously emitted label.
pub fn month_labels(grid: &WeekGrid) -> Vec<MonthLabel> {
    let mut labels: Vec<MonthLabel> = Vec::new();
    for (week_index, week) in grid.weeks.iter().enumerate() {
        let first_of_month = week
            .iter()
            .filter_map(|day| day.parsed_date())
            .find(|date| date.day() == 1);
        let Some(date) = first_of_month else {
            continue;
        };
        let label = date.format("%b").to_string();
        if labels.last().map(|l| l.label != label).unwrap_or(true) {
            labels.push(MonthLabel {
                x: week_x(week_index),
                label,
            });
        }
    }
    labels
}

/// Renders an already colorized grid.
pub fn render_heatmap(grid: &WeekGrid, theme: Theme) -> String {
    let width = grid.len() as u32 * CELL_STEP + CELL_MARGIN;
    let height = TOP_MARGIN + DAYS_PER_WEEK as u32 * CELL_STEP + CELL_MARGIN;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#
    );
    let _ = writeln!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        theme.background()
    );

    for label in month_labels(grid) {
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" fill="{}" font-family="sans-serif" font-size="10px">{}</text>"#,
            label.x,
            TOP_MARGIN - 4,
            theme.text(),
            escape(&label.label)
        );
    }

    let stroke = match theme {
        Theme::Dark => format!(r#" stroke="{DARK_STROKE}" stroke-width="1""#),
        Theme::Light => String::new(),
    };

    for (week_index, week) in grid.weeks.iter().enumerate() {
        for (day_index, day) in week.iter().enumerate() {
            let x = week_x(week_index);
            let y = TOP_MARGIN + CELL_MARGIN + day_index as u32 * CELL_STEP;
            let tooltip = if day.is_padding() {
                String::new()
            } else {
                escape(&format!("{}: {} contributions", day.date, day.count))
            };
            let _ = writeln!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{CELL_SIZE}\" height=\"{CELL_SIZE}\" fill=\"{}\"{stroke}>\n  <title>{tooltip}</title>\n</rect>",
                escape(&day.color)
            );
        }
    }

    svg.push_str("</svg>");
    svg
}
