use crate::model::{Category, CategoryTotals};
use crate::palette::Theme;
use std::fmt::Write;

pub const WIDTH: u32 = 300;
pub const HEIGHT: u32 = 300;
pub const CENTER_X: u32 = WIDTH / 2;
pub const CENTER_Y: u32 = HEIGHT / 2;

const TOP_Y: u32 = 50;
const BOTTOM_Y: u32 = 250;
const LEFT_X: u32 = 50;
const RIGHT_X: u32 = 250;
const PERCENT_OFFSET: u32 = 18;
const INDICATOR_RADIUS: u32 = 10;

struct Arm {
    category: Category,
    label: &'static str,
    x: u32,
    y: u32,
}

const ARMS: [Arm; 4] = [
    Arm {
        category: Category::CodeReviews,
        label: "Code Reviews",
        x: CENTER_X,
        y: TOP_Y,
    },
    Arm {
        category: Category::PullRequests,
        label: "Pull Requests",
        x: CENTER_X,
        y: BOTTOM_Y,
    },
    Arm {
        category: Category::Commits,
        label: "Commits",
        x: LEFT_X,
        y: CENTER_Y,
    },
    Arm {
        category: Category::Issues,
        label: "Issues",
        x: RIGHT_X,
        y: CENTER_Y,
    },
];

/// Interpolates `from -> to` by `toward / (away + toward)`, or returns
/// `center` when the pair is empty.
fn blend(away: u32, toward: u32, from: u32, to: u32, center: u32) -> f64 {
    let pair = away as u64 + toward as u64;
    if pair == 0 {
        return center as f64;
    }
    from as f64 + toward as f64 / pair as f64 * (to as f64 - from as f64)
}

/// Horizontal position leans from Commits (left) to Issues (right); vertical
/// from Code Reviews (top) to Pull Requests (bottom). Cross pairs are ignored.
pub fn indicator_point(totals: &CategoryTotals) -> (f64, f64) {
    let x = blend(totals.commits, totals.issues, LEFT_X, RIGHT_X, CENTER_X);
    let y = blend(totals.code_reviews, totals.pull_requests, TOP_Y, BOTTOM_Y, CENTER_Y);
    (x, y)
}

pub fn render_cross(totals: &CategoryTotals, theme: Theme) -> String {
    let accent = theme.brightest();
    let text = theme.mid();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg width="{WIDTH}" height="{HEIGHT}" xmlns="http://www.w3.org/2000/svg">"#
    );
    let _ = writeln!(
        svg,
        r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="{}"/>"#,
        theme.background()
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{CENTER_X}" y1="0" x2="{CENTER_X}" y2="{HEIGHT}" stroke="{accent}" stroke-dasharray="4"/>"#
    );
    let _ = writeln!(
        svg,
        r#"<line x1="0" y1="{CENTER_Y}" x2="{WIDTH}" y2="{CENTER_Y}" stroke="{accent}" stroke-dasharray="4"/>"#
    );

    for arm in &ARMS {
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="14px" fill="{text}">{}</text>"#,
            arm.x, arm.y, arm.label
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12px" fill="{text}">{:.1}%</text>"#,
            arm.x,
            arm.y + PERCENT_OFFSET,
            totals.percentage(arm.category)
        );
    }

    let (cx, cy) = indicator_point(totals);
    let _ = writeln!(
        svg,
        r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{INDICATOR_RADIUS}" fill="{accent}"/>"#
    );

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn totals(commits: u32, pull_requests: u32, issues: u32, code_reviews: u32) -> CategoryTotals {
        CategoryTotals {
            commits,
            pull_requests,
            issues,
            code_reviews,
        }
    }

    fn percentages(svg: &str) -> Vec<f64> {
        svg.lines()
            .filter(|l| l.contains(r#"font-size="12px""#))
            .filter_map(|l| {
                let start = l.find('>')? + 1;
                let end = l.find("%</text>")?;
                l[start..end].parse().ok()
            })
            .collect()
    }

    #[test]
    fn empty_totals_center_the_indicator() {
        assert_eq!(indicator_point(&CategoryTotals::default()), (150.0, 150.0));
        let svg = render_cross(&CategoryTotals::default(), Theme::Dark);
        assert!(svg.contains(r##"<circle cx="150.0" cy="150.0" r="10" fill="#1AFF1A"/>"##));
        assert_eq!(percentages(&svg), vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn percentages_sum_to_hundred() {
        let svg = render_cross(&totals(3, 1, 1, 1), Theme::Light);
        let values = percentages(&svg);
        assert_eq!(values.len(), 4);
        let sum: f64 = values.iter().sum();
        assert!((sum - 100.0).abs() <= 0.2, "sum was {sum}");
    }

    #[test]
    fn arms_are_placed_at_compass_points() {
        let svg = render_cross(&totals(1, 0, 0, 0), Theme::Dark);
        assert!(svg.contains(r##"x="150" y="50" text-anchor="middle" font-family="sans-serif" font-size="14px" fill="#129012">Code Reviews<"##));
        assert!(svg.contains(r#"x="150" y="250""#) && svg.contains(">Pull Requests<"));
        assert!(svg.contains(r#"x="50" y="168""#) && svg.contains(">100.0%<"));
        assert!(svg.contains(r#"x="250" y="150""#) && svg.contains(">Issues<"));
    }

    #[test]
    fn indicator_blends_each_axis_independently() {
        assert_eq!(indicator_point(&totals(1, 0, 0, 0)), (50.0, 150.0));
        assert_eq!(indicator_point(&totals(0, 0, 4, 0)), (250.0, 150.0));
        assert_eq!(indicator_point(&totals(1, 3, 1, 1)), (150.0, 200.0));
        assert_eq!(indicator_point(&totals(0, 0, 0, 9)), (150.0, 50.0));
    }

    #[test]
    fn guide_lines_use_brightest_color() {
        let svg = render_cross(&totals(2, 2, 2, 2), Theme::Light);
        assert_eq!(svg.matches(r##"stroke="#c6f7d0" stroke-dasharray="4""##).count(), 2);
        assert!(svg.contains(r##"<rect width="300" height="300" fill="#ffffff"/>"##));
    }
}
