use super::http::HttpClient;
use crate::error::{ContribError, Result};
use crate::model::{Category, CategoryTotals, ContributionDay, Week, WeekGrid, DAYS_PER_WEEK};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Weekday};
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

pub const DEFAULT_GITEA_URL: &str = "https://try.gitea.io";

/// Days covered by the synthesized calendar, ending today.
const WINDOW_DAYS: i64 = 365;

#[derive(Debug, Clone, Deserialize)]
pub struct GiteaEvent {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub op_type: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl GiteaEvent {
    pub fn event_type(&self) -> &str {
        self.kind
            .as_deref()
            .or(self.op_type.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Contains,
}

#[derive(Debug, Clone)]
struct Rule {
    pattern: String,
    kind: MatchKind,
    category: Category,
}

/// Ordered, first-match-wins mapping from event type to category.
/// Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    rules: Vec<Rule>,
}

impl EventClassifier {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, pattern: &str, kind: MatchKind, category: Category) -> Self {
        self.rules.push(Rule {
            pattern: pattern.to_lowercase(),
            kind,
            category,
        });
        self
    }

    pub fn classify(&self, event_type: &str) -> Option<Category> {
        let event_type = event_type.to_lowercase();
        self.rules
            .iter()
            .find(|rule| match rule.kind {
                MatchKind::Exact => event_type == rule.pattern,
                MatchKind::Contains => event_type.contains(&rule.pattern),
            })
            .map(|rule| rule.category)
    }
}

impl Default for EventClassifier {
    fn default() -> Self {
        use Category::*;
        use MatchKind::*;

        // Comments and reviews come before the broader "pull"/"issue" rules so
        // that "comment_pull" or "PullRequestReviewEvent" land on reviews.
        Self::empty()
            .with_rule("pushevent", Exact, Commits)
            .with_rule("pullrequestevent", Exact, PullRequests)
            .with_rule("issueevent", Exact, Issues)
            .with_rule("issuestatechangeevent", Exact, Issues)
            .with_rule("pullrequestcommentevent", Exact, CodeReviews)
            .with_rule("pullrequestreviewevent", Exact, CodeReviews)
            .with_rule("review", Contains, CodeReviews)
            .with_rule("comment", Contains, CodeReviews)
            .with_rule("approve", Contains, CodeReviews)
            .with_rule("reject", Contains, CodeReviews)
            .with_rule("push", Contains, Commits)
            .with_rule("commit", Contains, Commits)
            .with_rule("pull", Contains, PullRequests)
            .with_rule("issue", Contains, Issues)
    }
}

/// `<base>/api/v1/users/<user>/events`, with `user` encoded as one segment.
pub fn events_url(base_url: &str, user: &str) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| ContribError::Usage(format!("Gitea URL cannot be a base: {base_url}")))?
        .pop_if_empty()
        .extend(["api", "v1", "users", user, "events"]);
    Ok(url.into())
}

pub fn fetch(
    client: &dyn HttpClient,
    base_url: &str,
    user: &str,
    classifier: &EventClassifier,
    today: NaiveDate,
) -> Result<(WeekGrid, CategoryTotals)> {
    let response = client
        .get(&events_url(base_url, user)?)?
        .ensure_success("Gitea")?;
    let events: Vec<GiteaEvent> = serde_json::from_str(&response.body)?;
    Ok(normalize(&events, classifier, today))
}

pub fn normalize(
    events: &[GiteaEvent],
    classifier: &EventClassifier,
    today: NaiveDate,
) -> (WeekGrid, CategoryTotals) {
    let (daily, totals) = aggregate(events, classifier);
    (build_grid(&daily, today), totals)
}

/// Counts events per calendar day (in the timestamp's own offset) and per
/// category. Events with unparsable timestamps are skipped entirely.
pub fn aggregate(
    events: &[GiteaEvent],
    classifier: &EventClassifier,
) -> (HashMap<NaiveDate, u32>, CategoryTotals) {
    let mut daily: HashMap<NaiveDate, u32> = HashMap::new();
    let mut totals = CategoryTotals::default();

    for event in events {
        let Ok(timestamp) = DateTime::parse_from_rfc3339(&event.created_at) else {
            continue;
        };
        *daily.entry(timestamp.date_naive()).or_insert(0) += 1;

        if let Some(category) = classifier.classify(event.event_type()) {
            totals.record(category);
        }
    }

    (daily, totals)
}

/// Sunday-first weeks from the Sunday on or before `today - 364` through
/// `today`, with the last partial week padded out to seven cells.
pub fn build_grid(daily: &HashMap<NaiveDate, u32>, today: NaiveDate) -> WeekGrid {
    let window_start = today - Duration::days(WINDOW_DAYS - 1);
    let mut current =
        window_start - Duration::days(window_start.weekday().num_days_from_sunday() as i64);

    let mut weeks: Vec<Week> = Vec::new();
    let mut week: Week = Vec::with_capacity(DAYS_PER_WEEK);
    while current <= today {
        let count = daily.get(&current).copied().unwrap_or(0);
        week.push(ContributionDay::new(current, count));
        if current.weekday() == Weekday::Sat {
            weeks.push(std::mem::take(&mut week));
        }
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    if !week.is_empty() {
        week.resize(DAYS_PER_WEEK, ContributionDay::padding());
        weeks.push(week);
    }

    WeekGrid::new(weeks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::http::mock::MockHttpClient;

    fn event(kind: &str, created_at: &str) -> GiteaEvent {
        GiteaEvent {
            kind: Some(kind.to_string()),
            op_type: None,
            created_at: created_at.to_string(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn push_and_pull_request_on_same_day() {
        let events = vec![
            event("PushEvent", "2024-01-01T10:00:00Z"),
            event("PullRequestEvent", "2024-01-01T11:00:00Z"),
        ];
        let (grid, totals) = normalize(&events, &EventClassifier::default(), date(2024, 6, 1));

        let day = grid.days().find(|d| d.date == "2024-01-01").unwrap();
        assert_eq!(day.count, 2);
        assert_eq!(
            totals,
            CategoryTotals {
                commits: 1,
                pull_requests: 1,
                issues: 0,
                code_reviews: 0
            }
        );
    }

    #[test]
    fn day_boundary_follows_timestamp_offset() {
        let events = vec![event("PushEvent", "2024-03-10T23:30:00-05:00")];
        let (daily, _) = aggregate(&events, &EventClassifier::default());
        assert_eq!(daily.get(&date(2024, 3, 10)), Some(&1));
        assert_eq!(daily.get(&date(2024, 3, 11)), None);
    }

    #[test]
    fn unparsable_timestamps_are_skipped() {
        let events = vec![
            event("PushEvent", "yesterday"),
            event("PushEvent", "2024-01-02T08:00:00Z"),
        ];
        let (daily, totals) = aggregate(&events, &EventClassifier::default());
        assert_eq!(daily.values().sum::<u32>(), 1);
        assert_eq!(totals.commits, 1);
    }

    #[test]
    fn unknown_types_count_toward_day_only() {
        let events = vec![event("CreateRepoEvent", "2024-01-02T08:00:00Z")];
        let (daily, totals) = aggregate(&events, &EventClassifier::default());
        assert_eq!(daily.get(&date(2024, 1, 2)), Some(&1));
        assert_eq!(totals.total(), 0);
    }

    #[test]
    fn default_classifier_mapping() {
        let c = EventClassifier::default();
        assert_eq!(c.classify("PushEvent"), Some(Category::Commits));
        assert_eq!(c.classify("commit_repo"), Some(Category::Commits));
        assert_eq!(c.classify("PULLREQUESTEVENT"), Some(Category::PullRequests));
        assert_eq!(c.classify("merge_pull_request"), Some(Category::PullRequests));
        assert_eq!(c.classify("IssueStateChangeEvent"), Some(Category::Issues));
        assert_eq!(c.classify("create_issue"), Some(Category::Issues));
        assert_eq!(c.classify("PullRequestReviewEvent"), Some(Category::CodeReviews));
        assert_eq!(c.classify("comment_pull"), Some(Category::CodeReviews));
        assert_eq!(c.classify("approve_pull_request"), Some(Category::CodeReviews));
        assert_eq!(c.classify("create_repo"), None);
    }

    #[test]
    fn classifier_is_extensible() {
        let c = EventClassifier::default().with_rule("Release", MatchKind::Contains, Category::Commits);
        assert_eq!(c.classify("publish_release"), Some(Category::Commits));
    }

    #[test]
    fn op_type_is_used_when_type_missing() {
        let e = GiteaEvent {
            kind: None,
            op_type: Some("create_pull_request".to_string()),
            created_at: "2024-01-02T08:00:00Z".to_string(),
        };
        let (_, totals) = aggregate(&[e], &EventClassifier::default());
        assert_eq!(totals.pull_requests, 1);
    }

    #[test]
    fn grid_starts_on_sunday_and_ends_today() {
        // 2024-06-05 is a Wednesday.
        let today = date(2024, 6, 5);
        let grid = build_grid(&HashMap::new(), today);

        let first = grid.weeks[0][0].parsed_date().unwrap();
        assert_eq!(first.weekday(), Weekday::Sun);
        assert!(first <= today - Duration::days(364));
        assert!(first > today - Duration::days(371));

        assert!(grid.weeks.iter().all(|w| w.len() == 7));
        let last = grid.weeks.last().unwrap();
        assert_eq!(last[3].date, "2024-06-05");
        for pad in &last[4..] {
            assert!(pad.is_padding());
            assert_eq!(pad.count, 0);
        }
    }

    #[test]
    fn saturday_today_needs_no_padding() {
        let today = date(2024, 6, 8);
        let grid = build_grid(&HashMap::new(), today);
        let last = grid.weeks.last().unwrap();
        assert_eq!(last[6].date, "2024-06-08");
        assert!(grid.days().all(|d| !d.is_padding()));
    }

    #[test]
    fn events_outside_window_are_not_placed() {
        let events = vec![event("PushEvent", "2020-01-01T00:00:00Z")];
        let (grid, totals) = normalize(&events, &EventClassifier::default(), date(2024, 6, 5));
        assert_eq!(grid.total_contributions(), 0);
        assert_eq!(totals.commits, 1);
    }

    #[test]
    fn fetch_hits_events_endpoint() {
        let body = r#"[{"type":"PushEvent","created_at":"2024-06-01T09:00:00Z"}]"#;
        let client = MockHttpClient::new(200, body);
        let (grid, totals) = fetch(
            &client,
            "https://gitea.example.com/",
            "alice",
            &EventClassifier::default(),
            date(2024, 6, 5),
        )
        .unwrap();

        assert_eq!(
            client.requests.borrow()[0].0,
            "https://gitea.example.com/api/v1/users/alice/events"
        );
        assert_eq!(grid.total_contributions(), 1);
        assert_eq!(totals.commits, 1);
    }

    #[test]
    fn events_url_encodes_user_segment() {
        assert_eq!(
            events_url("https://gitea.example.com", "alice").unwrap(),
            "https://gitea.example.com/api/v1/users/alice/events"
        );
        assert_eq!(
            events_url("https://example.com/gitea/", "a b/c?d").unwrap(),
            "https://example.com/gitea/api/v1/users/a%20b%2Fc%3Fd/events"
        );
    }

    #[test]
    fn events_url_rejects_bad_base() {
        assert!(matches!(
            events_url("not a url", "alice"),
            Err(ContribError::InvalidUrl(_))
        ));
        assert!(matches!(
            events_url("mailto:alice@example.com", "alice"),
            Err(ContribError::Usage(_))
        ));
    }

    #[test]
    fn fetch_reports_upstream_body() {
        let client = MockHttpClient::new(404, "user does not exist");
        let err = fetch(
            &client,
            DEFAULT_GITEA_URL,
            "ghost",
            &EventClassifier::default(),
            date(2024, 6, 5),
        )
        .unwrap_err();
        assert!(matches!(err, ContribError::Upstream { status: 404, .. }));
        assert!(err.to_string().contains("user does not exist"));
    }
}
