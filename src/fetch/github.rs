use super::http::HttpClient;
use crate::error::{ContribError, Result};
use crate::model::{CategoryTotals, ContributionDay, WeekGrid, DAYS_PER_WEEK};
use chrono::Datelike;
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      totalCommitContributions
      totalPullRequestContributions
      totalIssueContributions
      totalPullRequestReviewContributions
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
    pub total_commit_contributions: u32,
    pub total_pull_request_contributions: u32,
    pub total_issue_contributions: u32,
    pub total_pull_request_review_contributions: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    pub total_contributions: u32,
    pub weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub contribution_days: Vec<CalendarDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: String,
    pub contribution_count: u32,
}

pub fn fetch(
    client: &dyn HttpClient,
    endpoint: &str,
    user: &str,
    token: &str,
) -> Result<(WeekGrid, CategoryTotals)> {
    let request = json!({
        "query": CONTRIBUTIONS_QUERY,
        "variables": { "login": user },
    });
    let response = client
        .post_json(endpoint, &request, Some(token))?
        .ensure_success("GitHub")?;
    let collection = parse_response(&response.body)?;
    Ok(normalize(collection))
}

fn parse_response(body: &str) -> Result<ContributionsCollection> {
    let parsed: GraphQlResponse = serde_json::from_str(body)?;
    match parsed.data.and_then(|d| d.user) {
        Some(user) => Ok(user.contributions_collection),
        None => {
            let message = if parsed.errors.is_empty() {
                body.to_string()
            } else {
                parsed
                    .errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            Err(ContribError::GraphQl(message))
        }
    }
}

/// Calendar weeks are already Sunday-first, so they are copied through.
/// A short week is padded to seven cells: in front when its first day falls
/// after Sunday, otherwise at the end.
pub fn normalize(collection: ContributionsCollection) -> (WeekGrid, CategoryTotals) {
    let weeks = collection
        .contribution_calendar
        .weeks
        .into_iter()
        .map(|week| {
            let mut days: Vec<ContributionDay> = week
                .contribution_days
                .into_iter()
                .map(|day| ContributionDay {
                    date: day.date,
                    count: day.contribution_count,
                    color: String::new(),
                })
                .collect();
            let lead = days
                .first()
                .and_then(ContributionDay::parsed_date)
                .map(|d| d.weekday().num_days_from_sunday() as usize)
                .unwrap_or(0);
            if lead > 0 && days.len() + lead <= DAYS_PER_WEEK {
                days.splice(0..0, std::iter::repeat(ContributionDay::padding()).take(lead));
            }
            days.resize(DAYS_PER_WEEK, ContributionDay::padding());
            days
        })
        .collect();

    let totals = CategoryTotals {
        commits: collection.total_commit_contributions,
        pull_requests: collection.total_pull_request_contributions,
        issues: collection.total_issue_contributions,
        code_reviews: collection.total_pull_request_review_contributions,
    };

    (WeekGrid::new(weeks), totals)
}
