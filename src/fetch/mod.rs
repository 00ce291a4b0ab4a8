pub mod gitea;
pub mod github;
pub mod http;

pub use gitea::{EventClassifier, GiteaEvent, MatchKind};
pub use http::{HttpClient, HttpResponse, ReqwestClient};

use crate::error::Result;
use crate::model::{CategoryTotals, WeekGrid};
use chrono::NaiveDate;

/// A configured upstream source of contribution data.
#[derive(Debug, Clone)]
pub enum PlatformClient {
    Github {
        endpoint: String,
        token: String,
    },
    Gitea {
        base_url: String,
        classifier: EventClassifier,
    },
}

impl PlatformClient {
    pub fn name(&self) -> &'static str {
        match self {
            PlatformClient::Github { .. } => "GitHub",
            PlatformClient::Gitea { .. } => "Gitea",
        }
    }

    /// Fetches and normalizes one user's activity. `today` anchors the
    /// trailing year for sources that only return raw events.
    pub fn fetch(
        &self,
        http: &dyn HttpClient,
        user: &str,
        today: NaiveDate,
    ) -> Result<(WeekGrid, CategoryTotals)> {
        match self {
            PlatformClient::Github { endpoint, token } => github::fetch(http, endpoint, user, token),
            PlatformClient::Gitea {
                base_url,
                classifier,
            } => gitea::fetch(http, base_url, user, classifier, today),
        }
    }
}
