use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;

/// One cell of the calendar grid. An empty `date` marks a padding cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    pub date: String,
    pub count: u32,
    pub color: String,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            count,
            color: String::new(),
        }
    }

    pub fn padding() -> Self {
        Self {
            date: String::new(),
            count: 0,
            color: String::new(),
        }
    }

    pub fn is_padding(&self) -> bool {
        self.date.is_empty()
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        if self.is_padding() {
            return None;
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Sunday-first days of a single calendar week.
pub type Week = Vec<ContributionDay>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub weeks: Vec<Week>,
}

impl WeekGrid {
    pub fn new(weeks: Vec<Week>) -> Self {
        Self { weeks }
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flatten()
    }

    pub fn days_mut(&mut self) -> impl Iterator<Item = &mut ContributionDay> {
        self.weeks.iter_mut().flatten()
    }

    pub fn max_count(&self) -> u32 {
        self.days().map(|d| d.count).max().unwrap_or(0)
    }

    pub fn total_contributions(&self) -> u64 {
        self.days().map(|d| d.count as u64).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Commits,
    PullRequests,
    Issues,
    CodeReviews,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub commits: u32,
    pub pull_requests: u32,
    pub issues: u32,
    pub code_reviews: u32,
}

impl CategoryTotals {
    pub fn total(&self) -> u64 {
        self.commits as u64
            + self.pull_requests as u64
            + self.issues as u64
            + self.code_reviews as u64
    }

    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Commits => self.commits,
            Category::PullRequests => self.pull_requests,
            Category::Issues => self.issues,
            Category::CodeReviews => self.code_reviews,
        }
    }

    pub fn record(&mut self, category: Category) {
        let slot = match category {
            Category::Commits => &mut self.commits,
            Category::PullRequests => &mut self.pull_requests,
            Category::Issues => &mut self.issues,
            Category::CodeReviews => &mut self.code_reviews,
        };
        *slot += 1;
    }

    /// Share of `category` in percent; zero when nothing was recorded.
    pub fn percentage(&self, category: Category) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(category) as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLabel {
    pub x: u32,
    pub label: String,
}
