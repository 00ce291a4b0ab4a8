use crate::error::ContribError;
use crate::fetch::{github, gitea, EventClassifier, PlatformClient, ReqwestClient};
use crate::model::{CategoryTotals, WeekGrid};
use crate::palette::{colorize, Theme};
use crate::render::{render_cross, render_heatmap, write_svg, CROSS_FILENAME, MAP_FILENAME};
use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    Github,
    Gitea,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
}

#[derive(Parser, Debug)]
#[command(name = "contribmap")]
#[command(about = "Generate a contribution map and a cross diagram of contribution types for GitHub or Gitea users")]
#[command(version)]
pub struct Cli {
    #[arg(long, value_enum, ignore_case = true, default_value_t = Platform::Github, help = "Platform to use")]
    pub platform: Platform,

    #[arg(long, help = "Username on the chosen platform")]
    pub user: String,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub token (required for GitHub; not needed for Gitea)")]
    pub token: Option<String>,

    #[arg(long, default_value = gitea::DEFAULT_GITEA_URL, help = "Base URL for the Gitea instance")]
    pub gitea_url: String,

    #[arg(long, default_value = github::DEFAULT_GRAPHQL_ENDPOINT, help = "GitHub GraphQL endpoint")]
    pub github_api: String,

    #[arg(long, help = "Use the light color scheme (default is dark)", default_value_t = false)]
    pub light_mode: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Svg, help = "Output format")]
    pub output: OutputFormat,

    #[arg(long, default_value = ".", help = "Directory the images are written to")]
    pub out_dir: PathBuf,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn client(&self) -> std::result::Result<PlatformClient, ContribError> {
        match self.platform {
            Platform::Github => {
                let token = self
                    .token
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        ContribError::Usage(
                            "A GitHub token is required when using the GitHub platform. Provide it using the --token option.".to_string(),
                        )
                    })?;
                Ok(PlatformClient::Github {
                    endpoint: self.github_api.clone(),
                    token: token.to_string(),
                })
            }
            Platform::Gitea => Ok(PlatformClient::Gitea {
                base_url: self.gitea_url.trim_end_matches('/').to_string(),
                classifier: EventClassifier::default(),
            }),
        }
    }

    pub fn execute(self) -> Result<()> {
        if self.user.trim().is_empty() {
            return Err(ContribError::Usage(
                "Please provide a username using the --user option.".to_string(),
            )
            .into());
        }
        let client = self.client()?;
        let theme = Theme::from_light_mode(self.light_mode);

        let (mut grid, totals) = fetch_with_progress(&client, &self.user)
            .with_context(|| format!("Failed to fetch {} contributions", client.name()))?;

        print_summary(&grid, &totals);

        colorize(&mut grid, theme);

        let map_path = self.out_dir.join(MAP_FILENAME);
        let map = match self.output {
            OutputFormat::Svg => render_heatmap(&grid, theme),
        };
        write_svg(&map_path, &map)
            .with_context(|| format!("Failed to write contribution map to {}", map_path.display()))?;
        println!("Contribution map generated and saved to {}", map_path.display());

        let cross_path = self.out_dir.join(CROSS_FILENAME);
        let cross = match self.output {
            OutputFormat::Svg => render_cross(&totals, theme),
        };
        write_svg(&cross_path, &cross)
            .with_context(|| format!("Failed to write cross diagram to {}", cross_path.display()))?;
        println!("Cross diagram generated and saved to {}", cross_path.display());

        Ok(())
    }
}

fn fetch_with_progress(
    client: &PlatformClient,
    user: &str,
) -> crate::error::Result<(WeekGrid, CategoryTotals)> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(match client {
        PlatformClient::Github { .. } => format!("Fetching contributions for GitHub user {user}..."),
        PlatformClient::Gitea { base_url, .. } => {
            format!("Fetching contributions for Gitea user {user} from {base_url}...")
        }
    });
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = ReqwestClient::new()
        .and_then(|http| client.fetch(&http, user, Local::now().date_naive()));

    pb.finish_and_clear();
    result
}

fn print_summary(grid: &WeekGrid, totals: &CategoryTotals) {
    println!(
        "{} {} contributions over {} weeks ({} commits, {} pull requests, {} issues, {} reviews)",
        style("Fetched").bold(),
        style(grid.total_contributions()).cyan(),
        grid.len(),
        style(totals.commits).green(),
        style(totals.pull_requests).green(),
        style(totals.issues).green(),
        style(totals.code_reviews).green(),
    );
}
