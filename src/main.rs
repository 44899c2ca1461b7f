use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use ghrecap::ai::{self, OpenAiProvider, SummaryProvider, SummaryRequest};
use ghrecap::models::ReportModel;
use ghrecap::report::{
    build_readme, build_snapshot, with_language_placeholders, with_repo_placeholders,
    TOP_LANGUAGE_SLOTS, TOP_REPO_SLOTS,
};
use ghrecap::timezone::{current_year_in_zone, resolve_time_zone};
use ghrecap::{
    derive_top_languages, derive_top_repositories, derive_yearly_statistics, Config, Error,
    GitHubClient, StatsOptions,
};

#[derive(Parser, Debug)]
#[command(name = "ghrecap")]
#[command(version = "0.1.0")]
#[command(about = "Generate a GitHub year-in-review report")]
struct Args {
    /// GitHub username to report on (falls back to GH_USERNAME)
    #[arg(short, long)]
    username: Option<String>,

    /// Report year (defaults to the current year in the report timezone)
    #[arg(short, long)]
    year: Option<i32>,

    /// IANA timezone for date bucketing (falls back to REPORT_TZ)
    #[arg(short, long)]
    timezone: Option<String>,

    /// Directory for the SVG/HTML/JSON outputs
    #[arg(long, default_value = "assets")]
    output_dir: PathBuf,

    /// Print a summary instead of writing files
    #[arg(long)]
    dry_run: bool,

    /// Skip the AI call and use the rule-based summary
    #[arg(long)]
    no_ai: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ghrecap=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    let username = args
        .username
        .or(config.username.clone())
        .ok_or_else(|| Error::Config("set --username or GH_USERNAME".to_string()))?;

    let tz_name = args.timezone.unwrap_or_else(|| config.time_zone.clone());
    let time_zone = resolve_time_zone(&tz_name)?;
    let year = resolve_report_year(args.year, time_zone)?;

    let client = GitHubClient::new(&config.github_token)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("Fetching GitHub data for {username} ({year})"));

    let (profile_data, issues_count) = tokio::try_join!(
        client.fetch_yearly_profile_data(&username, year),
        client.fetch_issue_count(&username, year),
    )?;

    spinner.finish_and_clear();

    let stats = derive_yearly_statistics(
        &profile_data.calendar,
        &StatsOptions { year, time_zone },
    )?;
    tracing::info!(
        "Derived statistics: {} contributions over {} weeks",
        stats.total_contributions,
        profile_data.calendar.weeks.len()
    );

    let top_repos = with_repo_placeholders(derive_top_repositories(
        &profile_data.repo_contributions,
        TOP_REPO_SLOTS,
    ));
    let top_languages = with_language_placeholders(derive_top_languages(
        &profile_data.repo_contributions,
        TOP_LANGUAGE_SLOTS,
    ));

    let provider = if args.no_ai {
        None
    } else {
        match &config.openai_api_key {
            Some(key) => Some(OpenAiProvider::new(
                key.clone(),
                &config.openai_base_url,
                config.openai_model.clone(),
            )?),
            None => None,
        }
    };

    let request = SummaryRequest {
        username: &profile_data.user.login,
        year,
        stats: &stats,
        issues_count,
        top_languages: &top_languages,
        top_repos: &top_repos,
    };
    let ai_summary = ai::generate_summary(
        provider.as_ref().map(|p| p as &dyn SummaryProvider),
        &request,
    )
    .await;

    let model = ReportModel {
        profile: profile_data.user,
        year,
        stats,
        issues_count,
        top_repos,
        top_languages,
        ai_summary,
    };

    let snapshot = build_snapshot(&model, &tz_name, profile_data.rate_limit, Utc::now());

    if args.dry_run {
        let summary = serde_json::json!({
            "generatedAt": snapshot.generated_at,
            "username": model.profile.login,
            "year": year,
            "totalContributions": model.stats.total_contributions,
            "averageContributionsPerDay": model.stats.average_contributions_per_day,
            "maxContributionsMonth": model.stats.max_contributions_month,
            "aiMode": snapshot.ai_mode,
            "issuesCount": issues_count,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir)?;

    let svg_path = args.output_dir.join("github-annual-report.svg");
    let html_path = args.output_dir.join("github-annual-report.html");
    let json_path = args.output_dir.join("github-annual-report.json");
    let readme_path = PathBuf::from("README.md");

    std::fs::write(&svg_path, ghrecap::render_yearly_report_svg(&model))?;
    std::fs::write(&html_path, ghrecap::render_report_html(&model))?;
    std::fs::write(
        &json_path,
        format!("{}\n", serde_json::to_string_pretty(&snapshot)?),
    )?;
    std::fs::write(&readme_path, build_readme(&model.profile.login))?;

    tracing::info!("Updated report: {}", svg_path.display());
    tracing::info!("Updated page: {}", html_path.display());
    tracing::info!("Updated snapshot: {}", json_path.display());
    tracing::info!("Updated README: {}", readme_path.display());

    Ok(())
}

fn resolve_report_year(arg_year: Option<i32>, time_zone: chrono_tz::Tz) -> Result<i32, Error> {
    let year = arg_year.unwrap_or_else(|| current_year_in_zone(time_zone));

    if !(2008..=2100).contains(&year) {
        return Err(Error::InvalidYear(year));
    }

    Ok(year)
}
