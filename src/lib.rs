pub mod ai;
pub mod config;
pub mod error;
pub mod format;
pub mod github;
pub mod models;
pub mod render;
pub mod report;
pub mod stats;
pub mod timezone;

pub use ai::{OpenAiProvider, SummaryProvider};
pub use config::Config;
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use render::{render_report_html, render_yearly_report_svg};
pub use stats::{
    derive_top_languages, derive_top_repositories, derive_yearly_statistics, StatsOptions,
};
