pub mod engine;
pub mod rankings;

pub use engine::{derive_yearly_statistics, StatsOptions};
pub use rankings::{derive_top_languages, derive_top_repositories};
