use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use ghcrawl::{ScoreMode, Visibility};

#[derive(Parser)]
#[command(
    name = "ghcrawl",
    version,
    about = "Crawl GitHub repositories and rank them by InnerSource activity score"
)]
pub struct Cli {
    /// User to query
    #[arg(long)]
    pub user: Option<String>,

    /// Organizations to query
    #[arg(long = "org")]
    pub orgs: Vec<String>,

    /// Topics to query
    #[arg(long = "topic")]
    pub topics: Vec<String>,

    /// Repository visibility to match
    #[arg(long, value_enum, default_value = "public")]
    pub visibility: VisibilityArg,

    /// Path to a JSON listing of innersource.json records keyed by repo full name
    #[arg(long)]
    pub listing: Option<PathBuf>,

    /// Scoring arithmetic
    #[arg(long, value_enum, default_value = "legacy")]
    pub scoring: ScoringArg,

    /// Maximum number of repositories to score
    #[arg(long, default_value_t = 100)]
    pub max_results: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum VisibilityArg {
    Public,
    Private,
    Internal,
}

impl From<VisibilityArg> for Visibility {
    fn from(value: VisibilityArg) -> Self {
        match value {
            VisibilityArg::Public => Visibility::Public,
            VisibilityArg::Private => Visibility::Private,
            VisibilityArg::Internal => Visibility::Internal,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ScoringArg {
    /// Bit-exact historical integer arithmetic
    Legacy,
    /// Real-valued multipliers with a single final rounding
    Real,
}

impl From<ScoringArg> for ScoreMode {
    fn from(value: ScoringArg) -> Self {
        match value {
            ScoringArg::Legacy => ScoreMode::Legacy,
            ScoringArg::Real => ScoreMode::RealValued,
        }
    }
}
