use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::{AgeFilter, FilterSelection, GenderFilter, PlanFilter};

/// Cross-filterable dashboard of a Spotify listener survey.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Survey table to open at startup (.csv, .json or .parquet).
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Write both charts as JSON to this path and exit without opening a window.
    #[arg(long, value_name = "PATH", requires = "data")]
    pub export: Option<PathBuf>,

    /// Age range: All, 6-12, 12-20, 20-35, 35-60 or 60+.
    #[arg(long, default_value = "All")]
    pub age: AgeFilter,

    /// Gender: All, Female, Male or Others.
    #[arg(long, default_value = "All")]
    pub gender: GenderFilter,

    /// Subscription plan: All, Free or Premium.
    #[arg(long, default_value = "All")]
    pub plan: PlanFilter,

    /// Comma-separated recommendation ratings to keep.
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = [1u8, 2, 3, 4, 5],
        value_parser = clap::value_parser!(u8).range(1..=5)
    )]
    pub ratings: Vec<u8>,
}

impl Args {
    /// Initial filter values.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            age: self.age,
            gender: self.gender,
            plan: self.plan,
            ratings: self.ratings.iter().copied().collect(),
        }
    }
}
