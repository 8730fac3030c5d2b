//! resenha CLI - Review Dataset Loading and Aggregation
//!
//! Loads the review archive (downloading it on the first run), computes each
//! aggregate statistic with both evaluation strategies, and prints a timing
//! line followed by the result for every statistic-strategy pair.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]

use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use resenha::{load_from_path, stats, timing::time, DatasetSource, Result, ReviewDataset};

/// The archive the original analysis pulls: US "Gift Card" reviews.
const DEFAULT_DATA_URL: &str =
    "https://s3.amazonaws.com/amazon-reviews-pds/tsv/amazon_reviews_us_Gift_Card_v1_00.tsv.gz";

/// resenha - Review Dataset Loading and Aggregation in Pure Rust
#[derive(Parser)]
#[command(name = "resenha")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL of the gzip-compressed TSV review archive
    #[arg(default_value = DEFAULT_DATA_URL)]
    url: String,

    /// Directory where the raw download is cached
    #[arg(long, default_value = ".")]
    cache_dir: PathBuf,

    /// Load a local TSV (optionally .gz) file instead of fetching
    #[arg(long, conflicts_with = "url")]
    local: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let dataset = match &cli.local {
        Some(path) => load_from_path(path)?,
        None => DatasetSource::new(&cli.url, &cli.cache_dir)?.load()?,
    };
    report(&dataset)
}

/// Runs every statistic in both strategy variants, printing the timing line
/// and the computed result for each.
fn report(dataset: &ReviewDataset) -> Result<()> {
    let mean = time("mean rating (fold)", || stats::mean_rating_fold(dataset));
    println!("{mean}");
    println!("{}", mean.into_value()?);

    let mean = time("mean rating (grouped)", || {
        stats::mean_rating_grouped(dataset)
    });
    println!("{mean}");
    println!("{}", mean.into_value()?);

    let distribution = time("rating distribution (fold)", || {
        stats::rating_distribution_fold(dataset)
    });
    println!("{distribution}");
    println!("{}", render_distribution(&distribution.value));

    let distribution = time("rating distribution (grouped)", || {
        stats::rating_distribution_grouped(dataset)
    });
    println!("{distribution}");
    println!("{}", render_distribution(&distribution.value));

    let verified = time("verified purchases (fold)", || {
        stats::verified_distribution_fold(dataset)
    });
    println!("{verified}");
    println!("{}", render_distribution(&verified.value));

    let verified = time("verified purchases (grouped)", || {
        stats::verified_distribution_grouped(dataset)
    });
    println!("{verified}");
    println!("{}", render_distribution(&verified.value));

    let by_count = time("top products by review count (fold)", || {
        stats::top_products_by_count_fold(dataset)
    });
    println!("{by_count}");
    println!("{}", render_ranked(&by_count.value));

    let by_count = time("top products by review count (grouped)", || {
        stats::top_products_by_count_grouped(dataset)
    });
    println!("{by_count}");
    println!("{}", render_ranked(&by_count.value));

    let by_mean = time("top products by mean rating (fold)", || {
        stats::top_products_by_mean_fold(dataset)
    });
    println!("{by_mean}");
    println!("{}", render_ranked(&by_mean.value));

    let by_mean = time("top products by mean rating (grouped)", || {
        stats::top_products_by_mean_grouped(dataset)
    });
    println!("{by_mean}");
    println!("{}", render_ranked(&by_mean.value));

    Ok(())
}

/// Renders a distribution mapping in ascending key order.
fn render_distribution<K, V>(map: &HashMap<K, V>) -> String
where
    K: Ord + fmt::Display,
    V: fmt::Display,
{
    let ordered: BTreeMap<&K, &V> = map.iter().collect();
    let entries: Vec<String> = ordered
        .into_iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// Renders a ranked list in its given order.
fn render_ranked<V: fmt::Display>(ranked: &[(String, V)]) -> String {
    let entries: Vec<String> = ranked.iter().map(|(k, v)| format!("{k}: {v}")).collect();
    format!("{{{}}}", entries.join(", "))
}
