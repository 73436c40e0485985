//! Rate one or more CAR products and write a quotes comparison
//!
//! Loads product pricing configurations, optionally replays a saved
//! selection set and a liability tier choice onto each, and writes the
//! resulting adjustment totals side by side as CSV.

use anyhow::{Context, Result};
use car_rating::{ProductPricingConfig, QuoteState, SelectableItem};
use chrono::Utc;
use clap::Parser;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Rate CAR products and compare quotes")]
struct Args {
    /// Product pricing configuration files (JSON), one per insurer product
    #[arg(required = true)]
    configs: Vec<PathBuf>,

    /// Saved selection set (JSON item list) to replay onto each product
    #[arg(long)]
    selection: Option<PathBuf>,

    /// Liability tier id to select
    #[arg(long)]
    tier: Option<u32>,

    /// Base premium to apply the adjustments against
    #[arg(long, default_value_t = 0.0)]
    base_premium: f64,

    /// Output CSV path
    #[arg(long, default_value = "quotes_comparison.csv")]
    output: PathBuf,
}

struct QuoteRow {
    product: String,
    mandatory_percentage: f64,
    mandatory_fixed: f64,
    optional_percentage: f64,
    optional_fixed: f64,
    liability_percentage: f64,
    combined: f64,
    total_premium: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let saved: Vec<SelectableItem> = match &args.selection {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading selection {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing selection {}", path.display()))?
        }
        None => Vec::new(),
    };

    println!("Rating {} product(s)...", args.configs.len());

    let rows: Vec<QuoteRow> = args
        .configs
        .par_iter()
        .map(|path| rate_product(path, &saved, args.tier, args.base_premium))
        .collect::<Result<Vec<_>>>()?;

    write_comparison(&args.output, &rows)?;
    println!(
        "Comparison written to {} at {}",
        args.output.display(),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    println!("\nQuote summary (base premium {:.2}):", args.base_premium);
    for row in &rows {
        println!(
            "  {:<24} adj {:+.2}% / {:+.2} fixed -> total {:.2}",
            row.product,
            row.mandatory_percentage + row.optional_percentage + row.liability_percentage,
            row.mandatory_fixed + row.optional_fixed,
            row.total_premium,
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

fn rate_product(
    path: &PathBuf,
    saved: &[SelectableItem],
    tier: Option<u32>,
    base_premium: f64,
) -> Result<QuoteRow> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading configuration {}", path.display()))?;

    // A malformed configuration degrades to an empty catalog, so the quote
    // row still appears, showing no available extensions
    let config: Option<ProductPricingConfig> = serde_json::from_str(&raw)
        .map_err(|err| log::warn!("{}: malformed configuration: {err}", path.display()))
        .ok();

    let product = config
        .as_ref()
        .map(|c| c.product_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| path.display().to_string());

    let mut state = QuoteState::from_config(config.as_ref());
    if !saved.is_empty() {
        state = state.replay(saved);
    }
    if let Some(tier_id) = tier {
        state = state.toggle_liability_tier(tier_id);
    }

    let totals = state.totals();
    let breakdown = totals.apply(base_premium);
    log::debug!("{product}: combined adjustment {:.4}", totals.combined());

    Ok(QuoteRow {
        product,
        mandatory_percentage: totals.mandatory_percentage,
        mandatory_fixed: totals.mandatory_fixed,
        optional_percentage: totals.optional_percentage,
        optional_fixed: totals.optional_fixed,
        liability_percentage: totals.liability_percentage,
        combined: totals.combined(),
        total_premium: breakdown.total_premium,
    })
}

fn write_comparison(path: &PathBuf, rows: &[QuoteRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record([
        "Product",
        "MandatoryPct",
        "MandatoryFixed",
        "OptionalPct",
        "OptionalFixed",
        "LiabilityPct",
        "Combined",
        "TotalPremium",
    ])?;

    for row in rows {
        writer.write_record([
            row.product.clone(),
            format!("{:.4}", row.mandatory_percentage),
            format!("{:.2}", row.mandatory_fixed),
            format!("{:.4}", row.optional_percentage),
            format!("{:.2}", row.optional_fixed),
            format!("{:.4}", row.liability_percentage),
            format!("{:.4}", row.combined),
            format!("{:.2}", row.total_premium),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
