//! Metric catalogue listing command implementation.

use anyhow::Result;
use ronda::metrics::registry::{available_categories, metrics_by_category};

/// List the metric catalogue, optionally filtered by category.
pub(crate) fn list_metrics(category: Option<String>, verbose: bool) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Available Metrics                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for cat in available_categories() {
        let cat_name = format!("{cat:?}");
        if let Some(ref filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        println!("{}: {}", cat_name, cat.description());
        println!("{}", "-".repeat(60));

        for info in metrics_by_category(&cat) {
            let variants = if info.has_variants { " x4 variants" } else { "" };
            if verbose {
                println!(
                    "  {:20} - {} (lookback: {} periods){}",
                    info.name, info.description, info.typical_lookback, variants
                );
            } else {
                println!("  {:20} {}{}", info.name, info.label, variants);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for detailed metric descriptions.\n");
    }

    println!("Variants:");
    println!("  ttm, ttm_ff, quarterly, quarterly_ff");
    println!();

    Ok(())
}
