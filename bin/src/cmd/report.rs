//! Report command implementation.

use crate::{OutputFormat, data};
use anyhow::{Context, Result};
use polars::prelude::*;
use ronda::{
    EngineConfig, HoldingId, InMemoryStore, InclusionSet, MetricRow, MetricTable, SeriesStore,
    generate_report,
};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Options of the report command.
#[derive(Debug)]
pub(crate) struct ReportOptions {
    pub(crate) input: PathBuf,
    pub(crate) config: Option<PathBuf>,
    pub(crate) exclude: Vec<String>,
    pub(crate) latest: bool,
    pub(crate) format: OutputFormat,
    pub(crate) output: Option<PathBuf>,
}

/// A generated report and the scope it covers.
struct ScopedReport {
    scope: &'static str,
    holdings: usize,
    table: MetricTable,
}

/// Generate the full report and, with exclusions, a recalculated one.
///
/// Both generations run concurrently on the blocking pool over one shared
/// snapshot; each aggregates its own totals from its own inclusion set.
pub(crate) async fn run_report(options: ReportOptions) -> Result<()> {
    let config = Arc::new(data::load_config(options.config.as_deref())?);
    let store = Arc::new(data::load_store(&options.input)?);

    let full_scope = InclusionSet::all(store.as_ref());
    let mut pending = vec![(
        "full",
        full_scope.len(),
        spawn_report(Arc::clone(&store), full_scope.clone(), Arc::clone(&config)),
    )];

    if !options.exclude.is_empty() {
        let known = store.holdings();
        for id in &options.exclude {
            if !known.contains(&HoldingId::from(id.as_str())) {
                warn!(holding = %id, "Excluded holding is not in the snapshot");
            }
        }
        let recalculated = full_scope.excluding(options.exclude.iter().map(String::as_str));
        info!(
            excluded = full_scope.len() - recalculated.len(),
            "Generating recalculated report"
        );
        pending.push((
            "recalculated",
            recalculated.len(),
            spawn_report(Arc::clone(&store), recalculated, Arc::clone(&config)),
        ));
    }

    let mut reports = Vec::with_capacity(pending.len());
    for (scope, holdings, handle) in pending {
        let table = handle
            .await
            .with_context(|| format!("{scope} report generation panicked"))??;
        reports.push(ScopedReport {
            scope,
            holdings,
            table,
        });
    }

    let mut out: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match options.format {
        OutputFormat::Text => write_text(&mut out, &reports, options.latest)?,
        OutputFormat::Csv => write_csv(&mut out, &reports, options.latest)?,
        OutputFormat::Json => write_json(&mut out, &reports, options.latest)?,
    }
    out.flush()?;

    if let Some(path) = &options.output {
        info!(path = %path.display(), "Report written");
    }
    Ok(())
}

fn spawn_report(
    store: Arc<InMemoryStore>,
    scope: InclusionSet,
    config: Arc<EngineConfig>,
) -> JoinHandle<ronda::Result<MetricTable>> {
    tokio::task::spawn_blocking(move || generate_report(store.as_ref(), &scope, &config))
}

fn selected_rows(table: &MetricTable, latest: bool) -> Vec<MetricRow> {
    table
        .rows()
        .into_iter()
        .filter(|row| !latest || row.period_index == 0)
        .collect()
}

fn write_text(out: &mut dyn Write, reports: &[ScopedReport], latest: bool) -> Result<()> {
    for report in reports {
        writeln!(out, "\n╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(out, "║                      Portfolio Metrics                       ║")?;
        writeln!(out, "╚══════════════════════════════════════════════════════════════╝\n")?;
        writeln!(out, "Scope:    {} ({} holdings)", report.scope, report.holdings)?;
        writeln!(
            out,
            "Values:   {} ({} not applicable)\n",
            report.table.len(),
            report.table.len() - report.table.present()
        )?;

        // One line per (metric, variant), values newest first.
        let mut lines: BTreeMap<(usize, &str, &str), Vec<String>> = BTreeMap::new();
        let mut order: BTreeMap<&str, usize> = BTreeMap::new();
        for row in selected_rows(&report.table, latest) {
            let next = order.len();
            let position = *order.entry(row.metric).or_insert(next);
            let cell = row.value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"));
            lines
                .entry((position, row.metric, row.variant.unwrap_or("")))
                .or_default()
                .push(cell);
        }

        writeln!(out, "{:<22} {:<13} Values (newest first)", "Metric", "Variant")?;
        writeln!(out, "{}", "-".repeat(70))?;
        for ((_, metric, variant), cells) in &lines {
            writeln!(out, "{metric:<22} {variant:<13} {}", cells.join("  "))?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn write_csv(out: &mut dyn Write, reports: &[ScopedReport], latest: bool) -> Result<()> {
    let mut combined: Option<DataFrame> = None;
    for report in reports {
        let mut df = report.table.to_frame()?;
        if latest {
            let mask = df
                .column("period_index")?
                .as_materialized_series()
                .equal(0)?;
            df = df.filter(&mask)?;
        }
        let scope = Series::new("scope".into(), vec![report.scope; df.height()]);
        df.with_column(scope)?;

        combined = Some(match combined {
            Some(mut acc) => {
                acc.vstack_mut(&df)?;
                acc
            }
            None => df,
        });
    }

    if let Some(mut df) = combined {
        CsvWriter::new(out).finish(&mut df)?;
    }
    Ok(())
}

fn write_json(out: &mut dyn Write, reports: &[ScopedReport], latest: bool) -> Result<()> {
    let body: BTreeMap<&str, Vec<MetricRow>> = reports
        .iter()
        .map(|r| (r.scope, selected_rows(&r.table, latest)))
        .collect();
    serde_json::to_writer_pretty(&mut *out, &body)?;
    writeln!(out)?;
    Ok(())
}
