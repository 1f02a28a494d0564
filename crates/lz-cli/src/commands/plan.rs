use std::path::{Path, PathBuf};

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use lz_core::{Assignment, CapacityMode, Outcome, PackageId, Snapshot};

use super::plural;

pub struct PlanOptions {
    pub threshold: Option<f64>,
    pub residual: bool,
    pub format: String,
    pub output: Option<PathBuf>,
}

pub fn run(path: &Path, opts: &PlanOptions) -> Result<(), String> {
    if !matches!(opts.format.as_str(), "table" | "json") {
        return Err(format!(
            "unsupported format: \"{}\". Use: table, json",
            opts.format
        ));
    }

    let (manifest, warehouse) = super::open(path, |mut config| {
        if let Some(threshold) = opts.threshold {
            config.fill_threshold = threshold;
        }
        if opts.residual {
            config.capacity = CapacityMode::Residual;
        }
        config
    })?;

    let mut results = Vec::new();
    for (i, batch) in manifest.batches().iter().enumerate() {
        let assignment = warehouse
            .assign_truck(batch)
            .map_err(|e| format!("batch #{}: {e}", i + 1))?;
        results.push(assignment);
    }

    let snapshot = warehouse.snapshot().map_err(|e| e.to_string())?;

    if let Some(out) = opts.output.as_deref() {
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        std::fs::write(out, json).map_err(|e| format!("cannot write to {}: {e}", out.display()))?;
    }

    match opts.format.as_str() {
        "json" => print_json(&results, &snapshot)?,
        _ => print_tables(&results, &snapshot),
    }

    if let Some(out) = opts.output.as_deref() {
        eprintln!("  Exported truck loads to {}", out.display());
    }

    Ok(())
}

fn print_json(results: &[Assignment], snapshot: &Snapshot) -> Result<(), String> {
    let batches: Vec<_> = results
        .iter()
        .enumerate()
        .map(|(i, a)| {
            serde_json::json!({
                "batch": i + 1,
                "truck": a.truck,
                "assigned": a.assigned,
                "deferred": a.deferred,
                "outcome": a.outcome,
                "message": a.message(),
            })
        })
        .collect();

    let export = serde_json::json!({
        "batches": batches,
        "trucks": snapshot.trucks,
        "unassigned": snapshot.unassigned,
    });

    let text = serde_json::to_string_pretty(&export)
        .map_err(|e| format!("JSON serialization error: {e}"))?;
    println!("{text}");
    Ok(())
}

fn print_tables(results: &[Assignment], snapshot: &Snapshot) {
    if results.is_empty() {
        println!("  No batches to assign.");
    } else {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Batch", "Truck", "Assigned", "Deferred", "Result"]);

        for (i, a) in results.iter().enumerate() {
            let truck = a.truck.map(|t| t.to_string()).unwrap_or_else(|| "—".into());
            let message = match a.outcome {
                Outcome::FullAssigned { .. } => a.message().green().to_string(),
                Outcome::PartialAssigned { .. } => a.message().yellow().to_string(),
                Outcome::Deferred => a.message().red().to_string(),
            };
            table.add_row(vec![
                (i + 1).to_string(),
                truck,
                id_list(&a.assigned),
                id_list(&a.deferred),
                message,
            ]);
        }
        println!("{table}");
        println!();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Truck", "Size", "Volume", "Packages", "Fill"]);
    for load in &snapshot.trucks {
        let d = load.dimensions;
        table.add_row(vec![
            load.id.to_string(),
            format!("{} × {} × {}", d.length(), d.width(), d.height()),
            format!("{:.2}", load.volume),
            id_list(&load.packages),
            format!("{:.2}%", load.fill_percentage),
        ]);
    }
    println!("{table}");
    println!();

    let trucks = snapshot.trucks.len();
    let used = snapshot.trucks.iter().filter(|t| !t.packages.is_empty()).count();
    let waiting = snapshot.unassigned.len();
    println!(
        "  {used} of {trucks} truck{} loaded, {waiting} package{} waiting",
        plural(trucks),
        plural(waiting),
    );
}

fn id_list(ids: &[PackageId]) -> String {
    if ids.is_empty() {
        return "—".to_string();
    }
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
