use std::collections::HashSet;
use std::path::Path;

use super::plural;

pub fn run(path: &Path) -> Result<(), String> {
    let (manifest, warehouse) = super::open(path, |config| config)?;

    // A package deferred by one batch may be submitted again in a later one,
    // so duplicates only matter within a single batch.
    let mut listed = HashSet::new();
    for (i, batch) in manifest.batches().iter().enumerate() {
        if batch.is_empty() {
            return Err(format!("batch #{}: no packages provided", i + 1));
        }
        let mut in_batch = HashSet::new();
        for id in batch {
            if warehouse.package(*id).is_none() {
                return Err(format!("batch #{}: package not found: {id}", i + 1));
            }
            if !in_batch.insert(*id) {
                return Err(format!("batch #{}: package {id} listed more than once", i + 1));
            }
            listed.insert(*id);
        }
    }

    let (trucks, packages) =
        warehouse.with_registry(|registry| (registry.truck_count(), registry.package_count()));
    let batches = manifest.batches.len();
    println!("  All checks passed for {}.", path.display());
    println!(
        "  {trucks} truck{}, {packages} package{}, {batches} batch{}",
        plural(trucks),
        plural(packages),
        if batches == 1 { "" } else { "es" },
    );
    if listed.len() < packages {
        println!("  {} package(s) not in any batch", packages - listed.len());
    }

    Ok(())
}
