pub mod check;
pub mod plan;

use std::path::Path;

use lz_core::{EngineConfig, Warehouse};

use crate::manifest::Manifest;

/// Load a manifest and register its trucks and packages.
///
/// `configure` receives the manifest's settings and may override them.
fn open(
    path: &Path,
    configure: impl FnOnce(EngineConfig) -> EngineConfig,
) -> Result<(Manifest, Warehouse), String> {
    let manifest = Manifest::load(path)?;
    let warehouse = manifest.build(configure(manifest.settings))?;
    Ok((manifest, warehouse))
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
