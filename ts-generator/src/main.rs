/*!
 * Standalone TypeScript type generator for the StarMKT authorization types
 *
 * Only compiles starmkt-types, so the web front ends can refresh their
 * bindings without building the whole workspace.
 *
 * Usage: cargo run (from ts-generator directory)
 */

use starmkt_types::{ts_rs::TS, *};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // CARGO_MANIFEST_DIR points to the ts-generator directory, parent is workspace root
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")?;
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .ok_or("ts-generator has no parent directory")?;
    let export_dir = workspace_root.join("web/src/generated");

    std::env::set_var("TS_RS_EXPORT_DIR", &export_dir);

    println!("🔧 Generating TypeScript bindings for authorization types...");

    Role::export()?;
    Permission::export()?;
    Module::export()?;
    AccessLevel::export()?;
    ModuleGrant::export()?;
    AccessMode::export()?;

    println!("✅ TypeScript bindings generated successfully!");
    println!("📁 Generated files location: {}", export_dir.display());

    if export_dir.exists() {
        println!("\n📋 Generated files:");
        let mut entries: Vec<_> = std::fs::read_dir(&export_dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == "ts")
            })
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            println!("   - {}", entry.file_name().to_string_lossy());
        }
    }

    Ok(())
}
