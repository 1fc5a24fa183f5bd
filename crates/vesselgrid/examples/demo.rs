//! Demo application showing basic vesselgrid usage.
//!
//! Usage: `demo [PRESET | CONFIG.json] [OUTPUT.json]`
//!
//! Generates one preset (default `vessel`) or a JSON configuration into an
//! in-memory stage, prints a summary, and optionally writes the stage as JSON.

use vesselgrid::*;

fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| Preset::Vessel.name().to_string());
    let output = args.next();

    let config = if source.ends_with(".json") {
        GeneratorConfig::load(&source)?
    } else {
        match source.parse::<Preset>() {
            Ok(preset) => preset.config(),
            Err(message) => {
                eprintln!("{message}");
                std::process::exit(2);
            }
        }
    };

    let (stage, report) = build_stage(&config)?;

    println!("Generated '{}'", report.name);
    println!(
        "  cells: {} visited, {} emitted (inner {}, middle {}, outer {})",
        report.grid.visited,
        report.grid.emitted,
        report.grid.zone_count(Zone::Inner),
        report.grid.zone_count(Zone::Middle),
        report.grid.zone_count(Zone::Outer)
    );
    println!("  cell scale {:.5}, pitch {:.5}", report.cell_scale, report.pitch);
    if let Some(rods) = report.rods {
        println!("  rods: {} with {} marks", rods.rods, rods.marks);
    }
    if let Some((min, max)) = stage.bounding_box() {
        println!("  scene bounds: {min:?} .. {max:?}");
    }

    if let Some(path) = output {
        stage.save_json(&path)?;
        println!("Wrote {path}");
    }

    Ok(())
}
