//! uvtransfer CLI - UV-based vertex position transfer tool.
//!
//! Usage: uvtransfer <COMMAND> [OPTIONS]
//!
//! Run `uvtransfer --help` for available commands.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};

use uvtransfer::error::TransferError;
use uvtransfer::io;
use uvtransfer::mesh::DEFAULT_UV_LAYER;
use uvtransfer::progress::Progress;
use uvtransfer::transfer::{transfer_positions_with_progress, TransferOptions};

#[derive(Parser)]
#[command(name = "uvtransfer")]
#[command(author, version, about = "UV-based vertex position transfer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Copy vertex positions from a source mesh onto a target mesh
    Transfer {
        /// Mesh positions are read from
        source: PathBuf,

        /// Mesh positions are written to
        target: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// UV layer to read on the source mesh
        #[arg(long, default_value = DEFAULT_UV_LAYER)]
        source_uv: String,

        /// UV layer to read on the target mesh
        #[arg(long, default_value = DEFAULT_UV_LAYER)]
        target_uv: String,

        /// Maximum UV distance for a match (strict)
        #[arg(short, long, default_value = "1e-6")]
        threshold: f64,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Transfer {
            source,
            target,
            output,
            source_uv,
            target_uv,
            threshold,
            sequential,
        } => {
            cmd_transfer(
                &source,
                &target,
                &output,
                &source_uv,
                &target_uv,
                threshold,
                sequential,
            )?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    let max_percent = Arc::new(AtomicUsize::new(0));

    Progress::new(move |current, total| {
        if total == 0 {
            return true;
        }

        // Use rounding instead of truncation for smoother progress
        let percent = if current >= total {
            100
        } else {
            ((current * 100) + (total / 2)) / total
        };

        // Redraw only when the bar advances (reduces flickering)
        let previous = max_percent.fetch_max(percent, Ordering::Relaxed);
        if percent > previous || current >= total {
            let bar_width = 30;
            let filled = (percent * bar_width) / 100;
            let empty = bar_width - filled;

            let bar: String = std::iter::repeat('=').take(filled).collect();
            let space: String = std::iter::repeat(' ').take(empty).collect();

            // Use carriage return to overwrite the line
            eprint!("\r[{}{}] {:3}%", bar, space, percent);
            let _ = std::io::stderr().flush();

            // Print newline on completion
            if current >= total {
                eprintln!();
            }
        }

        true
    })
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Polygons: {}", mesh.num_polygons());
    println!("Corners: {}", mesh.num_corners());

    if mesh.num_polygons() > 0 {
        if mesh.polygons().iter().all(|p| p.vertices().len() == 3) {
            println!("Mesh type: Triangle mesh");
        } else if mesh.polygons().iter().all(|p| p.vertices().len() == 4) {
            println!("Mesh type: Quad mesh");
        } else {
            println!("Mesh type: Mixed polygon mesh");
        }
    }

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    if mesh.uv_layers().is_empty() {
        println!("UV layers: none");
    } else {
        println!("UV layers:");
        for layer in mesh.uv_layers() {
            match layer.bounding_box() {
                Some((min, max)) => println!(
                    "  {}: {} coordinates, u [{:.3}, {:.3}], v [{:.3}, {:.3}]",
                    layer.name(),
                    layer.len(),
                    min.x,
                    max.x,
                    min.y,
                    max.y
                ),
                None => println!("  {}: empty", layer.name()),
            }
        }
    }

    Ok(())
}

/// Reject a transfer whose source and target are the same file.
///
/// Equal paths are rejected before touching the filesystem; once both
/// files are known to exist they are canonicalized, so aliases through
/// links or `..` segments are caught as well.
fn check_paths(source: &Path, target: &Path) -> Result<(), TransferError> {
    if source == target {
        return Err(TransferError::SameMesh);
    }
    for path in [source, target] {
        if !path.exists() {
            return Err(TransferError::MeshNotFound {
                path: path.to_path_buf(),
            });
        }
    }
    if source.canonicalize()? == target.canonicalize()? {
        return Err(TransferError::SameMesh);
    }
    Ok(())
}

fn cmd_transfer(
    source_path: &PathBuf,
    target_path: &PathBuf,
    output: &PathBuf,
    source_uv: &str,
    target_uv: &str,
    threshold: f64,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(source_path, target_path)?;

    let source = io::load(source_path)?;
    let mut target = io::load(target_path)?;

    println!(
        "Source: {} vertices, {} polygons, {} corners",
        source.num_vertices(),
        source.num_polygons(),
        source.num_corners()
    );
    println!(
        "Target: {} vertices, {} polygons, {} corners",
        target.num_vertices(),
        target.num_polygons(),
        target.num_corners()
    );

    let options = TransferOptions::default()
        .with_source_layer(source_uv)
        .with_target_layer(target_uv)
        .with_threshold(threshold)
        .with_parallel(!sequential);

    let mode = if sequential { "sequential" } else { "parallel" };
    println!(
        "Transferring positions (layer {} -> {}, threshold {}, {})...",
        source_uv, target_uv, threshold, mode
    );

    let progress = create_progress();
    let start = Instant::now();
    let report = transfer_positions_with_progress(&source, &mut target, &options, &progress)?;
    let elapsed = start.elapsed();

    println!(
        "Matched {} of {} corners ({} vertices written)",
        report.copied, report.target_corners, report.vertices_written
    );
    if report.skipped > 0 {
        println!("Skipped {} corners with no source match", report.skipped);
    }
    if report.copied > 0 {
        println!("Largest matched UV distance: {:.2e}", report.max_distance);
    }

    io::save(&target, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}
