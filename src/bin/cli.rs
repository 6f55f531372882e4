// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe CSG CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use polyframe_csg::{analyze, io, BooleanOp, CsgConfig, GeometryStats, Solid};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyframe-csg")]
#[command(about = "Polyframe CSG - boolean operations on closed STL meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./csg.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print statistics as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Space covered by either mesh
    Union {
        a: PathBuf,
        b: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Space covered by both meshes
    Intersection {
        a: PathBuf,
        b: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Space covered by A but not by B
    Difference {
        a: PathBuf,
        b: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show geometry statistics of an STL file
    Stats { input: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => CsgConfig::from_file(path)?,
        None => CsgConfig::load()?,
    };

    match &cli.command {
        Commands::Union { a, b, output } => {
            boolean_command(a, b, output, BooleanOp::Union, &config, &cli)?;
        }
        Commands::Intersection { a, b, output } => {
            boolean_command(a, b, output, BooleanOp::Intersection, &config, &cli)?;
        }
        Commands::Difference { a, b, output } => {
            boolean_command(a, b, output, BooleanOp::Difference, &config, &cli)?;
        }
        Commands::Stats { input } => {
            let solid = load(input)?;
            report(&analyze(&solid), cli.json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Solid> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    io::import_stl(path)
}

fn boolean_command(
    a: &Path,
    b: &Path,
    output: &Path,
    op: BooleanOp,
    config: &CsgConfig,
    cli: &Cli,
) -> Result<()> {
    let solid_a = load(a)?;
    let solid_b = load(b)?;

    if cli.verbose {
        println!(
            "{} {} ({} triangles) and {} ({} triangles)",
            format!("Computing {}:", op).bold(),
            a.display(),
            solid_a.triangle_count(),
            b.display(),
            solid_b.triangle_count()
        );
    }

    let start = Instant::now();
    let result = polyframe_csg::boolean_op_with_config(&solid_a, &solid_b, op, config)
        .with_context(|| format!("Failed to compute {}", op))?;
    let elapsed = start.elapsed();

    io::export_stl(&result, output)?;

    if !cli.json {
        println!(
            "{} {} -> {} in {:.2?}",
            "✓".green(),
            op,
            output.display(),
            elapsed
        );
    }
    if cli.verbose || cli.json {
        report(&analyze(&result), cli.json)?;
    }
    if result.is_empty() {
        eprintln!("{} result is empty", "Warning:".yellow());
    }

    Ok(())
}

fn report(stats: &GeometryStats, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    stats.print();
    if !stats.is_watertight {
        eprintln!("{} mesh is not watertight", "Warning:".yellow());
    }
    Ok(())
}
