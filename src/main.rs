//! ymd-gcode - CLI tool to convert shape files to G-code programs.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ymd_gcode_rs::{
    generate_program, output_name_for, output_path_for, parse_shape_file, validate_shape_config,
    ProgramSettings,
};

/// Convert YMD rectangle shape files to G-code for CNC routers.
#[derive(Parser, Debug)]
#[command(name = "ymd-gcode")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input shape file path
    #[arg(short, long)]
    input: PathBuf,

    /// Output G-code file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Retract height between passes
    #[arg(long, default_value_t = ymd_gcode_rs::config::DEFAULT_Z_SAFE)]
    safe_z: f64,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Output the parsed shape as JSON
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if args.safe_z <= 0.0 {
        warn!("Safe Z {} is at or below the material surface", args.safe_z);
    }

    info!("Processing: {}", args.input.display());

    // Parse the input file
    let config = parse_shape_file(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    info!(
        "Parsed {} with {} point(s)",
        config.shape,
        config.polygon.len()
    );

    // Validate
    let validation = validate_shape_config(&config);

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Debug output
    if args.debug {
        let json = serde_json::to_string_pretty(&config)?;
        println!("{}", json);
        return Ok(());
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    // Generate output
    let output_path = args
        .output
        .unwrap_or_else(|| output_path_for(&args.input));
    let output_name = output_path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| output_name_for(&args.input));
    let settings = ProgramSettings::with_safe_z(args.safe_z);
    let program = generate_program(&config, &output_name, &settings)
        .context("Failed to generate toolpath")?;

    // Write output
    std::fs::write(&output_path, &program)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!("Generated: {}", output_path.display());

    Ok(())
}
