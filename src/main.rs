use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fgio::AppContext;
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fgio",
    version,
    about = "Runtime IO helper for containerized analysis apps",
    subcommand_required = true,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the structure of an app directory and its sample data
    Check(CheckArgs),
    /// Resolve and print the effective paths, parameters and input mapping
    Show(ShowArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// App directory containing manifest.json and sample_data/
    #[arg(long, value_name = "DIR")]
    app_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// App directory containing manifest.json (default: FG_APP_DIR or /app)
    #[arg(long, value_name = "DIR")]
    app_dir: Option<PathBuf>,

    /// Data root with data/, config/, output/, summary/ (default: FG_DATA_ROOT or /fastgenomics)
    #[arg(long, value_name = "DIR")]
    data_root: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => run_check(&args),
        Command::Show(args) => run_show(&args),
    }
}

fn run_check(args: &CheckArgs) -> Result<()> {
    let report = fgio::checker::check_app_structure(&args.app_dir)
        .with_context(|| format!("check app structure in {}", args.app_dir.display()))?;
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    for error in &report.errors {
        eprintln!("error: {error}");
    }
    if !report.is_ok() {
        bail!(
            "app structure check failed with {} error(s)",
            report.errors.len()
        );
    }
    println!("app structure looks good");
    Ok(())
}

fn run_show(args: &ShowArgs) -> Result<()> {
    let ctx = AppContext::resolve(args.app_dir.as_deref(), args.data_root.as_deref())
        .context("resolve root paths")?;
    let paths = ctx.paths();
    let resolved = json!({
        "paths": {
            "app": paths.app.display().to_string(),
            "data": paths.data.display().to_string(),
            "config": paths.config.display().to_string(),
            "output": paths.output.display().to_string(),
            "summary": paths.summary.display().to_string(),
        },
        "parameters": ctx.parameters().context("resolve parameters")?,
        "input_file_mapping": ctx.input_file_mapping().context("resolve input file mapping")?,
    });
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
