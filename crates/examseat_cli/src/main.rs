//! examseat CLI - exam seating workbook generator

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use examseat_alloc::{
    SpecSeatingConfig, create_seating_plan, generate_all, generate_seating_arrangement,
    generate_signature_list,
};
use examseat_io_fs::{SeatingStorage, SpecStorageOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "examseat")]
#[command(
    author,
    version,
    about = "Generate exam seating plans, room charts and signature lists"
)]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,

    /// JSON file overriding document texts and input layout
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct StorageArgs {
    /// Directory uploaded workbooks are saved into
    #[arg(long, global = true, default_value = "uploads")]
    upload_dir: PathBuf,

    /// Directory generated workbooks are written into
    #[arg(long, global = true, default_value = "outputs")]
    output_dir: PathBuf,

    /// Keep both directories under the system temp directory
    #[arg(long, global = true, conflicts_with_all = ["upload_dir", "output_dir"])]
    temp: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the input workbook and write all three outputs
    Generate {
        /// Input workbook: roster on sheet 1, rooms on sheet 2
        input: PathBuf,
    },

    /// Write only the room-summary plan
    Plan {
        /// Input workbook
        input: PathBuf,
    },

    /// Write only the per-room seating chart
    Arrangement {
        /// Input workbook
        input: PathBuf,
    },

    /// Write only the signature list
    Signature {
        /// Input workbook
        input: PathBuf,
    },

    /// Copy a generated workbook out of the output directory
    Download {
        /// Output file name, e.g. plan_updated.xlsx
        name: String,

        /// Destination path
        #[arg(long)]
        to: PathBuf,
    },

    /// Delete all uploaded and generated files
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let storage = SeatingStorage::new(derive_storage_options(&cli.storage))
        .context("Failed to prepare storage directories")?;
    let cfg = match &cli.config {
        Some(path) => SpecSeatingConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => SpecSeatingConfig::default(),
    };

    match cli.command {
        Commands::Generate { input } => generate(&storage, &cfg, &input),
        Commands::Plan { input } => {
            let path_input = save_input(&storage, &input)?;
            report_output(create_seating_plan(&path_input, &storage, &cfg)?);
            Ok(())
        }
        Commands::Arrangement { input } => {
            let path_input = save_input(&storage, &input)?;
            report_output(generate_seating_arrangement(&path_input, &storage, &cfg)?);
            Ok(())
        }
        Commands::Signature { input } => {
            let path_input = save_input(&storage, &input)?;
            report_output(generate_signature_list(&path_input, &storage, &cfg)?);
            Ok(())
        }
        Commands::Download { name, to } => download(&storage, &name, &to),
        Commands::Reset => reset(&storage),
    }
}

fn init_tracing(verbose: bool) {
    let c_level_default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(c_level_default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn derive_storage_options(args: &StorageArgs) -> SpecStorageOptions {
    if args.temp {
        SpecStorageOptions::under_temp_dir()
    } else {
        SpecStorageOptions::new(&args.upload_dir, &args.output_dir)
    }
}

fn save_input(storage: &SeatingStorage, input: &Path) -> Result<PathBuf> {
    storage
        .save_upload(input)
        .with_context(|| format!("Failed to save upload '{}'", input.display()))
}

fn report_output(path: PathBuf) {
    println!("{}", path.display());
}

fn generate(storage: &SeatingStorage, cfg: &SpecSeatingConfig, input: &Path) -> Result<()> {
    let path_input = save_input(storage, input)?;
    let report = generate_all(&path_input, storage, cfg)?;

    report_output(report.path_plan);
    report_output(report.path_arrangement);
    report_output(report.path_signature);
    Ok(())
}

fn download(storage: &SeatingStorage, name: &str, to: &Path) -> Result<()> {
    let path_src = storage.resolve_download(name)?;
    fs::copy(&path_src, to).with_context(|| {
        format!(
            "Failed to copy '{}' to '{}'",
            path_src.display(),
            to.display()
        )
    })?;
    report_output(to.to_path_buf());
    Ok(())
}

fn reset(storage: &SeatingStorage) -> Result<()> {
    let report = storage.cleanup()?;
    for err in &report.errors {
        eprintln!("Warning: could not remove '{}': {}", err.path.display(), err.exception);
    }
    println!("{report}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "examseat",
            "plan",
            "rooms.xlsx",
            "--output-dir",
            "out",
            "-v",
        ])
        .expect("parse");

        assert!(cli.verbose);
        assert_eq!(cli.storage.output_dir, PathBuf::from("out"));
        assert_eq!(cli.storage.upload_dir, PathBuf::from("uploads"));
        assert!(matches!(cli.command, Commands::Plan { .. }));
    }

    #[test]
    fn temp_conflicts_with_explicit_dirs() {
        assert!(Cli::try_parse_from(["examseat", "--temp", "--upload-dir", "u", "reset"]).is_err());

        let cli = Cli::try_parse_from(["examseat", "--temp", "reset"]).expect("parse");
        let options = derive_storage_options(&cli.storage);
        assert!(options.dir_output.starts_with(std::env::temp_dir()));
    }

    #[test]
    fn download_requires_destination() {
        assert!(Cli::try_parse_from(["examseat", "download", "plan_updated.xlsx"]).is_err());
        let cli = Cli::try_parse_from([
            "examseat",
            "download",
            "plan_updated.xlsx",
            "--to",
            "plan.xlsx",
        ])
        .expect("parse");
        assert!(matches!(cli.command, Commands::Download { ref name, .. } if name == "plan_updated.xlsx"));
    }
}
