// submux-cli/src/main.rs
//
// This file defines the command-line interface for the Submux toolkit.
// It uses the `clap` crate to parse command-line arguments for the three
// operations the core library exposes.
//
// Responsibilities include:
// - Defining CLI argument structures (`Cli`, `Commands`, per-command args).
// - Setting up logging via env_logger (RUST_LOG, default "info").
// - Validating input paths and checking for the external MKVToolNix tools.
// - Configuring and invoking the submux-core library.
// - Printing the final batch report and managing the process exit code.

use clap::{Parser, Subcommand};
use submux_core::external::{
    check_dependency, CommandMkvextractRunner, CommandMkvinfoRunner, CommandMkvmergeRunner,
    MKVEXTRACT, MKVINFO, MKVMERGE,
};
use submux_core::rename::{apply_renames, list_renameable_files, plan_new_names, TmdbClient};
use submux_core::{
    extract_subtitles, find_processable_files, process_containers, CoreConfig, CoreResult,
};

use std::path::PathBuf;
use std::process;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Submux: batch MKV remuxing toolkit",
    long_about = "Attaches sidecar subtitles to video containers, extracts subtitle tracks, \
                  and renames files by online metadata, using the MKVToolNix tools."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remuxes containers with their sidecar subtitle files attached
    Mux(MuxArgs),
    /// Extracts subtitle tracks of the requested languages into sidecar files
    Extract(ExtractArgs),
    /// Renames video and subtitle files using TMDB release years
    Rename(RenameArgs),
}

#[derive(Parser, Debug)]
struct MuxArgs {
    /// Directory searched recursively for container files
    #[arg(required = true, value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Directory holding the MKVToolNix binaries (defaults to PATH lookup)
    #[arg(long, value_name = "DIR")]
    mkvtoolnix_dir: Option<PathBuf>,

    /// Stop after this many successful remuxes (negative: unlimited)
    #[arg(long, default_value_t = submux_core::UNLIMITED, value_name = "COUNT", allow_hyphen_values = true)]
    max: i32,

    /// Keep subtitle tracks already present in the source containers
    #[arg(long)]
    keep_source_subtitles: bool,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Directory searched recursively for .mkv files
    #[arg(required = true, value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Directory holding the MKVToolNix binaries (defaults to PATH lookup)
    #[arg(long, value_name = "DIR")]
    mkvtoolnix_dir: Option<PathBuf>,

    /// Comma-separated 2-letter language codes to extract (e.g. en,fr)
    #[arg(long, required = true, value_delimiter = ',', value_name = "LANGS")]
    languages: Vec<String>,
}

#[derive(Parser, Debug)]
struct RenameArgs {
    /// Directory containing the files to rename (top level only)
    #[arg(required = true, value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// TMDB API key
    #[arg(long, env = "SUBMUX_TMDB_API_KEY", value_name = "KEY")]
    api_key: String,

    /// Drop the trailing info segment instead of keeping it
    #[arg(long)]
    drop_info: bool,

    /// Look up at most this many files (negative: unlimited)
    #[arg(long, default_value_t = submux_core::UNLIMITED, value_name = "COUNT", allow_hyphen_values = true)]
    max: i32,

    /// Print the planned renames without applying them
    #[arg(long)]
    dry_run: bool,
}

// --- Command Implementations ---

fn run_mux(args: MuxArgs) -> CoreResult<()> {
    let mut config = CoreConfig::new(args.input_dir);
    config.mkvtoolnix_dir = args.mkvtoolnix_dir;
    config.max_successes = args.max;
    config.drop_source_subtitles = !args.keep_source_subtitles;
    config.validate()?;

    check_dependency(&config.tool_path(MKVMERGE))?;
    check_dependency(&config.tool_path(MKVINFO))?;

    let files = find_processable_files(&config.input_dir)?;
    log::info!("Found {} container files", files.len());

    let inspector = CommandMkvinfoRunner::new(config.tool_path(MKVINFO));
    let muxer = CommandMkvmergeRunner::new(config.tool_path(MKVMERGE));
    let report = process_containers(&inspector, &muxer, &config, &files);

    println!("{} containers remuxed successfully", report.succeeded);
    if report.failures.is_empty() {
        println!("No failed files");
    } else {
        println!("\nFailed files:\n");
        for failure in &report.failures {
            println!("{} : {}", failure.path.display(), failure.reason);
        }
    }
    Ok(())
}

fn run_extract(args: ExtractArgs) -> CoreResult<()> {
    let mut config = CoreConfig::new(args.input_dir);
    config.mkvtoolnix_dir = args.mkvtoolnix_dir;
    config.validate()?;

    check_dependency(&config.tool_path(MKVINFO))?;
    check_dependency(&config.tool_path(MKVEXTRACT))?;

    let inspector = CommandMkvinfoRunner::new(config.tool_path(MKVINFO));
    let extractor = CommandMkvextractRunner::new(config.tool_path(MKVEXTRACT));
    let written = extract_subtitles(&inspector, &extractor, &config.input_dir, &args.languages)?;

    println!("Extracted {} subtitle files", written.len());
    for path in &written {
        println!("  {}", path.display());
    }
    Ok(())
}

fn run_rename(args: RenameArgs) -> CoreResult<()> {
    let files = list_renameable_files(&args.input_dir)?;
    log::info!("Found {} candidate files", files.len());

    let client = TmdbClient::new(args.api_key);
    let plan = plan_new_names(&client, &files, !args.drop_info, args.max);

    for (old_name, new_name) in &plan.renames {
        println!("{old_name} -> {new_name}");
    }
    if !plan.not_found.is_empty() {
        println!("\nNo release year for {} files:", plan.not_found.len());
        for name in &plan.not_found {
            println!("  {name}");
        }
    }

    if args.dry_run {
        println!("\nDry run, nothing renamed");
    } else {
        apply_renames(&args.input_dir, &plan.renames)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Mux(args) => run_mux(args),
        Commands::Extract(args) => run_extract(args),
        Commands::Rename(args) => run_rename(args),
    };

    if let Err(e) = result {
        log::error!("{e}");
        process::exit(1);
    }
}
