use clap::{Args, Parser, Subcommand, ValueEnum};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use selectai::config::Config;
use selectai::{RankError, NO_FILE_PROMPT};

const EXIT_SUCCESS: i32 = 0;
const EXIT_MISSING_COLUMNS: i32 = 1;
const EXIT_INVALID_DATA: i32 = 2;
const EXIT_MALFORMED_FILE: i32 = 3;
const EXIT_CONFIG: i32 = 4;
const EXIT_IO: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
enum OutputFormat {
    /// Aligned tables for reading
    #[default]
    Table,
    /// Tab-separated ranking for scripts
    Tsv,
    /// JSON array of shortlist rows
    Json,
}

#[derive(Args, Debug, Default)]
struct RankArgs {
    /// CSV of applicants with Name, Education, Experience and Skills columns
    file: Option<PathBuf>,

    /// Where to write the shortlist (defaults to export_path from config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show the ranking without writing a shortlist
    #[arg(long)]
    no_export: bool,

    /// Only show and export the top N applicants (N >= 1)
    #[arg(long)]
    top: Option<NonZeroUsize>,

    /// Output format for the ranking
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank applicants and export the shortlist (default if no subcommand)
    Rank(RankArgs),
    /// Check that a CSV can be ranked, without writing anything
    Check {
        /// CSV file to check
        file: PathBuf,
    },
    /// Interactive ranking view
    Tui {
        /// CSV file to load on start
        file: Option<PathBuf>,
    },
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "selectai")]
#[command(about = "Rank job applicants from a CSV and export a shortlist", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/selectai/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn exit_code(err: &RankError) -> i32 {
    match err {
        RankError::NoFileProvided => EXIT_SUCCESS,
        RankError::MissingColumns { .. } => EXIT_MISSING_COLUMNS,
        RankError::InvalidData { .. } => EXIT_INVALID_DATA,
        RankError::MalformedFile(_) => EXIT_MALFORMED_FILE,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    selectai::logging::init(cli.verbose);

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Rank(RankArgs::default()));
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = command {
        let path = match config_path {
            Some(p) => Ok(p),
            None => selectai::config::get_config_path(),
        };
        let path = match path {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = selectai::config::write_default_config(&path, force) {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match selectai::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = selectai::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let code = match command {
        Commands::Rank(args) => run_rank(args, &config, cli.verbose),
        Commands::Check { file } => run_check(file),
        Commands::Tui { file } => run_tui(file, config).await,
        Commands::Init { .. } => EXIT_SUCCESS,
    };

    std::process::exit(code);
}

fn load(path: &Path) -> Result<selectai::Upload, i32> {
    let bytes = selectai::read_upload(path).map_err(|e| {
        eprintln!("Error: {:#}", e);
        EXIT_IO
    })?;

    selectai::process_upload(&bytes).map_err(|e| {
        eprintln!("Error: {}", e);
        exit_code(&e)
    })
}

fn run_rank(args: RankArgs, config: &Config, verbose: bool) -> i32 {
    let start_time = Instant::now();

    let Some(path) = args.file else {
        println!("{}", NO_FILE_PROMPT);
        println!("Usage: selectai rank <FILE.csv>");
        return EXIT_SUCCESS;
    };

    let upload = match load(&path) {
        Ok(u) => u,
        Err(code) => return code,
    };

    let use_colors = selectai::output::should_use_colors();
    let table_mode = args.format == OutputFormat::Table;

    if table_mode {
        println!("Uploaded Data");
        println!(
            "{}",
            selectai::output::format_dataset_table(&upload.dataset, use_colors)
        );
        println!();
    }

    let ranked = match &upload.ranking {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_code(e);
        }
    };

    let shown = ranked.top(args.top.map(NonZeroUsize::get));

    match args.format {
        OutputFormat::Table => {
            println!("Ranked Applicants");
            println!(
                "{}",
                selectai::output::format_ranked_table(shown, config.decimals, use_colors)
            );
        }
        OutputFormat::Tsv => println!("{}", selectai::output::format_tsv(shown)),
        OutputFormat::Json => match selectai::output::format_json(shown) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {:#}", e);
                return EXIT_IO;
            }
        },
    }

    if verbose {
        eprintln!();
        for applicant in shown {
            eprintln!(
                "{}",
                selectai::output::format_breakdown(applicant, config.decimals)
            );
        }
    }

    if !args.no_export {
        let out_path = args
            .output
            .unwrap_or_else(|| PathBuf::from(&config.export_path));
        if let Err(e) = selectai::output::write_shortlist(&out_path, shown) {
            eprintln!("Error: {:#}", e);
            return EXIT_IO;
        }

        let msg = format!(
            "Shortlist saved to {} ({} applicants, {})",
            out_path.display(),
            shown.len(),
            selectai::output::SHORTLIST_MIME
        );
        if table_mode {
            println!();
            println!("{}", msg);
        } else {
            eprintln!("{}", msg);
        }
    }

    if verbose {
        eprintln!(
            "Total: {} applicants in {:?}",
            ranked.len(),
            start_time.elapsed()
        );
    }

    EXIT_SUCCESS
}

fn run_check(path: PathBuf) -> i32 {
    let upload = match load(&path) {
        Ok(u) => u,
        Err(code) => return code,
    };

    match &upload.ranking {
        Ok(ranked) => {
            println!(
                "{}: OK ({} applicants, {} columns)",
                path.display(),
                ranked.len(),
                upload.dataset.headers().len()
            );
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            exit_code(e)
        }
    }
}

async fn run_tui(file: Option<PathBuf>, config: Config) -> i32 {
    let colors = selectai::tui::resolve_theme(config.theme);
    let mut app = selectai::tui::App::new(config, colors);

    if let Some(path) = file {
        app.load_path(path);
    }

    if let Err(e) = selectai::tui::run_tui(app).await {
        eprintln!("TUI error: {:#}", e);
        return EXIT_IO;
    }

    EXIT_SUCCESS
}
