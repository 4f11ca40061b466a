#![allow(clippy::needless_pass_by_value)] // clap requires owned values

//! classcal CLI - class schedule to calendar converter

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use classcal_calendar::{parse_ics, write_calendar};
use classcal_cli::{
    describe_bucket, Config, FormOutcome, PeriodInputSource, PlanFile, PromptForm,
};
use classcal_core::{load_schedule, Bucket, CategorizedRow, EventBuilder};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

/// Exit status when the user cancels the form
const EXIT_CANCELLED: i32 = 3;

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Default log filter for this level (`RUST_LOG` still wins)
    const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
        }
    }
}

/// Listing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
enum ListFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// JSON array
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "classcal",
    about = "Turn a class-day schedule export into a calendar of class meetings",
    long_about = "Turn a class-day schedule export (CSV with Subject and Start Date columns)\n\
                  into an iCalendar file with one reminder-bearing event per class period.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Use this config file instead of ~/.classcal.toml and ./.classcal.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a schedule export into an iCalendar file
    #[command(long_about = "Convert a schedule export into an iCalendar file.\n\
                      \n\
                      Rows whose Subject marks an M or T day become class days; for each\n\
                      class day one event is written per period that has a class.\n\
                      Classes and locations come from --plan, or from an interactive form.\n\
                      \n\
                      Defaults can be set via .classcal.toml configuration file.")]
    Convert {
        /// Schedule CSV (default: from config, or \"Spring 2024 M-T Day Calendar.CSV\")
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Calendar file to write (default: from config, or calendar_with_event.ics)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Period plan (TOML) instead of the interactive form
        #[arg(short, long, value_name = "FILE")]
        plan: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,

        /// Build the events but do not write the calendar
        #[arg(long)]
        dry_run: bool,
    },

    /// List the schedule rows that count as class days
    Categorize {
        /// Schedule CSV (default: from config)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ListFormat,
    },

    /// List the events in an iCalendar file
    Inspect {
        /// Calendar file to read
        #[arg(value_name = "ICS")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ListFormat,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_filter()),
    )
    .target(env_logger::Target::Stderr)
    .init();
}

fn main() {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    init_logging(verbosity);

    match run(args, verbosity) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            process::exit(1);
        }
    }
}

fn run(args: Args, verbosity: Verbosity) -> Result<i32> {
    if let Commands::Completions { shell } = args.command {
        generate(shell, &mut Args::command(), "classcal", &mut io::stdout());
        return Ok(0);
    }

    let config = Config::load(args.config.as_deref())?;

    match args.command {
        Commands::Convert {
            input,
            output,
            plan,
            force,
            dry_run,
        } => convert(
            &config,
            &ConvertOptions {
                input: config.resolve_input(input),
                output: config.resolve_output(output),
                plan: config.resolve_plan(plan),
                force,
                dry_run,
            },
            verbosity,
        ),
        Commands::Categorize { input, format } => {
            categorize(&config.resolve_input(input), format)?;
            Ok(0)
        }
        Commands::Inspect { path, format } => {
            inspect(&path, format)?;
            Ok(0)
        }
        Commands::Completions { .. } => Ok(0),
    }
}

struct ConvertOptions {
    input: PathBuf,
    output: PathBuf,
    plan: Option<PathBuf>,
    force: bool,
    dry_run: bool,
}

fn convert(config: &Config, opts: &ConvertOptions, verbosity: Verbosity) -> Result<i32> {
    // Resolve everything that can fail before asking the user for input.
    let tables = config.period_tables()?;
    let meta = config.calendar_meta();
    let rows = load_schedule(&opts.input)
        .with_context(|| format!("Failed to load schedule {}", opts.input.display()))?;

    if !opts.dry_run && opts.output.exists() && !opts.force {
        bail!(
            "Output file {} already exists (use --force to overwrite)",
            opts.output.display()
        );
    }

    if verbosity.should_show_output() {
        eprintln!(
            "{} {} class days in {}",
            "Loaded".green().bold(),
            rows.len(),
            opts.input.display()
        );
    }

    let outcome = match &opts.plan {
        Some(path) => PlanFile::new(path).collect()?,
        None => {
            let stdin = io::stdin();
            PromptForm::new(stdin.lock(), io::stderr()).collect()?
        }
    };

    let FormOutcome::Submitted(plan) = outcome else {
        eprintln!(
            "{} Form cancelled; no calendar written",
            "Cancelled:".yellow().bold()
        );
        return Ok(EXIT_CANCELLED);
    };

    if verbosity.should_show_output() {
        for bucket in Bucket::ALL {
            eprintln!(
                "{}-day classes: {}",
                bucket,
                describe_bucket(&plan, bucket)
            );
        }
    }

    let events = EventBuilder::new(tables)
        .with_reminder_minutes(config.reminder_minutes())
        .build(&rows, &plan);

    if opts.dry_run {
        println!(
            "Would write {} events to {}",
            events.len(),
            opts.output.display()
        );
        return Ok(0);
    }

    write_calendar(&opts.output, &events, &meta)?;
    if verbosity.should_show_output() {
        println!(
            "{} {} events to {}",
            "✓ Wrote".green().bold(),
            events.len(),
            opts.output.display()
        );
    }
    Ok(0)
}

fn categorize(input: &Path, format: ListFormat) -> Result<()> {
    let rows = load_schedule(input)
        .with_context(|| format!("Failed to load schedule {}", input.display()))?;

    match format {
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        ListFormat::Text => {
            for CategorizedRow { row, category } in &rows {
                println!("{}  {:<5} {}", row.date.format("%m/%d/%Y"), category, row.subject);
            }
        }
    }
    Ok(())
}

fn inspect(path: &Path, format: ListFormat) -> Result<()> {
    let info = parse_ics(path)?;

    match format {
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&info.events)?);
        }
        ListFormat::Text => {
            for event in &info.events {
                let when = match (event.start, event.end) {
                    (Some(start), Some(end)) => format!(
                        "{} - {}",
                        start.format("%Y-%m-%d %H:%M"),
                        end.format("%H:%M")
                    ),
                    (Some(start), None) => start.format("%Y-%m-%d %H:%M").to_string(),
                    _ => "(no time)".to_string(),
                };
                match event.location.as_deref().filter(|l| !l.is_empty()) {
                    Some(location) => println!("{when}  {} @ {location}", event.summary),
                    None => println!("{when}  {}", event.summary),
                }
            }
            println!("{} events", info.events.len());
        }
    }
    Ok(())
}
