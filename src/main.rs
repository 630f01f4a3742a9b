// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use wordsik::app_config::{self, Config};
use wordsik::report::{self, OutputFormat};
use wordsik::validation::{
    ConsoleLogger, FileLogger, TeeLogger, ValidationLogger, ValidationOptions, ValidationService,
    ValidatorKind,
};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum CliOutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(cli_format: CliOutputFormat) -> Self {
        match cli_format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the content tree (default command)
    Validate(ValidateArgs),

    /// Show which language, content type and grade directories hold content
    Status,

    /// Generate shell completions for wordsik
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Default)]
struct ValidateArgs {
    /// Check JSON syntax
    #[arg(short, long)]
    json: bool,

    /// Check content structure and quality
    #[arg(short, long)]
    content: bool,

    /// Check translations of changed files against the base language
    #[arg(short, long)]
    translations: bool,

    /// Check per-language characters and directory layout
    #[arg(short, long)]
    languages: bool,

    /// Run every validator (the default when none is selected)
    #[arg(short, long)]
    all: bool,

    /// Validate these files instead of the whole tree
    #[arg(short, long, num_args = 1.., value_name = "PATH")]
    files: Vec<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    output: CliOutputFormat,

    /// Exit with an error when warnings are found
    #[arg(long)]
    fail_on_warnings: bool,

    /// Also append validator output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug details
    #[arg(short, long)]
    verbose: bool,
}

impl ValidateArgs {
    fn kinds(&self) -> Vec<ValidatorKind> {
        if self.all {
            return Vec::new();
        }

        [
            (self.json, ValidatorKind::Syntax),
            (self.content, ValidatorKind::Content),
            (self.translations, ValidatorKind::Translation),
            (self.languages, ValidatorKind::Locale),
        ]
        .into_iter()
        .filter_map(|(selected, kind)| selected.then_some(kind))
        .collect()
    }
}

/// wordsik - validation for multi-language word-list content
#[derive(Parser, Debug)]
#[command(name = "wordsik")]
#[command(version)]
#[command(about = "Validate multi-language word-list content")]
#[command(long_about = "wordsik validates a tree of word-list units laid out as
<data-root>/<contentType>/<language>/<grade>/<unit>.json.

EXAMPLES:
    wordsik validate                              # Run every validator
    wordsik validate -j -c                        # Syntax and content checks only
    wordsik validate -t                           # Translations of files changed since origin/main
    wordsik validate -f data/vocabulary/es/grade-1/week-1.json
    wordsik validate -o markdown > report.md      # Markdown report
    wordsik status                                # Directory overview
    wordsik completions bash > wordsik.bash       # Generate bash completions

CONFIGURATION:
    Configuration is read from wordsik.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(long, global = true, default_value = "wordsik.json")]
    config_path: PathBuf,

    /// Root of the content tree
    #[arg(long, global = true)]
    data_root: Option<PathBuf>,

    /// Set logging level
    #[arg(long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✗", "1;31"),
            Level::Warn => ("⚠", "1;33"),
            Level::Info => ("•", "1;32"),
            Level::Debug => ("·", "1;36"),
            Level::Trace => ("»", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace lets the max level decide later; the real level is set once config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let command = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "wordsik", &mut std::io::stdout());
            return Ok(());
        }
        Some(command) => command,
        None => Commands::Validate(ValidateArgs::default()),
    };

    let mut config = Config::load(&cli.config_path)?;
    if let Some(data_root) = cli.data_root {
        config.data_root = data_root;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }

    match command {
        Commands::Validate(args) => run_validate(config, args).await,
        Commands::Status => run_status(config),
        Commands::Completions { .. } => Ok(()),
    }
}

fn apply_log_level(config: &Config, args: &ValidateArgs) {
    let level = if args.quiet {
        LevelFilter::Error
    } else if args.verbose {
        LevelFilter::Debug
    } else {
        config.log_level.to_level_filter()
    };
    log::set_max_level(level);
}

async fn run_validate(mut config: Config, args: ValidateArgs) -> Result<()> {
    if args.fail_on_warnings {
        config.fail_on_warnings = true;
    }
    apply_log_level(&config, &args);

    config.validate().context("Configuration validation failed")?;
    debug!("Using data root {:?}", config.data_root);

    let logger: Arc<dyn ValidationLogger> = match &args.log_file {
        Some(path) => Arc::new(TeeLogger::new(vec![
            Arc::new(ConsoleLogger),
            Arc::new(FileLogger::new(path)),
        ])),
        None => Arc::new(ConsoleLogger),
    };

    let fail_on_warnings = config.fail_on_warnings;
    let service = ValidationService::new(config, logger);
    let options = ValidationOptions {
        kinds: args.kinds(),
        files: args.files.clone(),
    };

    let report = service.run_report(&options).await?;
    println!("{}", report::render(&report, args.output.into())?);

    if report.result.should_fail(fail_on_warnings) {
        if report.result.success {
            info!("Warnings found and fail-on-warnings is set");
        }
        std::process::exit(1);
    }

    info!("Validation passed");
    Ok(())
}

fn run_status(config: Config) -> Result<()> {
    log::set_max_level(config.log_level.to_level_filter());
    config.validate().context("Configuration validation failed")?;

    let service = ValidationService::new(config, Arc::new(ConsoleLogger));
    print!("{}", report::render_status(&service.status()));
    Ok(())
}
