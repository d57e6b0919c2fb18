// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use lingvasub::app_config::{self, Config};
use lingvasub::app_controller::Controller;
use lingvasub::file_utils::FileManager;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate subtitle files (default command)
    #[command(alias = "tr")]
    Translate(TranslateArgs),

    /// Check that the translation endpoint is reachable
    Check(CommonArgs),

    /// Generate shell completions for lingvasub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Translation endpoint URL (e.g. http://localhost:3000)
    #[arg(long, env = "LINGVA_ENDPOINT")]
    endpoint: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug, Clone)]
struct TranslateArgs {
    /// Input subtitle file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Directory for translated files (defaults to the input's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Source language label or code (e.g. 'English', 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language label or code (e.g. 'Српски', 'sr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Maximum characters sent per translation request
    #[arg(short, long)]
    max_chars: Option<usize>,

    #[command(flatten)]
    common: CommonArgs,
}

/// lingvasub - subtitle translation through a Lingva Translate endpoint
#[derive(Parser, Debug)]
#[command(name = "lingvasub")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Translate subtitle files through a Lingva Translate endpoint")]
#[command(long_about = "lingvasub sends subtitle text to a Lingva Translate endpoint in size-bounded chunks
and rebuilds the subtitle file with the original numbering and timestamps.

EXAMPLES:
    lingvasub movie.srt                          # Translate using default config
    lingvasub -s English -t Српски movie.srt     # Pick languages by label
    lingvasub -s en -t sr -o out/ movie.srt      # Pick languages by code, write to out/
    lingvasub -f /subtitles/                     # Translate a whole directory
    lingvasub check                              # Check the endpoint is up
    lingvasub completions bash > lingvasub.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: Option<TranslateArgs>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and label for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
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
            let (color, label) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is loaded; the level is adjusted afterwards
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lingvasub", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Check(common)) => run_check(common).await,
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            let args = cli.translate.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;
            run_translate(args).await
        }
    }
}

/// Load the config file and apply the shared CLI overrides
fn load_config(common: &CommonArgs) -> Result<Config> {
    if let Some(level) = &common.log_level {
        log::set_max_level(LevelFilter::from(&app_config::LogLevel::from(level.clone())));
    }

    let mut config = Config::load_or_create(&common.config_path)?;

    if let Some(endpoint) = &common.endpoint {
        config.translator.endpoint = endpoint.clone();
    }

    match &common.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(LevelFilter::from(&config.log_level)),
    }

    Ok(config)
}

async fn run_check(common: CommonArgs) -> Result<()> {
    let config = load_config(&common)?;
    let controller = Controller::with_config(config)?;
    controller.check_connection().await
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = load_config(&options.common)?;

    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }

    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }

    if let Some(max_chars) = options.max_chars {
        config.translator.max_chars_per_request = max_chars;
    }

    config.validate()
        .context("Configuration validation failed")?;

    let controller = Controller::with_config(config)?;
    let output_dir = options.output_dir.as_deref();

    if FileManager::file_exists(&options.input_path) {
        controller.run(&options.input_path, output_dir, options.force_overwrite).await?;
    } else if FileManager::dir_exists(&options.input_path) {
        controller.run_folder(&options.input_path, output_dir, options.force_overwrite).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
