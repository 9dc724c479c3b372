use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use dpgen_core::config::{self, CONFIG_FILE_NAME, DpgenConfig};
use dpgen_core::document::DocumentFormat;
use dpgen_core::publish::{AssumeTracked, DiffPublisher, NoopHook};
use dpgen_core::{Pipeline, RunReport};

/// Exit code when every document was already published and tracked.
const EXIT_UNCHANGED: u8 = 0;
/// Exit code when the published set was not already up to date.
const EXIT_CHANGED: u8 = 1;
/// Exit code for fatal errors.
const EXIT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(
    name = "dpgen",
    about = "Convert data product definitions into OpenAPI documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every definition and publish changed documents
    Convert {
        /// Directory holding definition artifacts
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Directory to publish documents to
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Published document format
        #[arg(long)]
        format: Option<FormatArg>,

        /// Skip the post-write validation hook
        #[arg(long)]
        no_hook: bool,
    },

    /// Print the document synthesized from one definition
    Inspect {
        /// Path to the definition artifact
        #[arg(short, long)]
        input: PathBuf,

        /// Source root the definition name is derived from
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json")]
        format: FormatArg,
    },

    /// Initialize a new dpgen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => DocumentFormat::Json,
            FormatArg::Yaml => DocumentFormat::Yaml,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            source,
            dest,
            format,
            no_hook,
        } => {
            let result = cmd_convert(source, dest, format, no_hook);
            match &result {
                Ok(report) => print_summary(report),
                Err(e) => log::error!("{e:#}"),
            }
            return ExitCode::from(convert_exit_code(&result));
        }

        Commands::Inspect {
            input,
            source,
            format,
        } => cmd_inspect(input, source, format).map(|()| ExitCode::SUCCESS),

        Commands::Init { force } => cmd_init(force).map(|()| ExitCode::SUCCESS),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "dpgen", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    };

    result.unwrap_or_else(|e| {
        log::error!("{e:#}");
        ExitCode::from(EXIT_ERROR)
    })
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<DpgenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

fn cmd_convert(
    source: Option<PathBuf>,
    dest: Option<PathBuf>,
    format: Option<FormatArg>,
    no_hook: bool,
) -> Result<RunReport> {
    let mut cfg = try_load_config()?.unwrap_or_default();
    if let Some(format) = format {
        cfg.format = format.into();
    }
    if no_hook {
        cfg.hook.command.clear();
    }
    let source = source.unwrap_or_else(|| PathBuf::from(&cfg.source));
    let dest = dest.unwrap_or_else(|| PathBuf::from(&cfg.destination));

    Pipeline::from_config(&cfg)
        .run(&source, &dest)
        .with_context(|| format!("failed to convert definitions in {}", source.display()))
}

/// Exit code for a `convert` run: 0 up to date, 1 changed, 2 fatal error.
fn convert_exit_code(result: &Result<RunReport>) -> u8 {
    match result {
        Ok(report) if report.changed() => EXIT_CHANGED,
        Ok(_) => EXIT_UNCHANGED,
        Err(_) => EXIT_ERROR,
    }
}

fn print_summary(report: &RunReport) {
    let changed: Vec<_> = report.changed_entries().collect();
    if changed.is_empty() {
        eprintln!(
            "All {} document(s) are up to date.",
            report.entries.len()
        );
        return;
    }
    eprintln!(
        "{} of {} document(s) need to be committed:",
        changed.len(),
        report.entries.len()
    );
    for entry in changed {
        eprintln!("  {} ({:?})", entry.outcome.path.display(), entry.outcome.status);
    }
}

fn cmd_inspect(input: PathBuf, source: Option<PathBuf>, format: FormatArg) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let source = source.unwrap_or_else(|| PathBuf::from(&cfg.source));

    // Nothing is published, so version control and the hook stay inert.
    let pipeline = Pipeline::new(DiffPublisher::new(
        cfg.format,
        Box::new(AssumeTracked),
        Box::new(NoopHook),
    ))
    .with_extensions(cfg.extensions.clone());

    let document = pipeline
        .preview(&source, &input)
        .with_context(|| format!("failed to synthesize {}", input.display()))?;

    let rendered = DocumentFormat::from(format)
        .render(&document)
        .map_err(|e| anyhow::anyhow!(e))?;
    print!("{rendered}");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
