use std::{io, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pocatalog_cli::{
    CommandConverter, Config, ExtractOptions, load_config, run_extract, run_format, run_inspect,
    run_translate, run_update,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pocatalog", author, version, about, long_about = None)]
struct Args {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./pocatalog.toml if present)
    #[arg(long, global = true, env = "POCATALOG_CONFIG")]
    config: Option<PathBuf>,

    /// Fail instead of replacing an existing output file
    #[arg(long, global = true)]
    no_overwrite: bool,

    /// Wrap width for entry bodies
    #[arg(long, global = true)]
    line_width: Option<usize>,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract strings from the Apple, Android and Windows sources into a template.
    Extract {
        /// Root of the Apple sources
        apple_root: Option<PathBuf>,
        /// Root of the Android sources
        android_root: Option<PathBuf>,
        /// Root of the Windows sources
        windows_root: Option<PathBuf>,
        /// The template (.pot) to update
        template: Option<PathBuf>,
        /// Write here instead of updating the template in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite a template in canonical form.
    Format {
        /// The template (.pot) to format
        template: PathBuf,
        /// Write here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Bring a translation in line with its template.
    Update {
        /// The translation (.po) to update
        catalog: PathBuf,
        /// The template (.pot) to follow
        template: PathBuf,
        /// Write here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill untranslated entries from a sibling translation through a converter.
    Translate {
        /// The translation to take strings from
        source: PathBuf,
        /// The translation to fill
        target: PathBuf,
        /// Write here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Converter command and its arguments; must come last
        #[arg(long, num_args = 1.., allow_hyphen_values = true, value_name = "COMMAND")]
        converter: Vec<String>,
    },

    /// Show a summary of a catalog.
    Inspect {
        /// The catalog or template to inspect
        file: PathBuf,
        /// Print the whole catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn required(value: Option<PathBuf>, fallback: &Option<PathBuf>, name: &str) -> Result<PathBuf> {
    value
        .or_else(|| fallback.clone())
        .ok_or_else(|| anyhow!("Missing {name}; pass it as an argument or set it in pocatalog.toml"))
}

fn run(args: Args) -> Result<()> {
    let cwd = std::env::current_dir().context("Cannot determine the working directory")?;
    let loaded = load_config(args.config.as_deref(), &cwd)?;
    if let Some(path) = &loaded.path {
        tracing::debug!(path = %path.display(), "loaded configuration");
    }
    let config: Config = loaded.config;
    let write = config.write_options(args.no_overwrite, args.line_width);

    match args.commands {
        Commands::Extract {
            apple_root,
            android_root,
            windows_root,
            template,
            output,
        } => {
            let defaults = &config.extract;
            let options = ExtractOptions {
                apple_root: required(apple_root, &defaults.apple_root, "apple root")?,
                android_root: required(android_root, &defaults.android_root, "android root")?,
                windows_root: required(windows_root, &defaults.windows_root, "windows root")?,
                template: required(template, &defaults.template, "template")?,
                output,
            };
            run_extract(&options, &write)
        }
        Commands::Format { template, output } => run_format(&template, output.as_deref(), &write),
        Commands::Update {
            catalog,
            template,
            output,
        } => run_update(&catalog, &template, output.as_deref(), &write),
        Commands::Translate {
            source,
            target,
            output,
            converter,
        } => {
            let command = if converter.is_empty() {
                &config.translate.converter
            } else {
                &converter
            };
            let converter = CommandConverter::new(command).ok_or_else(|| {
                anyhow!("Missing converter; pass --converter or set [translate] converter")
            })?;
            tracing::debug!(program = converter.program(), "using converter");
            run_translate(&source, &target, &converter, output.as_deref(), &write)
        }
        Commands::Inspect { file, json } => {
            println!("{}", run_inspect(&file, json)?);
            Ok(())
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Args::command(), "pocatalog", &mut io::stdout());
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
