use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autoblog::cli::Output;
use autoblog::{AppError, Category, ConfigLoader};

#[derive(Parser)]
#[command(name = "autoblog")]
#[command(
    version,
    about = "Generate a blog post with Gemini and publish it to Webflow"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Config file (default: ./autoblog.toml)")]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one post and publish it
    Run {
        #[arg(long, help = "Create a draft for review instead of publishing live")]
        draft: bool,
        #[arg(long, help = "Force a category: product, economy, ecosystem")]
        category: Option<Category>,
    },

    /// Generate a post and show it without publishing
    Preview {
        #[arg(long, help = "Force a category: product, economy, ecosystem")]
        category: Option<Category>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json (CMS payload)"
        )]
        format: String,
    },

    /// List models that support generateContent
    Models,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write a default configuration file
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mautoblog encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            Output::new().error(&format!("Failed: {}", e));
            let code = e
                .downcast_ref::<AppError>()
                .map(AppError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    ConfigLoader::load_dotenv();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Commands::Run { draft, category } => {
            use autoblog::cli::commands::run::{RunOptions, run};

            runtime.block_on(run(RunOptions {
                config: cli.config,
                draft,
                category,
                quiet: cli.quiet,
            }))?;
        }
        Commands::Preview { category, format } => {
            runtime.block_on(autoblog::cli::commands::preview::run(
                cli.config, category, &format, cli.quiet,
            ))?;
        }
        Commands::Models => {
            runtime.block_on(autoblog::cli::commands::models::run(cli.config, cli.quiet))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                autoblog::cli::commands::config::show(cli.config.as_deref(), &format)?;
            }
            ConfigAction::Path => {
                autoblog::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                autoblog::cli::commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
