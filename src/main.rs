use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use eduplatform_cli::seeder::{self, DEMO_ACCOUNTS, SeedSummary};
use eduplatform_cli::shell::{Shell, TerminalConsole};
use eduplatform_config::AppConfig;
use eduplatform_core::AppError;
use eduplatform_export::{ExportFormat, ExportManager};
use eduplatform_store::DataStore;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "eduplatform")]
#[command(about = "EduPlatform - in-memory educational records console", long_about = None)]
struct Cli {
    /// Skip the four demo accounts
    #[arg(long, global = true)]
    no_demo: bool,

    /// Number of fake students to generate at startup
    #[arg(long, global = true)]
    extra_students: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive console (default)
    Run,
    /// Seed, export without prompting and print the export log
    Export {
        #[arg(short = 'f', long, value_enum, default_value_t = FormatArg::All)]
        format: FormatArg,

        /// Destination file, or directory when exporting all formats
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    All,
    Xlsx,
    Csv,
    Sql,
}

impl FormatArg {
    fn format(self) -> Option<ExportFormat> {
        match self {
            Self::All => None,
            Self::Xlsx => Some(ExportFormat::Xlsx),
            Self::Csv => Some(ExportFormat::Csv),
            Self::Sql => Some(ExportFormat::Sql),
        }
    }
}

fn main() {
    dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if cli.no_demo {
        config.seed.demo_accounts = false;
    }
    if let Some(count) = cli.extra_students {
        config.seed.extra_students = count;
    }

    let guard = eduplatform_observability::init_logging(&config.logging);
    let result = run(cli.command.unwrap_or(Commands::Run), config);
    if let Err(e) = &result {
        error!(error = %e, "Session ended with an error");
        eprintln!("\n❌ {:#}", e);
    }

    // Flush the file writer before exiting
    drop(guard);
    if result.is_err() {
        std::process::exit(1);
    }
}

fn run(command: Commands, config: AppConfig) -> anyhow::Result<()> {
    let mut store = DataStore::new();
    let summary = seeder::seed(&mut store, &config.seed).map_err(AppError::into_inner)?;
    let exports = ExportManager::new(config.export);

    match command {
        Commands::Run => {
            print_demo_credentials(&summary);
            Shell::new(store, exports, TerminalConsole).run()
        }
        Commands::Export { format, output } => export(&store, exports, format, output),
    }
}

fn print_demo_credentials(summary: &SeedSummary) {
    if summary.demo.is_none() {
        return;
    }
    println!("\n🔑 Demo accounts:");
    for account in DEMO_ACCOUNTS {
        println!("   {:<8} {} / {}", account.role.name(), account.email, account.password);
    }
    println!();
}

fn export(
    store: &DataStore,
    mut exports: ExportManager,
    format: FormatArg,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let ok = match (format.format(), output) {
        (None, Some(dir)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            exports = ExportManager::new(exports.config().rooted_at(dir));
            exports.export_all(store)
        }
        (None, None) => exports.export_all(store),
        (Some(format), Some(path)) => exports.export_to(format, store, &path),
        (Some(format), None) => exports.export(format, store),
    };

    println!("📋 Export Log");
    for entry in exports.log().iter() {
        println!("{}", entry);
    }

    if !ok {
        bail!("One or more exports failed");
    }
    info!(users = store.user_count(), "Export finished");
    Ok(())
}
