//! lightbnb CLI - LightBnB property rental data access
//!
//! Thin command-line surface over `lightbnb-db`:
//! - User lookup and creation (`users` subcommand)
//! - A guest's reservations (`reservations` subcommand)
//! - Property search and creation (`properties` subcommand)
//! - Loading JSON fixtures (`seed` subcommand)

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod output;
mod tracing_setup;

use config::LightbnbConfig;
use output::OutputFormat;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and populate a LightBnB property rental database",
    long_about = "Look up users, list a guest's reservations, search properties with \
                  optional filters, and add users and properties to a LightBnB \
                  PostgreSQL database."
)]
struct Cli {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (shows generated SQL)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up or create users
    Users(commands::users::UsersArgs),
    /// List a guest's reservations
    Reservations(commands::reservations::ReservationsArgs),
    /// Search or add properties
    Properties(commands::properties::PropertiesArgs),
    /// Load users and properties from JSON fixtures
    Seed(commands::seed::SeedArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    let ctx = commands::Context {
        config: LightbnbConfig::load(),
        database_url: cli.database_url,
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
    };

    match cli.command {
        Commands::Users(args) => commands::run_users(args, &ctx).await?,
        Commands::Reservations(args) => commands::run_reservations(args, &ctx).await?,
        Commands::Properties(args) => commands::run_properties(args, &ctx).await?,
        Commands::Seed(args) => commands::run_seed(args, &ctx).await?,
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
