use anyhow::Result;
use blackboard_core::config::{AppConfig, PRIMARY_CONTEXT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "blackboard")]
#[command(about = "Blackboard CLI - a note stack with draft/history navigation and cloud sync", long_about = None)]
struct Cli {
    /// Blackboard context to operate on
    #[arg(short, long, global = true, default_value = PRIMARY_CONTEXT)]
    context: String,

    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    #[command(flatten)]
    Board(BoardCommand),
}

/// Commands that operate on an open store.
#[derive(Subcommand, Debug)]
enum BoardCommand {
    /// Print the currently viewed slot
    Show,
    /// Overwrite the currently viewed slot (reads stdin when no text is given)
    Write { text: Vec<String> },
    /// Stack the draft, or step one entry towards the draft
    Push,
    /// Step one entry deeper into history
    Pull,
    /// Show stack position and session
    Status,
    /// Reset the context
    Clear,
    /// Reset every known context
    Wipe,
    /// Create an account on the backend
    Register {
        username: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Log in and remember the session
    Login {
        username: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the session
    Logout,
    /// Upload the context to the backend
    Commit {
        /// Commit every known context
        #[arg(long)]
        all: bool,
    },
    /// Replace the context with the backend copy
    Checkout {
        /// Check out every known context
        #[arg(long)]
        all: bool,
    },
    /// Check that the backend answers
    Ping,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration if no file exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = commands::utils::config_service(cli.config.clone())?;
    let config = config_service.load()?;
    commands::utils::init_tracing(&config.log_level);

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::path(&config_service),
            ConfigAction::Show => commands::config::show(&config)?,
            ConfigAction::Init => commands::config::init(&config_service)?,
        },
        Commands::Board(command) => run_board(command, &config, &cli.context).await?,
    }

    Ok(())
}

async fn run_board(command: BoardCommand, config: &AppConfig, context: &str) -> Result<()> {
    let mut store = commands::utils::open_store(config)?;

    match command {
        BoardCommand::Show => commands::board::show(&store, context),
        BoardCommand::Write { text } => commands::board::write(&mut store, context, text)?,
        BoardCommand::Push => commands::board::push(&mut store, context),
        BoardCommand::Pull => commands::board::pull(&mut store, context),
        BoardCommand::Status => commands::board::status(&store, context),
        BoardCommand::Clear => commands::board::clear(&mut store, context),
        BoardCommand::Wipe => commands::board::wipe(&mut store),
        BoardCommand::Register { username, password } => {
            commands::account::register(&store, &username, password).await?
        }
        BoardCommand::Login { username, password } => {
            commands::account::login(&mut store, &username, password).await?
        }
        BoardCommand::Logout => commands::account::logout(&mut store),
        BoardCommand::Ping => commands::account::ping(&store).await,
        BoardCommand::Commit { all } => commands::sync::commit(&store, context, all).await,
        BoardCommand::Checkout { all } => commands::sync::checkout(&mut store, context, all).await,
    }

    Ok(())
}
