use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

mod domain;
mod application;
mod infrastructure;

use application::errors::BotError;
use application::messaging::{CommandParser, MessageDispatcher, SubstitutionEngine};
use application::services::{BotRuntime, CommandService, RuntimeSettings};
use domain::traits::{Connection, ScoreStore};
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::config::Config;
use infrastructure::emotes;
use infrastructure::storage::JsonScoreStore;

/// Exit status for fatal startup or transport errors
const EXIT_FATAL: i32 = 2;

/// Capacity of the inbound event channel
const EVENT_BUFFER: usize = 256;

#[derive(Parser)]
#[command(name = "tsobot")]
#[command(about = "Chat bot with admin commands, emote substitution and a scoreboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run(RunArgs),
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

/// Overrides for values from the config file and environment
#[derive(Args, Default)]
struct RunArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Use TLS
    #[arg(long)]
    ssl: Option<bool>,
    #[arg(long)]
    nick: Option<String>,
    /// NickServ IDENTIFY password
    #[arg(long)]
    pass: Option<String>,
    /// Space separated list of channels to join
    #[arg(long)]
    join: Option<String>,
    /// Space separated list of privileged nicks
    #[arg(long)]
    admin: Option<String>,
    /// Directory for auxiliary cached data
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

impl RunArgs {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(ssl) = self.ssl {
            config.server.ssl = ssl;
        }
        if let Some(nick) = self.nick {
            config.bot.nick = nick;
        }
        if let Some(pass) = self.pass {
            config.bot.password = Some(pass);
        }
        if let Some(join) = self.join {
            config.bot.channels = join;
        }
        if let Some(admin) = self.admin {
            config.bot.admins = admin;
        }
        if let Some(dir) = self.cache_dir {
            config.storage.cache_dir = dir;
        }
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let code = match run_bot(&cli.config, args) {
                Ok(code) => code,
                Err(e) => {
                    tracing::error!("Fatal: {}", e);
                    EXIT_FATAL
                }
            };
            std::process::exit(code);
        }
        Commands::Version => {
            println!("tsobot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            if let Err(e) = init_config() {
                eprintln!("{}", e);
                std::process::exit(EXIT_FATAL);
            }
        }
    }
}

fn load_config(config_path: &str, args: RunArgs) -> Result<Config, BotError> {
    let mut config = if Path::new(config_path).exists() {
        let mut config = Config::load(config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config
    } else {
        tracing::info!("No config at {}, using defaults and environment", config_path);
        Config::load_env()
    };
    args.apply(&mut config);
    config.validate()?;
    Ok(config)
}

fn run_bot(config_path: &str, args: RunArgs) -> Result<i32, BotError> {
    let config = load_config(config_path, args)?;

    tracing::info!(
        "Starting tsobot as {} for {} (ssl: {})",
        config.bot.nick,
        config.server_address(),
        config.server.ssl
    );

    std::fs::create_dir_all(&config.storage.cache_dir)
        .map_err(|e| BotError::Internal(format!("cache dir {}: {}", config.storage.cache_dir.display(), e)))?;

    let mut commands = CommandService::new(&config.bot.prefix);
    commands.register_defaults();

    let dispatcher = MessageDispatcher::new(
        config.bot.nick.clone(),
        CommandParser::new(commands.prefix())?,
        commands.into_registry(),
        SubstitutionEngine::new(emotes::default_table()),
    );

    let settings = RuntimeSettings {
        nick: config.bot.nick.clone(),
        password: config.bot.password.clone(),
        channels: config.channels(),
        admins: config.bot.admins.clone(),
    };

    let store: Box<dyn ScoreStore> = Box::new(JsonScoreStore::new(&config.storage.scoreboard));
    let conn = ConsoleAdapter::new(config.bot.nick.clone());
    let mut runtime = BotRuntime::new(conn, settings, dispatcher, Some(store))?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("failed to start runtime: {}", e)))?;

    let result = rt.block_on(async {
        let cancel = CancellationToken::new();
        let signal_cancel = cancel.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            tracing::info!("we get signal");
            signal_cancel.cancel();
        });

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        runtime
            .connection()
            .connect(tx)
            .await?;

        let outcome = runtime.run(rx, cancel).await?;
        tracing::info!(
            "Stopped: {:?} ({} subjects scored, {} trusted nicks, {} channels joined)",
            outcome,
            runtime.scoreboard().len(),
            runtime.admins().len(),
            runtime.joined().len()
        );
        Ok::<_, BotError>(outcome.exit_code())
    });
    // the stdin reader may still be blocked
    rt.shutdown_background();
    result
}

/// Resolve on Ctrl+C, or SIGTERM on unix
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn init_config() -> Result<(), BotError> {
    let config = Config::default();
    let yaml = config.to_yaml()?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}
