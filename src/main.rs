//! Pharmabridge - Drug Repurposing Intelligence Assistant
//!
//! Main entry point for the CLI application.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pharmabridge::agent::Orchestrator;
use pharmabridge::llm::GroqClient;
use pharmabridge::server::{self, AppState};
use pharmabridge::session::{ChatSession, DirectExecutor, RemoteExecutor, TurnExecutor};
use pharmabridge::{Config, ConversationStore, Repl, Result, ToolRegistry};

/// Pharmabridge - Drug Repurposing Intelligence Assistant
#[derive(Parser, Debug)]
#[command(name = "pharmabridge")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the orchestration HTTP endpoint
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,
        /// Bind port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Chat against the assistant (REPL, or one-shot with --prompt)
    Chat {
        /// Single prompt mode (non-interactive)
        #[arg(long, short = 'p')]
        prompt: Option<String>,
        /// Remote orchestration endpoint; runs in-process when absent
        #[arg(long)]
        backend: Option<String>,
        /// Conversation store URL
        #[arg(long)]
        database: Option<String>,
        /// Owner identity for the conversation log
        #[arg(long, default_value = "local")]
        user: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut config = Config::load();

    match args.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let orchestrator = build_orchestrator(&config)?;
            let addr = config.server.addr();
            server::serve(&addr, AppState::new(Arc::new(orchestrator))).await?;
        }

        Command::Chat {
            prompt,
            backend,
            database,
            user,
        } => {
            if let Some(backend) = backend {
                config.backend.url = Some(backend);
            }
            if let Some(database) = database {
                config.database.url = database;
            }

            let store = ConversationStore::connect(&config.database.url).await?;
            store.migrate().await?;

            let executor = build_executor(&config)?;
            let mut session = ChatSession::new(store, executor, user);

            if let Some(prompt) = prompt {
                let transcript = session.send(&prompt).await?;
                if let Some(reply) = transcript.iter().rev().find(|m| m.role == "assistant") {
                    println!("{}", reply.content);
                }
                let agents = session.completed_agents();
                if !agents.is_empty() {
                    eprintln!("[agents: {}]", agents.join(", "));
                }
                return Ok(());
            }

            let mut repl = Repl::new(session);
            repl.run().await?;
        }
    }

    Ok(())
}

/// Build the in-process orchestrator from configuration
fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    let model = Arc::new(GroqClient::from_config(config)?);
    let tools = Arc::new(ToolRegistry::new());
    Ok(Orchestrator::new(model, tools, config.agent.clone()))
}

/// Choose the turn executor once, at session construction
fn build_executor(config: &Config) -> Result<Arc<dyn TurnExecutor>> {
    match &config.backend.url {
        Some(url) => Ok(Arc::new(RemoteExecutor::new(url.clone()))),
        None => Ok(Arc::new(DirectExecutor::new(build_orchestrator(config)?))),
    }
}
