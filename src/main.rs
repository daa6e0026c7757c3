use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use tutor_assist::api::ApiServer;
use tutor_assist::{Config, Conversation, DelayRange, Engine, KnowledgeEntry, ResponseScheduler};

/// Tutor Assist - help widget engine for the tutorial site
#[derive(Parser)]
#[command(name = "tutor-assist", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the help widget HTTP API
    Serve {
        /// Port to listen on
        #[arg(long, env = "TUTOR_ASSIST_PORT")]
        port: Option<u16>,
    },
    /// Answer a single question
    Ask {
        /// Question text
        text: String,
        /// Reply immediately instead of simulating thinking time
        #[arg(long)]
        no_delay: bool,
    },
    /// Search the knowledge base
    Search {
        /// Substring to look for; omit to list everything
        #[arg(default_value = "")]
        query: String,
        /// Only show entries from this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List knowledge base categories
    Categories,
    /// Interactive chat over stdin
    Chat,
    /// Validate the knowledge base and rule table
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,tutor_assist=info",
        1 => "info,tutor_assist=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()?;
    let engine = Arc::new(config.build_engine()?);

    match cli.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.api_server.port);
            tracing::info!(port, delay = ?config.delay, "starting help API");
            ApiServer::new(config.scheduler(engine), port).run().await?;
        }
        Command::Ask { text, no_delay } => {
            let delay = if no_delay {
                DelayRange::immediate()
            } else {
                config.delay
            };
            let scheduler = ResponseScheduler::new(engine, delay);
            match scheduler.respond(&text).await? {
                Some(classification) => {
                    tracing::debug!(kind = %classification.kind(), "answered");
                    println!("{}", classification.text());
                }
                None => anyhow::bail!("question is empty"),
            }
        }
        Command::Search { query, category } => {
            let entries = engine.search_in(&query, category.as_deref());
            if entries.is_empty() {
                println!("No matching entries.");
            }
            for entry in entries {
                print_entry(entry);
            }
        }
        Command::Categories => {
            for category in engine.categories() {
                println!("{category}");
            }
        }
        Command::Chat => chat(Conversation::new(config.scheduler(engine))).await?,
        Command::Check => check(&engine),
    }

    Ok(())
}

/// Line-based chat loop; one turn at a time
async fn chat(conversation: Conversation) -> anyhow::Result<()> {
    println!("Ask me anything about the lessons. Ctrl-D to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(reply) = conversation.submit(&line).await? {
            println!("> {}\n", reply.message.content);
        }
    }

    tracing::debug!(messages = conversation.messages().len(), "chat ended");
    Ok(())
}

fn check(engine: &Engine) {
    println!("knowledge entries: {}", engine.knowledge().len());
    println!("categories:        {}", engine.categories().len());
    println!("keyword rules:     {}", engine.rules().len());
    println!("fallback replies:  {}", engine.fallback().responses().len());
}

fn print_entry(entry: &KnowledgeEntry) {
    println!("[{}] {} ({})", entry.category, entry.question, entry.id);
    println!("    {}", entry.answer);
    println!("    tags: {}\n", entry.tags.join(", "));
}
