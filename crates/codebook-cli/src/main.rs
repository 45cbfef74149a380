mod archive;
mod display;
mod input;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use codebook_ai::llm::DEFAULT_BASE_URL;
use codebook_ai::{Classifier, ClientConfig, DEFAULT_MODEL, OpenAiClient};
use codebook_core::ClassificationRequest;
use codebook_core::prompt::{SYSTEM_PROMPT, render_instruction};
use tracing_subscriber::EnvFilter;

use crate::input::{CodebookArgs, SubjectArgs};

#[derive(Parser)]
#[command(name = "codebook", version, about = "Code survey responses against a category codebook")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one response with the chat service.
    Classify {
        #[command(flatten)]
        subject: SubjectArgs,
        #[command(flatten)]
        codebook: CodebookArgs,
        #[command(flatten)]
        service: ServiceArgs,
        /// Print the result as JSON instead of a card.
        #[arg(long)]
        json: bool,
        /// Append the result to this archive file.
        #[arg(long)]
        archive: Option<PathBuf>,
    },
    /// Print the instruction that would be sent, without calling the service.
    Prompt {
        #[command(flatten)]
        subject: SubjectArgs,
        #[command(flatten)]
        codebook: CodebookArgs,
    },
    /// List or show archived results.
    History {
        #[arg(long)]
        archive: PathBuf,
        /// Show the entry at this index as a card.
        #[arg(long)]
        show: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ServiceArgs {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, env = "CODEBOOK_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
    #[arg(long, env = "CODEBOOK_TIMEOUT_SECS", default_value_t = 60)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("codebook v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Classify {
            subject,
            codebook,
            service,
            json,
            archive,
        } => {
            let codebook = codebook.load()?;
            let (subject_id, text) = subject.resolve()?;

            let config = ClientConfig::new(service.api_key)
                .with_base_url(service.base_url)
                .with_timeout(Duration::from_secs(service.timeout_secs));
            let client = OpenAiClient::new(config).context("building HTTP client")?;
            let classifier = Classifier::new(client, codebook).with_model(service.model);

            let result = classifier.classify(&text, &subject.custom).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", display::render_card(&subject_id, &result));
            }

            if let Some(path) = archive {
                let mut store = archive::load(&path)?;
                store.record(&subject_id, result);
                store.archive(&subject_id, &subject_id, Utc::now())?;
                archive::save(&path, &store)?;
                eprintln!("Archived to {}", path.display());
            }
        }
        Command::Prompt { subject, codebook } => {
            let codebook = codebook.load()?;
            let (_, text) = subject.resolve()?;
            let request = ClassificationRequest::new(&codebook, &text, &subject.custom);
            println!("[system]\n{SYSTEM_PROMPT}\n");
            println!("[user]\n{}", render_instruction(&request));
        }
        Command::History {
            archive,
            show,
            json,
        } => {
            let store = archive::load(&archive)?;
            match show {
                Some(i) => {
                    let entry = store
                        .entries()
                        .get(i)
                        .with_context(|| format!("no archive entry at index {i}"))?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(entry)?);
                    } else {
                        let title = format!(
                            "{} ({})",
                            entry.subject,
                            entry.archived_at.format("%Y-%m-%d %H:%M:%S")
                        );
                        print!("{}", display::render_card(&title, &entry.result));
                    }
                }
                None if json => println!("{}", serde_json::to_string_pretty(store.entries())?),
                None => print!("{}", display::render_history(store.entries())),
            }
        }
    }

    Ok(())
}
