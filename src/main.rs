//! # STAR Journal CLI (`starj`)
//!
//! ## Usage
//!
//! ```bash
//! starj --config ./config/starj.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `starj serve` | Start the suggestion HTTP server |
//! | `starj suggest --field <f> "<text>"` | Print suggestions for one field |
//! | `starj compose` | Replay draft edits from stdin through the scheduler |
//! | `starj keywords "<text>"` | Print the extracted keywords |
//! | `starj lexicon` | List lexicon keywords |
//! | `starj prompt <field>` | Print the writing prompt for a field |

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use star_journal::client::{HttpSuggestionSource, LocalSuggestionSource, SuggestionSource};
use star_journal::config::{self, Config};
use star_journal::draft::{quick_tag_suggestions, EntryDraft};
use star_journal::lexicon::lexicon_from_config;
use star_journal::scheduler::{FieldState, SchedulerConfig, SuggestionScheduler};
use star_journal::server;
use star_journal_core::field::Field;
use star_journal_core::keywords::extract_keywords;
use star_journal_core::service::SuggestionService;

/// STAR Journal CLI: contextual writing suggestions for STAR-format
/// engineering journal entries.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "starj",
    about = "STAR Journal: contextual writing suggestions for engineering journal entries",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/starj.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the suggestion HTTP server.
    ///
    /// Binds to `[server].bind` and serves `GET /api/suggestions`.
    Serve,

    /// Print suggestions for a piece of text as JSON.
    Suggest {
        /// Field the text belongs to (situation, task, action, result).
        #[arg(long, default_value = "situation")]
        field: String,

        /// Compute in-process instead of calling the server.
        #[arg(long)]
        local: bool,

        /// The text typed so far.
        text: String,
    },

    /// Replay typing from stdin through the debounced scheduler.
    ///
    /// Each line is one edit to the draft entry:
    ///
    /// - `<field> <text>` replaces the field's text, as one keystroke would.
    /// - `insert <field> <snippet>` appends a picked suggestion to the field.
    /// - `tag <name>` adds a tag to the entry.
    /// - `quick <partial>` prints matching common tags.
    ///
    /// Suggestion updates are printed as they arrive.
    Compose {
        /// Compute in-process instead of calling the server.
        #[arg(long)]
        local: bool,
    },

    /// Print the keywords extracted from text, one per line.
    Keywords { text: String },

    /// List the loaded lexicon keywords.
    Lexicon,

    /// Print the writing prompt (and example, if any) for a field.
    Prompt { field: String },
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_field(name: &str) -> Result<Field> {
    match Field::parse(name) {
        Some(field) => Ok(field),
        None => bail!(
            "Unknown field: '{}'. Must be situation, task, action, or result.",
            name
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve => init_tracing("info,star_journal=debug,tower_http=debug"),
        _ => init_tracing("warn"),
    }

    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Suggest { field, local, text } => {
            let bundle = if local {
                let service = SuggestionService::new(lexicon_from_config(&cfg)?);
                service.suggest(Some(&field), Some(&text))?
            } else {
                let source = HttpSuggestionSource::new(&cfg.client)?;
                source.fetch(parse_field(&field)?, &text).await?
            };
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        Commands::Compose { local } => {
            if local {
                let service = SuggestionService::new(lexicon_from_config(&cfg)?);
                run_compose(LocalSuggestionSource::new(service), &cfg).await?;
            } else {
                run_compose(HttpSuggestionSource::new(&cfg.client)?, &cfg).await?;
            }
        }
        Commands::Keywords { text } => {
            for keyword in extract_keywords(&text) {
                println!("{}", keyword);
            }
        }
        Commands::Lexicon => {
            let lexicon = lexicon_from_config(&cfg)?;
            for keyword in lexicon.keywords() {
                println!("{}", keyword);
            }
        }
        Commands::Prompt { field } => {
            let guide = cfg.template.guide(parse_field(&field)?);
            println!("{}", guide.prompt);
            if let Some(example) = guide.example {
                println!("Example: {}", example);
            }
        }
    }

    Ok(())
}

/// Drive a scheduler from `<field> <text>` lines on stdin.
async fn run_compose<S: SuggestionSource>(source: S, cfg: &Config) -> Result<()> {
    let sched_config = SchedulerConfig::from(&cfg.client);
    let settle = sched_config.debounce + Duration::from_millis(50);
    let scheduler = SuggestionScheduler::new(source, sched_config);

    let mut updates = scheduler.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let form = updates.borrow_and_update().clone();
            for field in Field::ALL {
                let bundle = form.get(field);
                if bundle.is_empty() {
                    continue;
                }
                match serde_json::to_string(bundle) {
                    Ok(json) => println!("{}: {}", field, json),
                    Err(e) => tracing::warn!("failed to render suggestions: {}", e),
                }
            }
        }
    });

    let mut draft = EntryDraft::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let (command, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
        match command.trim() {
            "tag" => {
                if draft.add_tag(rest) {
                    println!("tags: {}", draft.tags.join(", "));
                }
            }
            "quick" => {
                println!("quick tags: {}", quick_tag_suggestions(rest.trim()).join(", "));
            }
            "insert" => {
                let (name, snippet) = rest.split_once(' ').unwrap_or((rest, ""));
                match Field::parse(name.trim()) {
                    Some(field) => {
                        draft.insert_into_field(field, snippet.trim());
                        scheduler.on_input(field, draft.field(field));
                    }
                    None => tracing::warn!("skipping insert into unknown field: {}", name),
                }
            }
            name => match Field::parse(name) {
                Some(field) => {
                    *draft.field_mut(field) = rest.to_string();
                    scheduler.on_input(field, draft.field(field));
                }
                None => tracing::warn!("skipping line with unknown field: {}", name),
            },
        }
    }

    // Let the last timers fire and their calls settle before exiting.
    tokio::time::sleep(settle).await;
    while Field::ALL
        .iter()
        .any(|f| scheduler.state(*f) != FieldState::Idle)
    {
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    drop(scheduler);
    printer.await.ok();

    Ok(())
}
