use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use vedtranslate::export::{history_to_csv, DEFAULT_EXPORT_FILE};
use vedtranslate::interactive::run_interactive;
use vedtranslate::language::language_name;
use vedtranslate::{
    Config, NewSavedWord, NewTranslation, ProviderChain, Repository, SuggestionEngine, Translator,
};

#[derive(Parser)]
#[command(name = "vedtranslate")]
#[command(version, about = "Translate text between languages")]
#[command(long_about = "Translate text with automatic provider fallback, and keep a local history of translations and saved words.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a piece of text
    Translate {
        text: String,

        /// Source language code (defaults to config)
        #[arg(short, long)]
        source: Option<String>,

        /// Target language code (defaults to config)
        #[arg(short, long)]
        target: Option<String>,

        /// Save the result to history and saved words
        #[arg(long)]
        save: bool,

        /// Save the result to history as a favorite
        #[arg(long)]
        favorite: bool,
    },

    /// Suggest alternative phrasings for a word
    Suggest {
        word: String,

        /// Target language code (defaults to config)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Manage translation history
    #[command(subcommand)]
    History(HistoryCommand),

    /// Manage saved words
    #[command(subcommand)]
    Words(WordsCommand),

    /// Show the effective configuration
    Config {
        /// Write it to the config file
        #[arg(long)]
        save: bool,
    },

    /// Translate interactively
    Interactive,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List history, most recent first
    List {
        /// Only show favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Delete an entry
    Delete { id: String },
    /// Toggle the favorite flag of an entry
    Favorite { id: String },
    /// Delete all entries
    Clear,
    /// Export history as CSV
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum WordsCommand {
    /// List saved words, most recent first
    List,
    /// Save a word and its translation
    Save {
        word: String,
        translation: String,

        #[arg(short, long)]
        source: Option<String>,

        #[arg(short, long)]
        target: Option<String>,
    },
    /// Delete a saved word
    Delete { id: String },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn handle_history(command: HistoryCommand, repo: &Repository) -> Result<()> {
    match command {
        HistoryCommand::List { favorites } => {
            let records = if favorites {
                repo.favorite_translations()
            } else {
                repo.translation_history()
            };
            if records.is_empty() {
                println!("No translations saved yet");
            }
            for record in records {
                let star = if record.is_favorite { "★" } else { " " };
                println!(
                    "{} {}  {} → {}  [{} → {}]  {}",
                    style(star).yellow(),
                    style(&record.id).dim(),
                    record.source_text,
                    style(&record.translated_text).cyan(),
                    record.source_lang,
                    record.target_lang,
                    record.timestamp.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        HistoryCommand::Delete { id } => {
            if repo.delete_translation(&id)? {
                info!("Deleted translation {}", id);
            } else {
                println!("No translation with id {}", id);
            }
        }
        HistoryCommand::Favorite { id } => match repo.toggle_favorite(&id)? {
            Some(record) if record.is_favorite => println!("★ Marked {} as favorite", id),
            Some(_) => println!("Removed {} from favorites", id),
            None => println!("No translation with id {}", id),
        },
        HistoryCommand::Clear => {
            repo.clear_history()?;
            info!("History cleared");
        }
        HistoryCommand::Export { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            let csv = history_to_csv(&repo.translation_history());
            std::fs::write(&output, csv)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Exported history to {}", output.display());
        }
    }
    Ok(())
}

fn handle_words(command: WordsCommand, repo: &Repository, config: &Config) -> Result<()> {
    match command {
        WordsCommand::List => {
            let words = repo.saved_words();
            if words.is_empty() {
                println!("No saved words yet");
            }
            for word in words {
                println!(
                    "{}  {} → {}  [{} → {}]",
                    style(&word.id).dim(),
                    word.word,
                    style(&word.translation).cyan(),
                    word.source_lang,
                    word.target_lang,
                );
            }
        }
        WordsCommand::Save {
            word,
            translation,
            source,
            target,
        } => {
            let source = source.unwrap_or_else(|| config.default_source_lang.clone());
            let target = target.unwrap_or_else(|| config.default_target_lang.clone());
            let saved = repo.save_word(NewSavedWord::new(word, translation, source, target))?;
            println!("Saved \"{}\" ({})", saved.word, saved.id);
        }
        WordsCommand::Delete { id } => {
            if !repo.delete_saved_word(&id)? {
                println!("No saved word with id {}", id);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    let repo = Repository::from_config(&config);

    match cli.command {
        Commands::Translate {
            text,
            source,
            target,
            save,
            favorite,
        } => {
            let source = source.unwrap_or_else(|| config.default_source_lang.clone());
            let target = target.unwrap_or_else(|| config.default_target_lang.clone());
            let chain = ProviderChain::from_config(&config)?;

            info!(
                "Translating {} → {}",
                language_name(&source),
                language_name(&target)
            );
            let translation = chain.translate(&text, &source, &target).await?;
            println!("{}", translation);

            if save || favorite {
                let mut draft = NewTranslation::new(text, translation, source, target);
                if favorite {
                    draft = draft.favorite(true);
                }
                let (record, _) = repo.save_phrase(draft)?;
                info!("Saved to history as {} and to saved words", record.id);
            }
        }
        Commands::Suggest { word, target } => {
            let target = target.unwrap_or_else(|| config.default_target_lang.clone());
            for suggestion in SuggestionEngine::new().suggest(&word, &target) {
                println!("{}", suggestion);
            }
        }
        Commands::History(command) => handle_history(command, &repo)?,
        Commands::Words(command) => handle_words(command, &repo, &config)?,
        Commands::Config { save } => {
            print!("{}", toml::to_string_pretty(&config)?);
            if save {
                config.save()?;
                info!("Configuration saved");
            }
        }
        Commands::Interactive => {
            let chain = ProviderChain::from_config(&config)?;
            run_interactive(&config, &chain, &repo).await?;
        }
    }

    Ok(())
}
