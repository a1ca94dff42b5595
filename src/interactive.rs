use crate::config::Config;
use crate::language::{language_name, languages};
use crate::repository::{NewSavedWord, NewTranslation, Repository};
use crate::session::Session;
use crate::suggest::SuggestionEngine;
use crate::translate::{ProviderChain, Translator};
use console::style;
use dialoguer::{Confirm, FuzzySelect, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Quit,
    Swap,
    Languages,
    /// Alternatives for the given word, or for the last word typed.
    Suggest(Option<String>),
    Save,
    History,
    Help,
    Text(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix(":suggest") {
        if rest.is_empty() {
            return Command::Suggest(None);
        }
        if rest.starts_with(char::is_whitespace) {
            return Command::Suggest(Some(rest.trim().to_string()));
        }
    }

    match trimmed {
        ":q" | ":quit" | ":exit" => Command::Quit,
        ":swap" => Command::Swap,
        ":lang" | ":languages" => Command::Languages,
        ":save" => Command::Save,
        ":history" => Command::History,
        ":help" | ":h" => Command::Help,
        _ => Command::Text(line.to_string()),
    }
}

fn language_items() -> Vec<String> {
    languages()
        .iter()
        .map(|(code, name)| format!("{} ({})", name, code))
        .collect()
}

fn language_index(code: &str) -> usize {
    languages()
        .iter()
        .position(|(c, _)| *c == code)
        .unwrap_or(0)
}

pub async fn run_interactive(
    config: &Config,
    chain: &ProviderChain,
    repo: &Repository,
) -> anyhow::Result<()> {
    print_header();

    let mut session = Session::new(
        config.default_source_lang.as_str(),
        config.default_target_lang.as_str(),
    );
    select_languages(&mut session)?;
    print_help();

    let mut suggestions = SuggestionEngine::new();

    loop {
        let prompt = format!("{} → {}", session.source_lang(), session.target_lang());
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Languages => select_languages(&mut session)?,
            Command::Swap => {
                session.swap_languages();
                println!(
                    "  Now translating {} → {}",
                    language_name(session.source_lang()),
                    language_name(session.target_lang())
                );
                if !session.source_text().is_empty() {
                    translate_current(chain, &mut session).await;
                }
            }
            Command::Save => save_current(repo, &session),
            Command::History => print_history(repo),
            Command::Suggest(Some(word)) => {
                suggest_for_word(&mut suggestions, repo, &session, &word)?
            }
            Command::Suggest(None) => {
                suggest_for_last_word(&mut suggestions, repo, &mut session)?
            }
            Command::Text(text) => {
                if text.trim().is_empty() {
                    session.clear();
                    continue;
                }
                if !session.set_source_text(text) {
                    println!(
                        "{} Text is longer than {} characters",
                        style("!").yellow(),
                        crate::session::MAX_CHARACTERS
                    );
                    continue;
                }
                if translate_current(chain, &mut session).await
                    && Confirm::new()
                        .with_prompt("Save this translation?")
                        .default(false)
                        .interact()?
                {
                    save_current(repo, &session);
                }
            }
        }
    }

    Ok(())
}

/// Returns whether a translation was produced.
async fn translate_current(chain: &ProviderChain, session: &mut Session) -> bool {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Translating...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = chain
        .translate(
            session.source_text(),
            session.source_lang(),
            session.target_lang(),
        )
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(translation) => {
            println!("  {}", style(&translation).cyan().bold());
            session.set_translation(translation);
            true
        }
        Err(e) => {
            println!("{} {}", style("✗").red(), e);
            session.set_error(e.to_string());
            false
        }
    }
}

fn save_current(repo: &Repository, session: &Session) {
    if session.translated_text().is_empty() {
        println!("{} Nothing to save yet", style("!").yellow());
        return;
    }
    let draft = NewTranslation::new(
        session.source_text(),
        session.translated_text(),
        session.source_lang(),
        session.target_lang(),
    );
    match repo.save_phrase(draft) {
        Ok(_) => println!("{} Translation saved to history and your words", style("✓").green()),
        Err(e) => println!("{} {}", style("✗").red(), e),
    }
}

fn pick_suggestion(options: &[String]) -> anyhow::Result<Option<usize>> {
    let mut items = options.to_vec();
    items.push("Keep original".to_string());
    let selection = Select::new()
        .with_prompt("Suggestions")
        .items(&items)
        .default(0)
        .interact()?;
    Ok((selection < options.len()).then_some(selection))
}

fn offer_word_save(
    repo: &Repository,
    session: &Session,
    word: String,
    suggestion: String,
) -> anyhow::Result<()> {
    if Confirm::new()
        .with_prompt(format!("Save \"{}\" → \"{}\" to your words?", word, suggestion))
        .default(false)
        .interact()?
    {
        let draft = NewSavedWord::new(word, suggestion, session.source_lang(), session.target_lang());
        match repo.save_word(draft) {
            Ok(_) => println!("{} Word saved", style("✓").green()),
            Err(e) => println!("{} {}", style("✗").red(), e),
        }
    }
    Ok(())
}

fn suggest_for_word(
    engine: &mut SuggestionEngine,
    repo: &Repository,
    session: &Session,
    word: &str,
) -> anyhow::Result<()> {
    let options = engine.suggest(word, session.target_lang());
    if options.is_empty() {
        println!("  No suggestions for \"{}\"", word);
        return Ok(());
    }
    if let Some(selection) = pick_suggestion(&options)? {
        offer_word_save(repo, session, word.to_string(), options[selection].clone())?;
    }
    Ok(())
}

fn suggest_for_last_word(
    engine: &mut SuggestionEngine,
    repo: &Repository,
    session: &mut Session,
) -> anyhow::Result<()> {
    let cursor = session.source_text().chars().count();
    let options = engine.suggest_for_cursor(session.source_text(), cursor, session.target_lang());
    if options.is_empty() {
        println!("  No suggestions for the current word");
        return Ok(());
    }

    let Some(selection) = pick_suggestion(&options)? else {
        return Ok(());
    };

    if let Some((word, suggestion)) = session.apply_suggestion(&options[selection], cursor) {
        println!("  {}", session.source_text());
        offer_word_save(repo, session, word, suggestion)?;
    }
    Ok(())
}

fn select_languages(session: &mut Session) -> anyhow::Result<()> {
    let items = language_items();

    let source = FuzzySelect::new()
        .with_prompt("Translate from")
        .items(&items)
        .default(language_index(session.source_lang()))
        .interact()?;
    session.set_source_lang(languages()[source].0);

    let target = FuzzySelect::new()
        .with_prompt("Translate to")
        .items(&items)
        .default(language_index(session.target_lang()))
        .interact()?;
    session.set_target_lang(languages()[target].0);

    if session.source_lang() != languages()[source].0 {
        println!(
            "{} Source and target were the same, using {} as source",
            style("!").yellow(),
            language_name(session.source_lang())
        );
    }
    Ok(())
}

fn print_history(repo: &Repository) {
    let history = repo.translation_history();
    if history.is_empty() {
        println!("  No translations saved yet");
        return;
    }
    for record in history.iter().take(10) {
        let star = if record.is_favorite { "★" } else { " " };
        println!(
            "  {} {} → {}  {}",
            style(star).yellow(),
            record.source_text,
            style(&record.translated_text).cyan(),
            style(format!("({} → {})", record.source_lang, record.target_lang)).dim()
        );
    }
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║          vedtranslate - Interactive Mode          ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!();
}

fn print_help() {
    println!("  Type text to translate it. Commands:");
    println!("    :swap      swap languages");
    println!("    :lang      choose languages");
    println!("    :suggest   alternatives for the last word (or :suggest <word>)");
    println!("    :save      save the last translation");
    println!("    :history   show recent history");
    println!("    :quit      leave");
    println!();
}
