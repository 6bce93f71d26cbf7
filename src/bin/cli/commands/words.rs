use std::collections::HashSet;

use anyhow::{Context, Result};

use clmandarin_lib::lists::FAVORITES_ID;
use clmandarin_lib::vocab::VocabWord;

use crate::app::App;
use crate::render::terminal::render_word_row;
use crate::OutputFormat;

pub fn run_level(app: &App, level: u8, format: &OutputFormat, use_color: bool) -> Result<()> {
    let words = app
        .state
        .catalog
        .get_by_level(level)
        .with_context(|| format!("Failed to load HSK {}", level))?;

    print_words(app, &words, format, use_color)?;
    if matches!(format, OutputFormat::Plain) && !words.is_empty() {
        println!("\nHSK {}: {} words", level, words.len());
    }
    Ok(())
}

pub fn run_search(
    app: &App,
    query: &str,
    limit: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(app.state.settings.search_limit);
    let words = app.state.catalog.search(query, limit);

    if words.is_empty() && matches!(format, OutputFormat::Plain) {
        println!("No words found for '{}'.", query);
        return Ok(());
    }
    print_words(app, &words, format, use_color)
}

pub fn run_show(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let word = app.resolve_word(query)?;
    let favorite = app.state.lists.is_favorite(&word.id)?;

    let containing: Vec<String> = app
        .state
        .lists
        .list_all()?
        .into_iter()
        .filter(|l| l.contains(&word.id))
        .map(|l| l.name)
        .collect();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "word": word,
                "favorite": favorite,
                "lists": containing,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let visibility = &app.state.settings.visibility;
            println!("{}", render_word_row(&word, visibility, favorite, use_color));
            println!("  HSK {} #{}", word.hsk_level, word.number);
            if !containing.is_empty() {
                println!("  In lists: {}", containing.join(", "));
            }
        }
    }

    Ok(())
}

/// Print words as a table (plain) or an array (json)
pub fn print_words(app: &App, words: &[VocabWord], format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(words)?);
        }
        OutputFormat::Plain => {
            let visibility = &app.state.settings.visibility;
            let favorites = app.state.lists.get_list(FAVORITES_ID)?;
            let favorite_ids: HashSet<&str> = favorites.word_ids.iter().map(String::as_str).collect();
            for word in words {
                let favorite = favorite_ids.contains(word.id.as_str());
                println!("{}", render_word_row(word, visibility, favorite, use_color));
            }
        }
    }
    Ok(())
}
