use std::collections::HashSet;

use anyhow::{bail, Context, Result};

use clmandarin_lib::lists::FlashcardList;

use crate::app::App;
use crate::commands::words::print_words;
use crate::render::terminal::truncate;
use crate::OutputFormat;

fn list_json(list: &FlashcardList, active: bool) -> serde_json::Value {
    serde_json::json!({
        "id": list.id,
        "name": list.name,
        "description": list.description,
        "wordCount": list.word_ids.len(),
        "isFavorites": list.is_favorites(),
        "isActive": active,
        "createdAt": list.created_at.to_rfc3339(),
        "updatedAt": list.updated_at.to_rfc3339(),
    })
}

/// Print the outcome of a single-list mutation
fn report(list: &FlashcardList, message: &str, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&list_json(list, false))?);
        }
        OutputFormat::Plain => {
            println!("{}", message);
        }
    }
    Ok(())
}

pub fn run_list(app: &App, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let lists = app.state.lists.list_all().context("Failed to list flashcard lists")?;
    let active_id = app.state.lists.active_list_id()?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = lists
                .iter()
                .map(|l| list_json(l, active_id.as_deref() == Some(l.id.as_str())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let name_width = lists.iter().map(|l| l.name.chars().count()).max().unwrap_or(4).min(32).max(4);

            println!("  {:<nw$} {:>6} {:<16} {}", "Name", "Words", "Updated", "Id", nw = name_width);
            println!("  {} {} {} {}",
                "\u{2500}".repeat(name_width),
                "\u{2500}".repeat(6),
                "\u{2500}".repeat(16),
                "\u{2500}".repeat(8));

            for list in &lists {
                let marker = if active_id.as_deref() == Some(list.id.as_str()) { "* " } else { "  " };
                println!("{}{:<nw$} {:>6} {:<16} {}",
                    marker,
                    truncate(&list.name, name_width),
                    list.word_ids.len(),
                    list.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                    list.id,
                    nw = name_width);
            }

            println!("\n{} lists total", lists.len());
        }
    }

    Ok(())
}

pub fn run_create(
    app: &App,
    name: &str,
    level: Option<u8>,
    word: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let lists = &app.state.lists;
    let list = match (level, word) {
        (Some(level), _) => lists.create_list_with_level(name, level, &app.state.catalog)?,
        (None, Some(word)) => {
            let word = app.resolve_word(word)?;
            lists.create_list_with_word(name, &word.id)?
        }
        (None, None) => lists.create_list(name)?,
    };

    report(&list, &format!("Created list \"{}\" ({} words)\n  ID: {}", list.name, list.word_ids.len(), list.id), format)
}

pub fn run_rename(app: &App, query: &str, name: &str, format: &OutputFormat) -> Result<()> {
    let list = app.find_list(query)?;
    let renamed = app.state.lists.rename_list(&list.id, name)?;
    report(&renamed, &format!("Renamed \"{}\" to \"{}\"", list.name, renamed.name), format)
}

pub fn run_delete(app: &App, query: &str, format: &OutputFormat) -> Result<()> {
    let list = app.find_list(query)?;
    app.state.lists.delete_list(&list.id)?;
    report(&list, &format!("Deleted list \"{}\"", list.name), format)
}

pub fn run_show(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let list = app.find_list(query)?;
    let words = app.state.catalog.get_by_ids(&list.word_ids);

    if matches!(format, OutputFormat::Plain) {
        println!("{} ({} words)", list.name, list.word_ids.len());
        if let Some(description) = &list.description {
            println!("{}", description);
        }
        println!();
    }
    print_words(app, &words, format, use_color)?;

    let missing = list.word_ids.len() - words.len();
    if missing > 0 && matches!(format, OutputFormat::Plain) {
        println!("\n({} words not in the local catalog)", missing);
    }
    Ok(())
}

pub fn run_add(app: &App, query: &str, words: &[String], format: &OutputFormat) -> Result<()> {
    let list = app.find_list(query)?;
    let ids = app.resolve_word_ids(words)?;
    let before = list.word_ids.len();

    let updated = app.state.lists.add_words(&list.id, &ids)?;
    let added = updated.word_ids.len() - before;
    report(&updated, &format!("Added {} words to \"{}\"", added, updated.name), format)
}

pub fn run_add_level(app: &App, query: &str, level: u8, format: &OutputFormat) -> Result<()> {
    let list = app.find_list(query)?;
    let before = list.word_ids.len();

    let updated = app.state.lists.add_level(&list.id, level, &app.state.catalog)?;
    let added = updated.word_ids.len() - before;
    report(&updated, &format!("Added {} HSK {} words to \"{}\"", added, level, updated.name), format)
}

pub fn run_remove(app: &App, query: &str, word: &str, format: &OutputFormat) -> Result<()> {
    let list = app.find_list(query)?;
    // Ids that have left the catalog can still be removed verbatim
    let word_id = match app.resolve_word(word) {
        Ok(w) => w.id,
        Err(_) if list.contains(word) => word.to_string(),
        Err(e) => return Err(e),
    };

    let updated = app.state.lists.remove_word(&list.id, &word_id)?;
    report(&updated, &format!("Removed {} from \"{}\"", word_id, updated.name), format)
}

pub fn run_reorder(app: &App, query: &str, words: &[String], format: &OutputFormat) -> Result<()> {
    let list = app.find_list(query)?;
    let ids: Vec<String> = words
        .iter()
        .map(|w| if list.contains(w) { Ok(w.clone()) } else { app.resolve_word(w).map(|v| v.id) })
        .collect::<Result<_>>()?;

    // The repository trusts the caller to pass a permutation, so check here
    let current: HashSet<&String> = list.word_ids.iter().collect();
    let proposed: HashSet<&String> = ids.iter().collect();
    if ids.len() != list.word_ids.len() || current != proposed {
        bail!("New order must name each of the {} words in \"{}\" exactly once", list.word_ids.len(), list.name);
    }

    let updated = app.state.lists.reorder(&list.id, ids)?;
    report(&updated, &format!("Reordered \"{}\"", updated.name), format)
}

pub fn run_select(app: &App, query: Option<&str>, format: &OutputFormat) -> Result<()> {
    let list = match query {
        Some(q) => Some(app.find_list(q)?),
        None => None,
    };
    app.state.lists.set_active_list(list.as_ref().map(|l| l.id.as_str()))?;

    match (&list, format) {
        (Some(list), OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&list_json(list, true))?);
        }
        (Some(list), OutputFormat::Plain) => println!("Selected \"{}\"", list.name),
        (None, OutputFormat::Json) => println!("null"),
        (None, OutputFormat::Plain) => println!("Selection cleared"),
    }
    Ok(())
}

pub fn run_toggle_favorite(app: &App, word: &str, format: &OutputFormat) -> Result<()> {
    let word = app.resolve_word(word)?;
    let favorite = app.state.lists.toggle_favorite(&word.id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": word.id, "favorite": favorite });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let verb = if favorite { "Added" } else { "Removed" };
            let preposition = if favorite { "to" } else { "from" };
            println!("{} {} {} {} Favorites", verb, word.hanzi, word.id, preposition);
        }
    }
    Ok(())
}
