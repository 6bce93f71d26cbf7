mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "clmandarin-cli", about = "HSK vocabulary browser and flashcards", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Load the HSK catalog from its static data files (one-time)
    Init {
        /// Directory containing hsk-1.json .. hsk-6.json
        #[arg(long)]
        catalog_dir: Option<PathBuf>,
    },

    /// Browse the vocabulary catalog
    #[command(subcommand)]
    Words(WordsCommand),

    /// Show and manage flashcard lists
    Lists {
        #[command(subcommand)]
        command: Option<ListsCommand>,
    },

    /// Toggle a word in Favorites
    Fav {
        /// Word id (e.g. hsk1-001) or exact hanzi
        word: String,
    },

    /// Study a list or an HSK level with flip cards
    Study {
        /// List id or name (default: the selected list)
        #[arg(long, conflicts_with = "level")]
        list: Option<String>,
        /// Study a whole HSK level instead of a list
        #[arg(long)]
        level: Option<u8>,
        /// Start from this word instead of a random card
        #[arg(long)]
        from: Option<String>,
    },

    /// Export a list to a portable file
    Export {
        /// List id or name
        list: String,
        /// Output directory (default: settings exportDir, else current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import one or more exported list files
    Import {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show settings, or change them with the flags below
    Settings {
        /// Show hanzi in word listings
        #[arg(long)]
        hanzi: Option<bool>,
        /// Show pinyin in word listings
        #[arg(long)]
        pinyin: Option<bool>,
        /// Show english in word listings
        #[arg(long)]
        english: Option<bool>,
        /// Start study sessions with hints shown
        #[arg(long)]
        hints: Option<bool>,
        /// Maximum number of search results
        #[arg(long)]
        search_limit: Option<usize>,
        /// Default directory for exports
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum WordsCommand {
    /// List all words of an HSK level
    Level {
        level: u8,
    },

    /// Search hanzi, pinyin and english
    Search {
        query: String,
        /// Maximum results (default: settings searchLimit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a single word
    Show {
        /// Word id or exact hanzi
        word: String,
    },
}

#[derive(Subcommand)]
enum ListsCommand {
    /// Create a new list
    Create {
        name: String,
        /// Fill the list with a whole HSK level
        #[arg(long, conflicts_with = "word")]
        level: Option<u8>,
        /// Start the list with one word
        #[arg(long)]
        word: Option<String>,
    },

    /// Rename a list
    Rename {
        list: String,
        name: String,
    },

    /// Delete a list
    Delete {
        list: String,
    },

    /// Show the words of a list
    Show {
        list: String,
    },

    /// Add words to a list
    Add {
        list: String,
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Add a whole HSK level to a list
    AddLevel {
        list: String,
        level: u8,
    },

    /// Remove a word from a list
    Remove {
        list: String,
        word: String,
    },

    /// Set the word order of a list (must name every word exactly once)
    Reorder {
        list: String,
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Select the active list, or clear the selection when no list is given
    Select {
        list: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let mut app = app::App::new(cli.data_dir)?;
    let format = &cli.format;

    match cli.command {
        Command::Init { catalog_dir } => {
            commands::init::run(&mut app, catalog_dir, format)?;
        }
        Command::Words(subcmd) => match subcmd {
            WordsCommand::Level { level } => {
                commands::words::run_level(&app, level, format, use_color)?;
            }
            WordsCommand::Search { query, limit } => {
                commands::words::run_search(&app, &query, limit, format, use_color)?;
            }
            WordsCommand::Show { word } => {
                commands::words::run_show(&app, &word, format, use_color)?;
            }
        },
        Command::Lists { command: None } => {
            commands::lists::run_list(&app, format, use_color)?;
        }
        Command::Lists { command: Some(subcmd) } => match subcmd {
            ListsCommand::Create { name, level, word } => {
                commands::lists::run_create(&app, &name, level, word.as_deref(), format)?;
            }
            ListsCommand::Rename { list, name } => {
                commands::lists::run_rename(&app, &list, &name, format)?;
            }
            ListsCommand::Delete { list } => {
                commands::lists::run_delete(&app, &list, format)?;
            }
            ListsCommand::Show { list } => {
                commands::lists::run_show(&app, &list, format, use_color)?;
            }
            ListsCommand::Add { list, words } => {
                commands::lists::run_add(&app, &list, &words, format)?;
            }
            ListsCommand::AddLevel { list, level } => {
                commands::lists::run_add_level(&app, &list, level, format)?;
            }
            ListsCommand::Remove { list, word } => {
                commands::lists::run_remove(&app, &list, &word, format)?;
            }
            ListsCommand::Reorder { list, words } => {
                commands::lists::run_reorder(&app, &list, &words, format)?;
            }
            ListsCommand::Select { list } => {
                commands::lists::run_select(&app, list.as_deref(), format)?;
            }
        },
        Command::Fav { word } => {
            commands::lists::run_toggle_favorite(&app, &word, format)?;
        }
        Command::Study { list, level, from } => {
            commands::study::run(&app, list.as_deref(), level, from.as_deref(), use_color)?;
        }
        Command::Export { list, out } => {
            commands::transfer::run_export(&app, &list, out, format)?;
        }
        Command::Import { files } => {
            commands::transfer::run_import(&mut app, &files, format)?;
        }
        Command::Settings { hanzi, pinyin, english, hints, search_limit, export_dir } => {
            let change = commands::settings::SettingsChange {
                hanzi,
                pinyin,
                english,
                hints,
                search_limit,
                export_dir,
            };
            commands::settings::run(&mut app, change, format)?;
        }
    }

    Ok(())
}
