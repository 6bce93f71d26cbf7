use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use clmandarin_lib::study::StudySession;

use crate::app::App;
use crate::render::terminal::render_card;

/// One keystroke of the study loop, entered as a line
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Flip,
    Next,
    Prev,
    Random,
    Hints,
    Quit,
    Unknown,
}

fn parse_action(line: &str) -> Action {
    match line.trim() {
        "" | "f" => Action::Flip,
        "n" => Action::Next,
        "p" => Action::Prev,
        "r" => Action::Random,
        "h" => Action::Hints,
        "q" | "quit" | "exit" => Action::Quit,
        _ => Action::Unknown,
    }
}

pub fn run(
    app: &App,
    list: Option<&str>,
    level: Option<u8>,
    from: Option<&str>,
    use_color: bool,
) -> Result<()> {
    let start_word = match from {
        Some(query) => Some(app.resolve_word(query)?.id),
        None => None,
    };
    let mut rng = rand::thread_rng();

    let mut session = match level {
        Some(level) => StudySession::for_level(level, &app.state.catalog, start_word.as_deref(), &mut rng)
            .with_context(|| format!("Cannot study HSK {}", level))?,
        None => {
            let list = app.list_or_active(list)?;
            StudySession::for_list(&list, &app.state.catalog, start_word.as_deref(), &mut rng)
                .with_context(|| format!("Cannot study \"{}\"", list.name))?
        }
    };
    session.navigator.set_show_hints(app.state.settings.show_hints);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", render_card(&session.name, &session.navigator, use_color));
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let nav = &mut session.navigator;

        match parse_action(&line?) {
            Action::Flip => nav.flip(),
            Action::Next => {
                if !nav.next() {
                    println!("Last card.");
                }
            }
            Action::Prev => {
                if !nav.prev() {
                    println!("No earlier card.");
                }
            }
            Action::Random => {
                nav.random();
            }
            Action::Hints => nav.toggle_hints(),
            Action::Quit => break,
            Action::Unknown => println!("Keys: f flip, n next, p prev, r random, h hints, q quit"),
        }
        println!();
    }

    let (position, total) = session.navigator.progress();
    log::info!("Study session '{}' ended at card {}/{}", session.name, position, total);
    Ok(())
}
