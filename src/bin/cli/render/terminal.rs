use clmandarin_lib::settings::FieldVisibility;
use clmandarin_lib::study::Navigator;
use clmandarin_lib::vocab::VocabWord;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GRAY: &str = "\x1b[90m";
}

fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Cut `text` to at most `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// One line of the word browser. Hidden fields render as a placeholder.
pub fn render_word_row(
    word: &VocabWord,
    visibility: &FieldVisibility,
    favorite: bool,
    use_color: bool,
) -> String {
    let star = if favorite { paint("*", Color::YELLOW, use_color) } else { " ".to_string() };
    let hanzi = if visibility.hanzi { word.hanzi.clone() } else { "··".to_string() };
    let pinyin = if visibility.pinyin { word.pinyin.clone() } else { "··".to_string() };
    let english = if visibility.english { truncate(&word.english, 48) } else { "··".to_string() };

    format!(
        "{} {:<10} {} {:<18} {}",
        star,
        word.id,
        paint(&format!("{:<6}", hanzi), Color::BOLD, use_color),
        pinyin,
        paint(&english, Color::GRAY, use_color)
    )
}

/// Fixed-width progress bar for `done` out of `total`
pub fn progress_bar(done: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 { 0 } else { done * width / total };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Render the current card of a study session, front or back
pub fn render_card(title: &str, nav: &Navigator, use_color: bool) -> String {
    let word = nav.current();
    let (position, total) = nav.progress();
    let mut lines = Vec::new();

    lines.push(format!(
        "{}  {}  {}/{}",
        paint(title, Color::RED, use_color),
        progress_bar(position, total, 24),
        position,
        total
    ));
    lines.push(String::new());

    if nav.is_flipped() {
        lines.push(format!("    {}", paint(&word.pinyin, Color::RED, use_color)));
        let english = if word.english.is_empty() { "\u{2014}" } else { word.english.as_str() };
        lines.push(format!("    {}", english));
    } else {
        lines.push(format!("    {}", paint(&word.hanzi, Color::BOLD, use_color)));
        if nav.show_hints() {
            lines.push(format!("    {}", paint(&word.pinyin, Color::DIM, use_color)));
            lines.push(format!("    {}", paint(&word.english, Color::DIM, use_color)));
        }
    }

    lines.push(String::new());
    lines.push(render_controls(nav, use_color));
    lines.join("\n")
}

fn render_controls(nav: &Navigator, use_color: bool) -> String {
    let control = |label: &str, enabled: bool| {
        if enabled {
            label.to_string()
        } else {
            paint(label, Color::DIM, use_color)
        }
    };

    let hints = if nav.show_hints() { "[h]ide hints" } else { "[h]ints" };
    [
        control("[p]rev", nav.can_go_back()),
        control("[n]ext", nav.has_next()),
        control("[r]andom", nav.len() > 1),
        control("[f]lip", true),
        control(hints, true),
        control("[q]uit", true),
    ]
    .join("  ")
}
