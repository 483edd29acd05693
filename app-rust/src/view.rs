//! Plain-text rendering of the [`AppState`].

use crate::{AppState, FormState};
use facts_sdk::{Category, CategoryFilter, Fact, VoteKind};
use std::fmt::Write;

pub const APP_TITLE: &str = "Today I Learned";
pub const LOADING_MESSAGE: &str = "Loading....";
pub const EMPTY_MESSAGE: &str = "No facts found 👾";

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    /// Paint category names with their colour using 24-bit ANSI escapes.
    pub color: bool,
}

/// Render the whole screen: header, form (when shown), filter bar, and
/// either the loader or the fact list.
pub fn render(state: &AppState, options: ViewOptions) -> String {
    let mut out = String::new();
    out.push_str(&render_header(state.show_form));
    if state.show_form {
        out.push_str(&render_form(&state.form, options));
    }
    out.push_str(&render_filter(state.current_category, options));
    if state.is_loading {
        out.push_str(LOADING_MESSAGE);
        out.push('\n');
    } else {
        out.push_str(&render_list(state, options));
    }
    out
}

pub fn render_header(show_form: bool) -> String {
    let button = if show_form { "Close" } else { "Share a fact" };
    format!("== {APP_TITLE} ==  [{button}]\n")
}

pub fn render_form(form: &FormState, options: ViewOptions) -> String {
    let mut out = String::new();
    let state = if form.is_uploading { " (uploading...)" } else { "" };
    let _ = writeln!(out, "-- Share a fact{state} --");
    let _ = writeln!(
        out,
        "  text:     {} [{}]",
        placeholder(&form.text, "Share a fact with the world..."),
        form.remaining_chars()
    );
    let _ = writeln!(
        out,
        "  source:   {}",
        placeholder(&form.source, "Trustworthy source...")
    );
    let category = match form.category.parse::<Category>() {
        Ok(category) => paint(&category.name().to_uppercase(), Some(category), options),
        Err(_) => placeholder(&form.category, "Choose category:").to_string(),
    };
    let _ = writeln!(out, "  category: {category}");
    out
}

fn placeholder<'a>(value: &'a str, hint: &'a str) -> &'a str {
    if value.is_empty() {
        hint
    } else {
        value
    }
}

pub fn render_filter(current: CategoryFilter, options: ViewOptions) -> String {
    let mut out = String::from("Categories:");
    let all = if current == CategoryFilter::All { "*All*" } else { "All" };
    let _ = write!(out, " {all}");
    for category in Category::ALL {
        let name = paint(category.name(), Some(category), options);
        if current == CategoryFilter::Only(category) {
            let _ = write!(out, " *{name}*");
        } else {
            let _ = write!(out, " {name}");
        }
    }
    out.push('\n');
    out
}

/// The fact list, or [`EMPTY_MESSAGE`] when there is nothing to show.
pub fn render_list(state: &AppState, options: ViewOptions) -> String {
    if state.facts.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let mut out = String::new();
    for fact in &state.facts {
        out.push_str(&render_fact(fact, state.is_updating(fact.id), options));
    }
    let _ = writeln!(
        out,
        "There are {} facts in the database. Add your own!",
        state.facts.len()
    );
    out
}

pub fn render_fact(fact: &Fact, is_updating: bool, options: ViewOptions) -> String {
    let mut out = String::new();
    let _ = write!(out, "#{} ", fact.id);
    if fact.is_disputed() {
        out.push_str("[💥DISPUTED] ");
    }
    let tag = paint(&fact.category, fact.category(), options);
    let _ = write!(out, "{} (Source: {}) [{tag}]", fact.text, fact.source);
    for kind in VoteKind::ALL {
        let _ = write!(out, " {} {}", kind.icon(), fact.votes(kind));
    }
    if is_updating {
        out.push_str(" (updating...)");
    }
    out.push('\n');
    out
}

fn paint(text: &str, category: Option<Category>, options: ViewOptions) -> String {
    match (options.color, category.and_then(|c| hex_to_rgb(c.color()))) {
        (true, Some((r, g, b))) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
        _ => text.to_string(),
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
