use cinematch_core::{AppViewModel, MovieCardView, ResultsView, SourceChipView, StatusView};

use super::constants::*;

const RULE: &str = "------------------------------------------------------------";

/// Renders the view model as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![RULE.to_string(), format!("{APP_TITLE} | {TAGLINE}"), RULE.to_string()];

    if view.input_enabled {
        lines.push(INPUT_HINT.to_string());
    } else {
        lines.push(format!("> {} (searching...)", view.input.trim()));
    }
    lines.push(String::new());

    match &view.status {
        StatusView::Idle { placeholder_cards } => {
            let cards = vec!["[ film ]"; *placeholder_cards].join("  ");
            lines.push(format!("  {cards}"));
        }
        StatusView::Loading { title, detail } => {
            lines.push(format!("  ... {title}"));
            lines.push(format!("      {detail}"));
        }
        StatusView::Error { title, message } => {
            lines.push(format!("  !! {title}"));
            lines.push(format!("     {message}"));
            lines.push(format!("     Type {COMMAND_RETRY} to start over."));
        }
        StatusView::Success(results) => render_results(results, &mut lines),
    }

    lines.push(String::new());
    lines
}

fn render_results(results: &ResultsView, lines: &mut Vec<String>) {
    lines.push(format!("{INSIGHT_HEADING}: \"{}\"", results.intro));
    for (index, card) in results.cards.iter().enumerate() {
        lines.push(String::new());
        render_card(index + 1, card, lines);
    }

    if !results.sources.is_empty() {
        lines.push(String::new());
        lines.push(SOURCES_HEADING.to_string());
        lines.extend(results.sources.iter().map(format_chip));
    }
}

fn render_card(position: usize, card: &MovieCardView, lines: &mut Vec<String>) {
    lines.push(format!(
        "{position}. {} ({})  * {}",
        card.title, card.year, card.rating
    ));
    if !card.genres.is_empty() {
        let tags: Vec<String> = card
            .genres
            .iter()
            .map(|genre| format!("[{}]", genre.to_uppercase()))
            .collect();
        lines.push(format!("   {}", tags.join(" ")));
    }
    if card.poster_is_fallback {
        lines.push(format!("   poster: {} (fallback)", card.poster_url));
    } else {
        lines.push(format!("   poster: {}", card.poster_url));
    }
    lines.push(format!("   {}", card.description));
    lines.push(format!("   {MATCH_HEADING}: \"{}\"", card.reasoning));
}

fn format_chip(chip: &SourceChipView) -> String {
    format!("  - {} <{}> (icon {})", chip.label, chip.href, chip.favicon_url)
}
