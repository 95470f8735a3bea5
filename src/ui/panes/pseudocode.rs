//! Pseudocode pane with highlighted lines
//!
//! Lines active in the current frame get an arrow indicator and a lighter
//! background. Keywords are coloured with a small word-level tokenizer.
//!
//! # Scrolling
//!
//! When the listing is taller than the pane, the first highlighted line is kept
//! at a fixed visual row (`target_line_row`), the same way a debugger keeps the
//! current statement in view while stepping.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const KEYWORDS: &[&str] = &[
    "procedure", "function", "end", "repeat", "until", "for", "to", "do", "if", "then",
    "else", "while", "return", "break", "let", "each", "in", "not", "and",
];

fn word_span(word: &str) -> Span<'static> {
    let style = if KEYWORDS.contains(&word) {
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD)
    } else if word.chars().all(|c| c.is_ascii_digit()) {
        Style::default().fg(DEFAULT_THEME.secondary)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };
    Span::styled(word.to_string(), style)
}

fn highlight_pseudocode(line: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut word_start = None;

    for (i, c) in line.char_indices() {
        if c.is_alphanumeric() || c == '_' {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            spans.push(word_span(&line[start..i]));
        }
        spans.push(Span::styled(c.to_string(), Style::default().fg(DEFAULT_THEME.fg)));
    }
    if let Some(start) = word_start {
        spans.push(word_span(&line[start..]));
    }

    spans
}

/// Scroll state for the pseudocode pane
#[derive(Debug, Default)]
pub struct PseudocodeScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the pseudocode listing
pub fn render_pseudocode_pane(
    frame: &mut Frame,
    area: Rect,
    pseudocode: &[&str],
    highlighted: &[usize],
    is_focused: bool,
    scroll_state: &mut PseudocodeScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Pseudocode ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_lines = pseudocode.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders

    if scroll_state.target_line_row.is_none() {
        scroll_state.target_line_row = Some(visible_height / 2);
    }
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if total_lines > visible_height {
        if let Some(&first) = highlighted.iter().min() {
            scroll_state.offset = first.saturating_sub(1).saturating_sub(target_row);
        }
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = pseudocode
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, text)| {
            let line_num = idx + 1;
            let is_active = highlighted.contains(&line_num);

            let (marker, num_style) = if is_active {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            let mut content = highlight_pseudocode(text);
            if is_active {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content {
                    span.style = span.style.patch(bg);
                }
            }
            spans.extend(content);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
