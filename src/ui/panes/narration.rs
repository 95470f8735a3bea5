//! Narration log pane
//!
//! Shows the message of every frame up to and including the current one, so
//! stepping backward rewinds the log as well.

use crate::trace::Trace;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the narration pane
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &Trace,
    current: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Narration ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if trace.is_empty() {
        let paragraph = Paragraph::new("(no frames)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = trace
        .iter()
        .take(current + 1)
        .map(|f| {
            let style = if f.index == current {
                Style::default()
                    .fg(if f.complete {
                        DEFAULT_THEME.success
                    } else {
                        DEFAULT_THEME.fg
                    })
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            ListItem::new(format!("{:>3}  {}", f.index + 1, f.message)).style(style)
        })
        .collect();

    // Calculate visible range for scrolling
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
