//! Algorithm descriptor pane

use crate::algorithms::AlgorithmInfo;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<9}", label), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render name, complexity and description of the running algorithm
pub fn render_info_pane(frame: &mut Frame, area: Rect, info: &AlgorithmInfo) {
    let block = Block::default()
        .title(format!(" {} ", info.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let lines = vec![
        field("Category", info.category.to_string()),
        field("Best", info.time.best.to_string()),
        field("Average", info.time.average.to_string()),
        field("Worst", info.time.worst.to_string()),
        field("Space", info.space.to_string()),
        field("Stable", if info.stable { "yes" } else { "no" }.to_string()),
        Line::default(),
        Line::from(Span::styled(
            info.description,
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
