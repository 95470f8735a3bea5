//! Array bar pane for sorting and searching traces

use crate::trace::ArrayView;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Role of one bar in the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStatus {
    Default,
    Current,
    Comparing,
    Swapping,
    Found,
}

/// Found beats swapping beats comparing beats current
pub fn bar_status(view: &ArrayView, index: usize) -> BarStatus {
    if view.found == Some(index) {
        BarStatus::Found
    } else if view.swapping.contains(&index) {
        BarStatus::Swapping
    } else if view.comparing.contains(&index) {
        BarStatus::Comparing
    } else if view.current == Some(index) {
        BarStatus::Current
    } else {
        BarStatus::Default
    }
}

fn bar_color(status: BarStatus) -> Color {
    match status {
        BarStatus::Default => DEFAULT_THEME.comment,
        BarStatus::Current => DEFAULT_THEME.primary,
        BarStatus::Comparing => DEFAULT_THEME.warning,
        BarStatus::Swapping => DEFAULT_THEME.error,
        BarStatus::Found => DEFAULT_THEME.success,
    }
}

/// Tallest bar value handed to the chart; keeps the widget's tick math small
const BAR_SCALE: u64 = 1000;

/// Bar value in `1..=BAR_SCALE`, proportional to `value` within `[min, max]`
fn bar_height(value: i64, min: i64, max: i64) -> u64 {
    let span = max.abs_diff(min);
    if span == 0 {
        return BAR_SCALE;
    }
    let scaled = u128::from(value.abs_diff(min)) * u128::from(BAR_SCALE - 1) / u128::from(span);
    scaled as u64 + 1
}

/// Render the array as vertical bars labelled with their index
pub fn render_array_pane(frame: &mut Frame, area: Rect, view: Option<&ArrayView>) {
    let block = Block::default()
        .title(" Array ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let Some(view) = view.filter(|v| !v.array.is_empty()) else {
        let paragraph = Paragraph::new("(empty array)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    // Bars cannot go below zero, so shift negative inputs up
    let min = view.array.iter().copied().min().unwrap_or(0).min(0);
    let max = view.array.iter().copied().max().unwrap_or(0).max(min);
    let bars: Vec<Bar> = view
        .array
        .iter()
        .enumerate()
        .map(|(idx, &value)| {
            let color = bar_color(bar_status(view, idx));
            Bar::default()
                .value(bar_height(value, min, max))
                .text_value(value.to_string())
                .label(Line::from(idx.to_string()))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .bg(color)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let count = bars.len() as u16;
    let inner_width = area.width.saturating_sub(2);
    let bar_width = (inner_width.saturating_sub(count.saturating_sub(1)) / count.max(1)).clamp(1, 7);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .max(BAR_SCALE)
        .bar_width(bar_width)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_height_spans_full_range() {
        assert_eq!(bar_height(0, 0, 0), BAR_SCALE);
        assert_eq!(bar_height(-4, -4, 10), 1);
        assert_eq!(bar_height(10, -4, 10), BAR_SCALE);
        assert_eq!(bar_height(i64::MAX, -1, i64::MAX), BAR_SCALE);
        assert_eq!(bar_height(i64::MIN, i64::MIN, i64::MAX), 1);
        assert_eq!(bar_height(i64::MAX, i64::MIN, i64::MAX), BAR_SCALE);
    }

    #[test]
    fn test_bar_status_precedence() {
        let view = ArrayView::of(&[1, 2, 3, 4])
            .current(1)
            .comparing([1, 2])
            .swapping([2, 3]);
        assert_eq!(bar_status(&view, 0), BarStatus::Default);
        assert_eq!(bar_status(&view, 1), BarStatus::Comparing);
        assert_eq!(bar_status(&view, 2), BarStatus::Swapping);
        assert_eq!(bar_status(&view, 3), BarStatus::Swapping);

        let found = ArrayView::of(&[1, 2]).current(1).comparing([1]).found(1);
        assert_eq!(bar_status(&found, 1), BarStatus::Found);
    }
}
