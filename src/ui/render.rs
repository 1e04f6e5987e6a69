use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::ui::app::{App, Button};
use crate::ui::layout::{card_height, card_regions, centered_rect_by_size, CARD_WIDTH};
use crate::ui::theme::{
    ACCENT, CARD_BORDER, DECREMENT, DISABLED, FOCUS_HIGHLIGHT, HEADER_TEXT, INCREMENT, NEUTRAL,
    STATUS_ERROR, VALUE_TEXT,
};

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let state = app.counter();
    let show_banner = state.error.is_some();
    let card = centered_rect_by_size(frame.area(), CARD_WIDTH, card_height(show_banner));

    frame.render_widget(Clear, card);
    let block = Block::default()
        .title(Span::styled(" Counter ", Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD)))
        .title_alignment(Alignment::Center)
        .title_bottom(
            Line::from(Span::styled(
                format!(" {} ", app.api_url()),
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
            ))
            .alignment(Alignment::Right),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(CARD_BORDER));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let regions = card_regions(inner, show_banner);

    let value = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            state.value.to_string(),
            Style::default().fg(VALUE_TEXT).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .style(Style::default().bg(ACCENT)),
    );
    frame.render_widget(value, regions.value);

    if let Some(error) = &state.error {
        let banner = Paragraph::new(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(STATUS_ERROR),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(STATUS_ERROR)),
        );
        frame.render_widget(banner, regions.banner);
    }

    let enabled = state.controls_enabled();
    let refresh_label = if state.loading { "Loading..." } else { "Refresh" };
    render_button(frame, regions.decrement, "−", DECREMENT, enabled, app.focus() == Button::Decrement);
    render_button(frame, regions.increment, "+", INCREMENT, enabled, app.focus() == Button::Increment);
    render_button(frame, regions.refresh, refresh_label, NEUTRAL, enabled, app.focus() == Button::Refresh);

    let hints = Paragraph::new(Line::from(Span::styled(
        "+/- change  r refresh  ←→ focus  q quit",
        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hints, regions.hints);
}

fn render_button(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    color: Color,
    enabled: bool,
    focused: bool,
) {
    let color = if enabled { color } else { DISABLED };
    let mut label_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if !enabled {
        label_style = label_style.add_modifier(Modifier::DIM);
    }
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    if focused {
        block = block.style(Style::default().bg(FOCUS_HIGHLIGHT));
    }
    let widget = Paragraph::new(Line::from(Span::styled(label.to_string(), label_style)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(widget, area);
}
