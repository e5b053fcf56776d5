use ratatui::{
    prelude::Span,
    style::{Color, Modifier, Style},
};

use crate::{constants::PALETTE, contact::ContactOutcome};

pub(super) fn nav_label_span(label: &str, key: char, active: bool) -> Span<'static> {
    let style = if active {
        Style::default()
            .fg(text_color_for_bg(PALETTE.accent))
            .bg(PALETTE.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Span::styled(format!(" {} {} ", key, label), style)
}

pub(super) fn text_color_for_bg(bg_color: Color) -> Color {
    if let Color::Rgb(r, g, b) = bg_color {
        let brightness = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if brightness > 128 {
            Color::Black
        } else {
            Color::White
        }
    } else {
        Color::White
    }
}

pub(super) fn outcome_color(outcome: ContactOutcome) -> Color {
    match outcome {
        ContactOutcome::Sent => PALETTE.success,
        ContactOutcome::Failed => PALETTE.failure,
    }
}

pub(super) fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PALETTE.accent)
    } else {
        Style::default().fg(PALETTE.muted)
    }
}

pub(super) fn heading_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}
