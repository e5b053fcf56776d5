use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::contact::ContactOutcome;

use super::{App, view_style};

impl App {
    pub(super) fn render_ack_modal(&self, f: &mut Frame, terminal_size: Rect, outcome: ContactOutcome) {
        let modal_rect = self.modal_rect_ratio(terminal_size, 1, 3);
        let color = view_style::outcome_color(outcome);

        let body = vec![
            Line::from(""),
            Line::from(Span::styled(
                outcome.message(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[ OK ]",
                Style::default()
                    .fg(view_style::text_color_for_bg(color))
                    .bg(color),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(Span::styled(" Contact ", view_style::heading_style())))
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(Span::styled(
                " Enter/Esc ",
                Style::default().fg(Color::Gray),
            )))
            .border_style(Style::default().fg(color));

        f.render_widget(Clear, modal_rect);
        f.render_widget(
            Paragraph::new(body)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block),
            modal_rect,
        );
    }
}
