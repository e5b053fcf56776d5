use std::time::Instant;

use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{constants::PALETTE, domain::Section, visitor::format_visitor_count};

use super::{App, view_style};

const CARET: &str = "▌";

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        f.render_widget(
            Block::default().style(Style::default().bg(PALETTE.background)),
            size,
        );

        if self.loading.is_loading() {
            self.render_loading(f, size, Instant::now());
            return;
        }

        if self.nav.is_overlay_visible() {
            self.render_overlay(f, size);
        } else {
            self.render_home(f, size);
        }

        if let Some(outcome) = self.ack {
            self.render_ack_modal(f, size, outcome);
        }
    }

    fn render_loading(&self, f: &mut Frame, size: Rect, now: Instant) {
        let text = self.typist.text(now);
        let caret = if self.typist.is_done(now) { "" } else { CARET };
        let area = centered_rows(size, 1);

        let line = Line::from(vec![
            Span::styled(text, view_style::heading_style()),
            Span::styled(caret, Style::default().fg(PALETTE.accent)),
        ]);
        f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
    }

    fn render_home(&self, f: &mut Frame, size: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(size);

        let header = vec![
            Line::from(vec![
                Span::styled(
                    self.typewriter.text(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(CARET, Style::default().fg(PALETTE.accent)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                self.config.tagline.clone(),
                Style::default().fg(PALETTE.muted),
            )),
        ];
        f.render_widget(
            Paragraph::new(header).alignment(Alignment::Center),
            rows[1],
        );

        let nav_spans: Vec<Span> = Section::ALL
            .iter()
            .zip(crate::constants::NAV_LABELS)
            .map(|(section, (label, key))| {
                view_style::nav_label_span(label, key, *section == self.home_section())
            })
            .collect();
        f.render_widget(
            Paragraph::new(Line::from(nav_spans)).alignment(Alignment::Center),
            rows[2],
        );

        self.render_footer(f, rows[4]);
        self.render_help(f, rows[5], "←/→ choose · Enter or 1-4 open · ? secret · q quit");
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let secret_style = if self.scrambler.is_revealed() {
            Style::default().fg(PALETTE.accent)
        } else {
            Style::default().fg(PALETTE.highlight)
        };

        let footer = vec![
            Line::from(Span::styled(
                format!("Visitor #{}", format_visitor_count(self.visitor_count)),
                Style::default().fg(PALETTE.muted),
            )),
            Line::from(Span::styled(self.scrambler.text().to_string(), secret_style)),
        ];
        f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), area);
    }

    fn render_overlay(&mut self, f: &mut Frame, size: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        self.render_top_nav(f, rows[0]);

        let Some(section) = self.nav.current_section() else {
            return;
        };

        let border_color = if self.nav.is_transitioning() {
            PALETTE.highlight
        } else {
            PALETTE.accent
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(Span::styled(
                format!(" {} ", section.label().to_uppercase()),
                view_style::heading_style(),
            )))
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(rows[1]);
        f.render_widget(block, rows[1]);

        let help = match section {
            Section::Intro => {
                self.render_intro(f, inner);
                "↑/↓ scroll · Tab/1-4 switch · Esc close"
            }
            Section::Work => {
                self.render_work(f, inner);
                if self.nav.selected_project().is_some() {
                    "↑/↓ prev/next project · Backspace back to grid · Esc close"
                } else {
                    "/ search · ↑ letters · Enter open · Ctrl+L clear · Esc close"
                }
            }
            Section::Resume => {
                self.render_resume(f, inner);
                "d download · Tab/1-4 switch · Esc close"
            }
            Section::Contact => {
                self.render_contact(f, inner);
                "Tab fields · Ctrl+S send · Ctrl+R reset · PgUp/PgDn switch · Esc close"
            }
        };
        self.render_help(f, rows[2], help);
    }

    fn render_top_nav(&self, f: &mut Frame, area: Rect) {
        let current = self.nav.current_section();
        let mut spans = vec![Span::styled(
            format!("{}  ", self.config.owner_name),
            view_style::heading_style(),
        )];
        spans.extend(
            Section::ALL
                .iter()
                .zip(crate::constants::NAV_LABELS)
                .map(|(section, (label, key))| {
                    view_style::nav_label_span(label, key, Some(*section) == current)
                }),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(PALETTE.highlight));
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect, text: &str) {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(PALETTE.highlight),
            )))
            .alignment(Alignment::Center),
            area,
        );
    }
}

fn centered_rows(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x, y, area.width, height)
}
