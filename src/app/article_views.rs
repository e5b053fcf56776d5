use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::{
    constants::PALETTE,
    domain::{self, Project},
    filter::FilterOutcome,
};

use super::{
    App, ResumeStatus,
    contact_form::ContactField,
    ui_helpers,
    view_style::{self, focus_style},
    work_browser::WorkFocus,
};

const TILE_WIDTH: u16 = 28;
const TILE_HEIGHT: u16 = 4;
const RAIL_WIDTH: u16 = 7;

const SOCIAL_LINKS: [(&str, &str); 3] = [
    ("Instagram", "https://www.instagram.com/plane_paper_rick/"),
    ("LinkedIn", "https://www.linkedin.com/in/ruiquansu"),
    ("GitHub", "https://github.com/plane-paper"),
];

impl App {
    pub(super) fn render_intro(&self, f: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        for paragraph in domain::intro_paragraphs() {
            lines.push(Line::from(Span::styled(
                domain::plain_text(paragraph),
                Style::default().fg(Color::White),
            )));
            lines.push(Line::from(""));
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .scroll((self.intro_scroll, 0));
        f.render_widget(paragraph, padded(area));
    }

    pub(super) fn render_work(&mut self, f: &mut Frame, area: Rect) {
        if let Some(index) = self.nav.selected_project() {
            self.render_project_detail(f, area, index);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        self.render_search_box(f, rows[0]);
        self.render_letter_strip(f, rows[1]);

        self.work.columns = ui_helpers::grid_columns(rows[3].width, TILE_WIDTH);
        let len = self.filtered().len();
        self.work.clamp_cursor(len);
        self.render_grid(f, rows[3]);
    }

    fn render_search_box(&self, f: &mut Frame, area: Rect) {
        let focused = self.work.focus == WorkFocus::Search;
        let text = if self.work.filter.search_text.is_empty() && !focused {
            Span::styled(
                "Search projects or keywords...",
                Style::default().fg(PALETTE.highlight),
            )
        } else {
            Span::styled(
                format!(
                    "{}{}",
                    self.work.filter.search_text,
                    if focused { "▌" } else { "" }
                ),
                Style::default().fg(Color::White),
            )
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(" Search "))
            .border_style(focus_style(focused));
        if self.work.filter.is_active() {
            block = block.title(Line::from(" Ctrl+L clear ").alignment(Alignment::Right));
        }
        f.render_widget(Paragraph::new(Line::from(text)).block(block), area);
    }

    fn render_letter_strip(&self, f: &mut Frame, area: Rect) {
        let focused = self.work.focus == WorkFocus::Letters;
        let spans: Vec<Span> = self
            .work
            .letters()
            .iter()
            .enumerate()
            .map(|(i, letter)| {
                let active = *letter == self.work.filter.letter;
                let mut style = if active {
                    Style::default().fg(Color::White).bg(PALETTE.highlight)
                } else {
                    Style::default().fg(PALETTE.muted)
                };
                if focused && i == self.work.letter_cursor() {
                    style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
                }
                Span::styled(format!(" {} ", letter.label()), style)
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_grid(&self, f: &mut Frame, area: Rect) {
        let outcome = self.filtered();
        let FilterOutcome::Matches(entries) = &outcome else {
            let message = Paragraph::new(Line::from(Span::styled(
                "No projects match your search or filter.",
                Style::default().fg(PALETTE.muted),
            )))
            .alignment(Alignment::Center);
            f.render_widget(message, area);
            return;
        };

        let columns = self.work.columns.max(1);
        let visible_rows = (area.height / TILE_HEIGHT) as usize;
        let cursor = self.work.grid_cursor;
        let first_row = ui_helpers::scroll_offset(cursor / columns, visible_rows);

        for (slot, entry) in entries
            .iter()
            .enumerate()
            .skip(first_row * columns)
            .take(visible_rows * columns)
        {
            let row = (slot / columns - first_row) as u16;
            let col = (slot % columns) as u16;
            let tile = Rect::new(
                area.x + col * TILE_WIDTH,
                area.y + row * TILE_HEIGHT,
                TILE_WIDTH.min(area.width),
                TILE_HEIGHT,
            );
            let highlighted = slot == cursor && self.work.focus == WorkFocus::Grid;
            render_tile(f, tile, entry.project, highlighted);
        }
    }

    fn render_project_detail(&self, f: &mut Frame, area: Rect, index: usize) {
        let Some(project) = self.catalog.get(index) else {
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(RAIL_WIDTH), Constraint::Min(0)])
            .split(area);

        let rail: Vec<ListItem> = self
            .catalog
            .projects()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let glyph = p.initial().unwrap_or('?');
                let style = if i == index {
                    Style::default()
                        .fg(view_style::text_color_for_bg(PALETTE.accent))
                        .bg(PALETTE.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(format!("  {}  ", glyph))).style(style)
            })
            .collect();
        let mut rail_state = ListState::default();
        rail_state.select(Some(index));
        let rail = List::new(rail).block(
            Block::default()
                .borders(Borders::RIGHT)
                .border_style(Style::default().fg(PALETTE.highlight)),
        );
        f.render_stateful_widget(rail, columns[0], &mut rail_state);

        let paragraph = Paragraph::new(project_detail_lines(project)).wrap(Wrap { trim: false });
        f.render_widget(paragraph, padded(columns[1]));
    }

    pub(super) fn render_resume(&self, f: &mut Frame, area: Rect) {
        let resume = &self.config.resume;
        let mut lines = vec![
            labelled("Document", resume.display_path.display().to_string()),
            labelled("Download", resume.download_path.display().to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "[ d ] Download PDF",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        match &self.resume_status {
            ResumeStatus::Idle => {}
            ResumeStatus::Saved(path) => lines.push(Line::from(Span::styled(
                format!("Saved to {}", path.display()),
                Style::default().fg(PALETTE.success),
            ))),
            ResumeStatus::Failed(message) => lines.push(Line::from(Span::styled(
                format!("Download failed: {}", message),
                Style::default().fg(PALETTE.failure),
            ))),
        }

        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            padded(area),
        );
    }

    pub(super) fn render_contact(&self, f: &mut Frame, area: Rect) {
        let area = padded(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    "The following information will be sent to my email at ",
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    self.config.contact.to.clone(),
                    Style::default().fg(PALETTE.accent),
                ),
                Span::raw("."),
            ]))
            .wrap(Wrap { trim: true }),
            rows[0],
        );

        let fields = [
            ContactField::Name,
            ContactField::Email,
            ContactField::Subject,
            ContactField::Message,
        ];
        for (field, row) in fields.into_iter().zip(rows[1..5].iter()) {
            self.render_contact_field(f, *row, field);
        }

        let button = |field: ContactField| {
            let style = if self.contact.focus() == field {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Span::styled(format!("[ {} ]", field.label().to_uppercase()), style)
        };
        let mut buttons = vec![
            button(ContactField::Send),
            Span::raw("  "),
            button(ContactField::Reset),
        ];
        if self.is_sending() {
            buttons.push(Span::styled(
                "  sending...",
                Style::default().fg(PALETTE.muted),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(buttons)), rows[5]);

        let socials: Vec<Span> = SOCIAL_LINKS
            .iter()
            .flat_map(|(name, url)| {
                [
                    Span::styled(format!("{} ", name), view_style::heading_style()),
                    Span::styled(format!("{}   ", url), Style::default().fg(PALETTE.muted)),
                ]
            })
            .collect();
        f.render_widget(Paragraph::new(Line::from(socials)), rows[7]);
    }

    fn render_contact_field(&self, f: &mut Frame, area: Rect, field: ContactField) {
        let focused = self.contact.focus() == field;
        let mut value = self.contact.value(field).to_string();
        if focused {
            value.push('▌');
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(Line::from(format!(" {} ", field.label().to_uppercase())))
            .border_style(focus_style(focused));
        f.render_widget(
            Paragraph::new(value)
                .style(Style::default().fg(Color::White))
                .wrap(Wrap { trim: false })
                .block(block),
            area,
        );
    }
}

fn render_tile(f: &mut Frame, area: Rect, project: &Project, highlighted: bool) {
    let border = if highlighted {
        PALETTE.accent
    } else {
        PALETTE.highlight
    };
    let inner_width = area.width.saturating_sub(4) as usize;
    let title = ui_helpers::truncate_label(&project.title.to_uppercase(), inner_width);
    let second = if highlighted {
        Span::styled("Enter to view details →", Style::default().fg(PALETTE.accent))
    } else {
        let image = project
            .images
            .first()
            .map(|path| ui_helpers::truncate_label(path, inner_width))
            .unwrap_or_default();
        Span::styled(image, Style::default().fg(PALETTE.muted))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(title, view_style::heading_style())),
        Line::from(second),
    ])
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(paragraph, area);
}

fn project_detail_lines(project: &Project) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        project.title.to_uppercase(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(link) = project.source_link() {
        lines.push(Line::from(Span::styled(
            link.to_string(),
            Style::default()
                .fg(PALETTE.accent)
                .add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines.push(Line::from(""));

    if let Some(description) = &project.description {
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(""));
    }

    for image in &project.images {
        lines.push(labelled("Image", image.clone()));
    }
    if !project.images.is_empty() {
        lines.push(Line::from(""));
    }

    if !project.details.is_empty() {
        lines.push(Line::from(Span::styled(
            "PROJECT DETAILS",
            view_style::heading_style(),
        )));
        for detail in project.plain_details() {
            lines.push(Line::from(vec![
                Span::styled("• ", Style::default().fg(PALETTE.accent)),
                Span::styled(detail, Style::default().fg(Color::White)),
            ]));
        }
    }

    if let Some(video) = &project.video {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("DEMO VIDEO", view_style::heading_style())));
        lines.push(Line::from(Span::styled(
            video.clone(),
            Style::default().fg(PALETTE.muted),
        )));
    }

    lines
}

fn labelled(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(PALETTE.muted)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn padded(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y,
        area.width.saturating_sub(2),
        area.height,
    )
}
