use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::Section;

use super::{App, contact_form::ContactField, ui_helpers, work_browser::WorkFocus};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Returns `true` when the app should quit.
    fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return true;
        }

        if self.loading.is_loading() {
            return key.code == KeyCode::Char('q');
        }

        self.render_needed = true;

        if self.ack.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.dismiss_ack();
            }
            return false;
        }

        if key.code == KeyCode::Esc {
            self.nav.on_escape();
            return false;
        }

        match self.nav.current_section() {
            None => self.handle_home_key(key, now),
            Some(section) => self.handle_overlay_key(section, key),
        }
    }

    fn is_typing(&self) -> bool {
        match self.nav.current_section() {
            Some(Section::Work) => {
                self.nav.selected_project().is_none() && self.work.is_typing()
            }
            Some(Section::Contact) => self.contact.is_typing(),
            _ => false,
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let len = Section::ALL.len();
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Left | KeyCode::Char('h') => {
                self.home_cursor = ui_helpers::wrap_prev_index(self.home_cursor, len);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.home_cursor = ui_helpers::wrap_next_index(self.home_cursor, len);
            }
            KeyCode::Enter => {
                self.nav.open_from_home(self.home_section(), now);
            }
            KeyCode::Char('?') => self.scrambler.toggle_reveal(),
            KeyCode::Char(c) => {
                if let Some(section) = section_for_key(c) {
                    self.home_cursor = section.position();
                    self.nav.open_from_home(section, now);
                }
            }
            _ => {}
        }
        false
    }

    fn handle_overlay_key(&mut self, section: Section, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::PageDown => {
                self.nav.switch_view(section.next());
                return false;
            }
            KeyCode::PageUp => {
                self.nav.switch_view(section.prev());
                return false;
            }
            KeyCode::Tab if section != Section::Contact => {
                self.nav.switch_view(section.next());
                return false;
            }
            KeyCode::BackTab if section != Section::Contact => {
                self.nav.switch_view(section.prev());
                return false;
            }
            _ => {}
        }

        if !self.is_typing()
            && !key.modifiers.contains(KeyModifiers::CONTROL)
            && let KeyCode::Char(c) = key.code
        {
            if c == 'q' {
                return true;
            }
            if let Some(target) = section_for_key(c) {
                self.nav.switch_view(target);
                return false;
            }
        }

        match section {
            Section::Intro => self.handle_intro_key(key),
            Section::Work => self.handle_work_key(key),
            Section::Resume => self.handle_resume_key(key),
            Section::Contact => self.handle_contact_key(key),
        }
        false
    }

    fn handle_intro_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.intro_scroll = self.intro_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.intro_scroll = self.intro_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn handle_resume_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('d') {
            self.download_resume();
        }
    }

    fn handle_work_key(&mut self, key: KeyEvent) {
        if self.nav.selected_project().is_some() {
            match key.code {
                KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
                    self.nav.select_prev_project();
                }
                KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
                    self.nav.select_next_project();
                }
                KeyCode::Backspace => {
                    self.nav.clear_project_selection();
                }
                _ => {}
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('l') {
                self.work.clear_filters();
            }
            return;
        }

        match self.work.focus {
            WorkFocus::Search => match key.code {
                KeyCode::Char(c) => self.work.push_search(c),
                KeyCode::Backspace => self.work.pop_search(),
                KeyCode::Down => self.work.focus = WorkFocus::Letters,
                KeyCode::Enter => self.work.focus = WorkFocus::Grid,
                _ => {}
            },
            WorkFocus::Letters => match key.code {
                KeyCode::Left | KeyCode::Char('h') => self.work.step_letter(false),
                KeyCode::Right | KeyCode::Char('l') => self.work.step_letter(true),
                KeyCode::Up | KeyCode::Char('/') => self.work.focus = WorkFocus::Search,
                KeyCode::Down | KeyCode::Enter => self.work.focus = WorkFocus::Grid,
                _ => {}
            },
            WorkFocus::Grid => self.handle_grid_key(key),
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        let len = self.filtered().len();
        self.work.clamp_cursor(len);

        let (d_row, d_col) = match key.code {
            KeyCode::Up | KeyCode::Char('k') => (-1, 0),
            KeyCode::Down | KeyCode::Char('j') => (1, 0),
            KeyCode::Left | KeyCode::Char('h') => (0, -1),
            KeyCode::Right | KeyCode::Char('l') => (0, 1),
            KeyCode::Char('/') => {
                self.work.focus = WorkFocus::Search;
                return;
            }
            KeyCode::Enter => {
                let target = self
                    .filtered()
                    .entries()
                    .get(self.work.grid_cursor)
                    .map(|entry| entry.index);
                if let Some(index) = target {
                    self.nav.select_project(index);
                }
                return;
            }
            _ => return,
        };

        if !self.work.move_grid(d_row, d_col, len) {
            self.work.focus = WorkFocus::Letters;
        }
    }

    fn handle_contact_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => self.start_send(),
            KeyCode::Char('r') if ctrl => self.contact.reset(),
            KeyCode::Tab | KeyCode::Down => self.contact.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.contact.focus_prev(),
            KeyCode::Enter => match self.contact.focus() {
                ContactField::Send => self.start_send(),
                ContactField::Reset => self.contact.reset(),
                ContactField::Message => {
                    self.contact.push_newline();
                }
                _ => self.contact.focus_next(),
            },
            KeyCode::Backspace => {
                self.contact.pop_char();
            }
            KeyCode::Char(c) if !ctrl => {
                self.contact.push_char(c);
            }
            _ => {}
        }
    }
}

fn section_for_key(c: char) -> Option<Section> {
    match c {
        '1' => Some(Section::Intro),
        '2' => Some(Section::Work),
        '3' => Some(Section::Resume),
        '4' => Some(Section::Contact),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        thread,
        time::Duration,
    };

    use super::*;
    use crate::{
        config::Config,
        contact::{ContactOutcome, ContactRequest, MailRelay},
        domain::{Catalog, Project, View},
        error::ContactError,
    };

    #[derive(Default)]
    struct RecordingRelay {
        sent: Mutex<Vec<ContactRequest>>,
    }

    impl MailRelay for RecordingRelay {
        fn send(&self, request: &ContactRequest) -> Result<(), ContactError> {
            self.sent.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Project::new("Alpha").with_details(&["rust tooling"]),
            Project::new("Bravo"),
            Project::new("Apple"),
        ])
        .unwrap()
    }

    fn ready_app(relay: Arc<RecordingRelay>) -> (App, Instant) {
        let start = Instant::now();
        let mut app = App::new(catalog(), Config::default(), 742, relay, start);
        let ready = start + Duration::from_secs(2);
        app.tick(ready);
        assert!(!app.loading.is_loading());
        (app, ready)
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) -> bool {
        app.handle_key_at(KeyEvent::new(code, KeyModifiers::NONE), now)
    }

    fn press_ctrl(app: &mut App, c: char, now: Instant) -> bool {
        app.handle_key_at(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), now)
    }

    #[test]
    fn test_loading_only_allows_quit() {
        let start = Instant::now();
        let mut app = App::new(
            catalog(),
            Config::default(),
            1,
            Arc::new(RecordingRelay::default()),
            start,
        );

        assert!(!press(&mut app, KeyCode::Char('2'), start));
        assert_eq!(app.nav.current_view(), View::Home);
        assert!(press(&mut app, KeyCode::Char('q'), start));
    }

    #[test]
    fn test_start_section_opens_when_loading_finishes() {
        let start = Instant::now();
        let mut app = App::new(
            catalog(),
            Config::default(),
            1,
            Arc::new(RecordingRelay::default()),
            start,
        );
        app.start_section = Some(Section::Resume);

        app.tick(start + Duration::from_millis(100));
        assert_eq!(app.nav.current_view(), View::Home);

        app.tick(start + Duration::from_secs(2));
        assert_eq!(app.nav.current_view(), View::Resume);
        assert_eq!(app.home_section(), Section::Resume);
    }

    #[test]
    fn test_home_keys_open_overlay_and_escape_closes() {
        let (mut app, now) = ready_app(Arc::default());

        press(&mut app, KeyCode::Right, now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.nav.current_view(), View::Work);
        assert!(app.nav.is_transitioning());

        press(&mut app, KeyCode::Char('3'), now);
        assert_eq!(app.nav.current_view(), View::Resume);

        press(&mut app, KeyCode::Esc, now);
        assert_eq!(app.nav.current_view(), View::Home);
        assert!(!app.nav.is_overlay_visible());
    }

    #[test]
    fn test_grid_selection_and_detail_navigation() {
        let (mut app, now) = ready_app(Arc::default());
        press(&mut app, KeyCode::Char('2'), now);

        press(&mut app, KeyCode::Right, now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.nav.selected_project(), Some(1));

        press(&mut app, KeyCode::Down, now);
        assert_eq!(app.nav.selected_project(), Some(2));
        press(&mut app, KeyCode::Down, now);
        assert_eq!(app.nav.selected_project(), Some(0));

        press(&mut app, KeyCode::Backspace, now);
        assert_eq!(app.nav.selected_project(), None);
        assert_eq!(app.nav.current_view(), View::Work);

        press(&mut app, KeyCode::Enter, now);
        press(&mut app, KeyCode::Esc, now);
        assert_eq!(app.nav.current_view(), View::Home);
        assert_eq!(app.nav.selected_project(), None);
    }

    #[test]
    fn test_search_captures_digits_and_selects_by_catalog_index() {
        let (mut app, now) = ready_app(Arc::default());
        press(&mut app, KeyCode::Char('2'), now);
        press(&mut app, KeyCode::Char('/'), now);

        for c in "apple".chars() {
            press(&mut app, KeyCode::Char(c), now);
        }
        press(&mut app, KeyCode::Char('1'), now);
        assert_eq!(app.nav.current_view(), View::Work);
        assert_eq!(app.work.filter.search_text, "apple1");

        press(&mut app, KeyCode::Backspace, now);
        assert_eq!(app.filtered().titles(), vec!["Apple"]);

        press(&mut app, KeyCode::Enter, now);
        press(&mut app, KeyCode::Enter, now);
        assert_eq!(app.nav.selected_project(), Some(2));
    }

    #[test]
    fn test_letter_strip_and_clear() {
        let (mut app, now) = ready_app(Arc::default());
        press(&mut app, KeyCode::Char('2'), now);

        press(&mut app, KeyCode::Up, now);
        assert_eq!(app.work.focus, WorkFocus::Letters);
        press(&mut app, KeyCode::Right, now);
        assert_eq!(app.filtered().titles(), vec!["Alpha", "Apple"]);

        press_ctrl(&mut app, 'l', now);
        assert_eq!(app.filtered().len(), 3);
        assert_eq!(app.nav.current_view(), View::Work);
    }

    #[test]
    fn test_contact_form_typing_reset_and_view_switch() {
        let (mut app, now) = ready_app(Arc::default());
        press(&mut app, KeyCode::Char('4'), now);

        press(&mut app, KeyCode::Char('A'), now);
        press(&mut app, KeyCode::Char('1'), now);
        assert_eq!(app.contact.name, "A1");
        assert_eq!(app.nav.current_view(), View::Contact);

        press(&mut app, KeyCode::Tab, now);
        assert_eq!(app.contact.focus(), ContactField::Email);
        assert_eq!(app.nav.current_view(), View::Contact);

        press_ctrl(&mut app, 'r', now);
        assert_eq!(app.contact.name, "");

        press(&mut app, KeyCode::PageDown, now);
        assert_eq!(app.nav.current_view(), View::Intro);
    }

    #[test]
    fn test_send_shows_ack_and_escape_dismisses_it_first() {
        let relay = Arc::new(RecordingRelay::default());
        let (mut app, now) = ready_app(Arc::clone(&relay));
        press(&mut app, KeyCode::Char('4'), now);
        for c in "Ada".chars() {
            press(&mut app, KeyCode::Char(c), now);
        }
        press_ctrl(&mut app, 's', now);
        assert!(app.is_sending());

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.ack.is_none() {
            assert!(Instant::now() < deadline, "send never completed");
            thread::sleep(Duration::from_millis(5));
            app.tick(now);
        }
        assert_eq!(app.ack, Some(ContactOutcome::Sent));
        assert_eq!(relay.sent.lock().unwrap()[0].name, "Ada");

        press(&mut app, KeyCode::Esc, now);
        assert_eq!(app.ack, None);
        assert_eq!(app.nav.current_view(), View::Contact);

        press(&mut app, KeyCode::Esc, now);
        assert_eq!(app.nav.current_view(), View::Home);
    }

    #[test]
    fn test_quit_is_typed_into_fields() {
        let (mut app, now) = ready_app(Arc::default());
        press(&mut app, KeyCode::Char('4'), now);
        assert!(!press(&mut app, KeyCode::Char('q'), now));
        assert_eq!(app.contact.name, "q");

        press(&mut app, KeyCode::PageUp, now);
        assert_eq!(app.nav.current_view(), View::Resume);
        assert!(press(&mut app, KeyCode::Char('q'), now));
    }
}
