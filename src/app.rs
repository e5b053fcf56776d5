use std::{
    io,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Local;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::{
    config::Config,
    constants::{EASTER_EGG, TIME_SETTINGS},
    contact::{self, ContactOutcome, MailRelay, PendingSend},
    domain::{Catalog, Section},
    effects::{LoadingTypist, Scrambler, Typewriter},
    filter::{FilterOutcome, filter_projects},
    navigation::NavigationController,
    storage::{self, JsonFileStore},
    timing::LoadingGate,
    visitor,
};

mod ack_modal_view;
mod article_views;
mod contact_form;
mod event_handlers;
mod render_views;
mod ui_helpers;
mod view_style;
mod work_browser;

use contact_form::ContactForm;
use work_browser::WorkBrowser;

#[derive(Clone, Debug, PartialEq, Eq)]
enum ResumeStatus {
    Idle,
    Saved(PathBuf),
    Failed(String),
}

struct App {
    catalog: Catalog,
    config: Config,
    nav: NavigationController,
    loading: LoadingGate,
    typist: LoadingTypist,
    typewriter: Typewriter,
    scrambler: Scrambler,
    rng: StdRng,
    home_cursor: usize,
    work: WorkBrowser,
    contact: ContactForm,
    relay: Arc<dyn MailRelay>,
    pending_send: Option<PendingSend>,
    ack: Option<ContactOutcome>,
    visitor_count: u64,
    resume_status: ResumeStatus,
    intro_scroll: u16,
    start_section: Option<Section>,
    render_needed: bool,
}

impl App {
    fn new(
        catalog: Catalog,
        config: Config,
        visitor_count: u64,
        relay: Arc<dyn MailRelay>,
        now: Instant,
    ) -> Self {
        let timing = &config.timing;
        let mut rng = StdRng::from_entropy();
        let scrambler = Scrambler::new(EASTER_EGG, now, &mut rng);

        Self {
            nav: NavigationController::new(catalog.len(), timing.transition()),
            loading: LoadingGate::new(now, timing.loading()),
            typist: LoadingTypist::new(&config.owner_name, now),
            typewriter: Typewriter::new(
                &config.greetings,
                now,
                Duration::from_millis(timing.type_ms),
                Duration::from_millis(timing.delete_ms),
                Duration::from_millis(timing.pause_ms),
            ),
            scrambler,
            rng,
            home_cursor: 0,
            work: WorkBrowser::default(),
            contact: ContactForm::default(),
            relay,
            pending_send: None,
            ack: None,
            visitor_count,
            resume_status: ResumeStatus::Idle,
            intro_scroll: 0,
            start_section: None,
            render_needed: true,
            catalog,
            config,
        }
    }

    fn tick(&mut self, now: Instant) {
        if self.loading.is_loading() {
            // the typist only animates behind the gate
            self.render_needed = true;
            if self.loading.poll(now) {
                self.typewriter = Typewriter::new(
                    &self.config.greetings,
                    now,
                    Duration::from_millis(self.config.timing.type_ms),
                    Duration::from_millis(self.config.timing.delete_ms),
                    Duration::from_millis(self.config.timing.pause_ms),
                );
                if let Some(section) = self.start_section.take() {
                    self.home_cursor = section.position();
                    self.nav.open_from_home(section, now);
                }
            }
            return;
        }

        if self.nav.tick(now) {
            self.render_needed = true;
        }
        if !self.nav.is_overlay_visible() {
            if self.typewriter.tick(now) {
                self.render_needed = true;
            }
            if self.scrambler.tick(now, &mut self.rng) {
                self.render_needed = true;
            }
        }

        if let Some(outcome) = self.pending_send.as_ref().and_then(PendingSend::poll) {
            self.pending_send = None;
            self.ack = Some(outcome);
            self.render_needed = true;
        }
    }

    fn filtered(&self) -> FilterOutcome<'_> {
        filter_projects(&self.catalog, &self.work.filter)
    }

    fn home_section(&self) -> Section {
        Section::ALL[self.home_cursor % Section::ALL.len()]
    }

    fn is_sending(&self) -> bool {
        self.pending_send.is_some()
    }

    fn start_send(&mut self) {
        if self.is_sending() {
            return;
        }
        let request = self.contact.to_request();
        tracing::info!(name = %request.name, "submitting contact form");
        self.pending_send = Some(PendingSend::spawn(Arc::clone(&self.relay), request));
        self.render_needed = true;
    }

    fn dismiss_ack(&mut self) -> bool {
        let had_ack = self.ack.take().is_some();
        if had_ack {
            self.render_needed = true;
        }
        had_ack
    }

    fn download_resume(&mut self) {
        let source = &self.config.resume.download_path;
        self.resume_status = match storage::copy_into_dir(source, &storage::get_download_dir()) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "resume downloaded");
                ResumeStatus::Saved(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "resume download failed");
                ResumeStatus::Failed(e.to_string())
            }
        };
        self.render_needed = true;
    }

    fn modal_rect_ratio(&self, terminal_size: Rect, numerator: u16, denominator: u16) -> Rect {
        let target_width = terminal_size.width.saturating_mul(numerator) / denominator;
        let target_height = (terminal_size.height.saturating_mul(numerator) / denominator).max(7);

        let max_width = terminal_size.width.saturating_sub(2).max(1);
        let max_height = terminal_size.height.saturating_sub(2).max(1);

        let modal_width = target_width.clamp(1, max_width);
        let modal_height = target_height.clamp(1, max_height);

        let modal_x = (terminal_size.width.saturating_sub(modal_width)) / 2;
        let modal_y = (terminal_size.height.saturating_sub(modal_height)) / 2;

        Rect::new(modal_x, modal_y, modal_width, modal_height)
    }
}

fn resolve_visitor_count() -> u64 {
    let store = JsonFileStore::new(storage::get_visitor_store_path());
    let today = visitor::today_key(&Local::now());
    tracing::debug!(path = %store.path().display(), "resolving visitor count");
    visitor::resolve_visitor_count(&store, &today, &mut rand::thread_rng()).count
}

pub fn run_ui(
    catalog: Catalog,
    config: Config,
    start_section: Option<Section>,
) -> Result<(), io::Error> {
    let visitor_count = resolve_visitor_count();
    let relay: Arc<dyn MailRelay> = Arc::from(contact::build_relay(&config.contact));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(catalog, config, visitor_count, relay, Instant::now());
    app.start_section = start_section;
    if app.catalog.is_empty() {
        tracing::warn!("catalog has no projects");
    }
    tracing::info!(projects = app.catalog.len(), visitor_count, "ui started");

    let render_rate = Duration::from_millis(1000 / TIME_SETTINGS.target_fps);
    let mut last_render = Instant::now();

    loop {
        app.tick(Instant::now());

        if last_render.elapsed() >= render_rate && app.render_needed {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed = false;
            last_render = Instant::now();
        }

        if event::poll(Duration::from_millis(10))? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(_, _) => app.render_needed = true,
                _ => {}
            }
        }
    }

    tracing::info!("ui stopped");
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
