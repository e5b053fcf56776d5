use std::time::{Duration, Instant};

use crate::{
    domain::{Section, View},
    timing::OneShotTimer,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Article {
    Intro,
    Work { selected: Option<usize> },
    Resume,
    Contact,
}

impl Article {
    fn open(section: Section) -> Self {
        match section {
            Section::Intro => Article::Intro,
            Section::Work => Article::Work { selected: None },
            Section::Resume => Article::Resume,
            Section::Contact => Article::Contact,
        }
    }

    pub fn section(self) -> Section {
        match self {
            Article::Intro => Section::Intro,
            Article::Work { .. } => Section::Work,
            Article::Resume => Section::Resume,
            Article::Contact => Section::Contact,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    Home,
    Overlay {
        article: Article,
        transition: Option<OneShotTimer>,
    },
}

/// Owns the view state machine: home header, article overlay, project detail.
///
/// Requests that do not apply to the current state are ignored and report
/// `false`; nothing here returns an error.
#[derive(Debug)]
pub struct NavigationController {
    state: NavState,
    catalog_len: usize,
    transition_delay: Duration,
}

impl NavigationController {
    pub fn new(catalog_len: usize, transition_delay: Duration) -> Self {
        Self {
            state: NavState::Home,
            catalog_len,
            transition_delay,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn current_view(&self) -> View {
        match self.state {
            NavState::Home => View::Home,
            NavState::Overlay { article, .. } => article.section().into(),
        }
    }

    pub fn current_section(&self) -> Option<Section> {
        self.current_view().section()
    }

    pub fn is_overlay_visible(&self) -> bool {
        matches!(self.state, NavState::Overlay { .. })
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(
            self.state,
            NavState::Overlay {
                transition: Some(_),
                ..
            }
        )
    }

    pub fn selected_project(&self) -> Option<usize> {
        match self.state {
            NavState::Overlay {
                article: Article::Work { selected },
                ..
            } => selected,
            _ => None,
        }
    }

    pub fn open_from_home(&mut self, section: Section, now: Instant) -> bool {
        if self.is_overlay_visible() {
            tracing::debug!(?section, "open_from_home ignored: overlay already visible");
            return false;
        }

        self.state = NavState::Overlay {
            article: Article::open(section),
            transition: Some(OneShotTimer::start(now, self.transition_delay)),
        };
        tracing::info!(view = %View::from(section), "opened overlay");
        true
    }

    pub fn switch_view(&mut self, section: Section) -> bool {
        let NavState::Overlay {
            article,
            transition,
        } = self.state
        else {
            tracing::debug!(?section, "switch_view ignored: overlay hidden");
            return false;
        };

        if article.section() == section {
            return false;
        }

        self.state = NavState::Overlay {
            article: Article::open(section),
            transition,
        };
        tracing::debug!(view = %View::from(section), "switched view");
        true
    }

    pub fn select_project(&mut self, index: usize) -> bool {
        if index >= self.catalog_len {
            tracing::debug!(index, len = self.catalog_len, "select_project ignored: out of range");
            return false;
        }

        match &mut self.state {
            NavState::Overlay {
                article: Article::Work { selected },
                ..
            } => {
                *selected = Some(index);
                true
            }
            _ => {
                tracing::debug!(index, "select_project ignored: not in work view");
                false
            }
        }
    }

    pub fn clear_project_selection(&mut self) -> bool {
        match &mut self.state {
            NavState::Overlay {
                article: Article::Work { selected },
                ..
            } => selected.take().is_some(),
            _ => false,
        }
    }

    pub fn select_next_project(&mut self) -> bool {
        self.step_selection(1)
    }

    pub fn select_prev_project(&mut self) -> bool {
        self.step_selection(-1)
    }

    fn step_selection(&mut self, direction: isize) -> bool {
        let Some(current) = self.selected_project() else {
            return false;
        };
        let len = self.catalog_len;
        let next = if direction < 0 {
            (current + len - 1) % len
        } else {
            (current + 1) % len
        };
        self.select_project(next)
    }

    pub fn close(&mut self) {
        if self.is_overlay_visible() {
            tracing::info!(view = %self.current_view(), "closed overlay");
        }
        self.state = NavState::Home;
    }

    pub fn on_escape(&mut self) -> bool {
        if !self.is_overlay_visible() {
            return false;
        }
        self.close();
        true
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        let NavState::Overlay { transition, .. } = &mut self.state else {
            return false;
        };

        let fired = transition.as_mut().is_some_and(|timer| timer.poll(now));
        if fired {
            *transition = None;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn controller() -> NavigationController {
        NavigationController::new(3, DELAY)
    }

    fn assert_home(nav: &NavigationController) {
        assert_eq!(nav.current_view(), View::Home);
        assert!(!nav.is_overlay_visible());
        assert_eq!(nav.selected_project(), None);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn test_initial_state_is_home() {
        assert_home(&controller());
    }

    #[test]
    fn test_open_from_home_switches_immediately_and_transitions() {
        let start = Instant::now();
        let mut nav = controller();

        assert!(nav.open_from_home(Section::Work, start));
        assert_eq!(nav.current_view(), View::Work);
        assert!(nav.is_overlay_visible());
        assert!(nav.is_transitioning());

        assert!(!nav.tick(start + Duration::from_millis(299)));
        assert!(nav.is_transitioning());
        assert!(nav.tick(start + DELAY));
        assert!(!nav.is_transitioning());
        assert!(!nav.tick(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_open_from_home_ignored_when_overlay_visible() {
        let start = Instant::now();
        let mut nav = controller();
        nav.open_from_home(Section::Intro, start);
        assert!(!nav.open_from_home(Section::Contact, start));
        assert_eq!(nav.current_view(), View::Intro);
    }

    #[test]
    fn test_close_always_returns_home() {
        let start = Instant::now();
        let mut nav = controller();

        nav.close();
        assert_home(&nav);

        nav.open_from_home(Section::Work, start);
        nav.select_project(2);
        nav.close();
        assert_home(&nav);

        nav.open_from_home(Section::Resume, start);
        nav.switch_view(Section::Contact);
        nav.close();
        nav.close();
        assert_home(&nav);
    }

    #[test]
    fn test_close_drops_pending_transition() {
        let start = Instant::now();
        let mut nav = controller();
        nav.open_from_home(Section::Intro, start);
        nav.close();
        assert!(!nav.tick(start + DELAY));
        assert_home(&nav);
    }

    #[test]
    fn test_switch_view_clears_selection() {
        let start = Instant::now();
        let mut nav = controller();
        nav.open_from_home(Section::Work, start);
        assert!(nav.select_project(1));
        assert_eq!(nav.selected_project(), Some(1));

        assert!(nav.switch_view(Section::Intro));
        assert_eq!(nav.selected_project(), None);
        assert_eq!(nav.current_view(), View::Intro);

        assert!(nav.switch_view(Section::Work));
        assert_eq!(nav.selected_project(), None);
    }

    #[test]
    fn test_switch_to_current_view_is_noop() {
        let start = Instant::now();
        let mut nav = controller();
        nav.open_from_home(Section::Work, start);
        nav.tick(start + DELAY);
        nav.select_project(0);
        let before = nav.state();

        assert!(!nav.switch_view(Section::Work));
        assert_eq!(nav.state(), before);
        assert!(nav.is_overlay_visible());
        assert_eq!(nav.selected_project(), Some(0));
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn test_switch_view_keeps_pending_transition() {
        let start = Instant::now();
        let mut nav = controller();
        nav.open_from_home(Section::Intro, start);
        nav.switch_view(Section::Resume);
        assert!(nav.is_transitioning());
        assert!(nav.tick(start + DELAY));
    }

    #[test]
    fn test_switch_view_from_home_is_ignored() {
        let mut nav = controller();
        assert!(!nav.switch_view(Section::Intro));
        assert_home(&nav);
    }

    #[test]
    fn test_select_project_guards() {
        let start = Instant::now();
        let mut nav = controller();

        assert!(!nav.select_project(0));
        nav.open_from_home(Section::Intro, start);
        assert!(!nav.select_project(0));
        assert_eq!(nav.selected_project(), None);

        nav.switch_view(Section::Work);
        assert!(!nav.select_project(3));
        assert_eq!(nav.selected_project(), None);
        assert!(nav.select_project(2));
    }

    #[test]
    fn test_clear_selection_stays_in_work() {
        let start = Instant::now();
        let mut nav = controller();
        nav.open_from_home(Section::Work, start);
        nav.select_project(1);

        assert!(nav.clear_project_selection());
        assert_eq!(nav.current_view(), View::Work);
        assert!(nav.is_overlay_visible());
        assert_eq!(nav.selected_project(), None);
        assert!(!nav.clear_project_selection());
    }

    #[test]
    fn test_escape_only_fires_with_overlay() {
        let start = Instant::now();
        let mut nav = controller();
        assert!(!nav.on_escape());
        assert_home(&nav);

        nav.open_from_home(Section::Work, start);
        nav.select_project(0);
        assert!(nav.on_escape());
        assert_home(&nav);
    }

    #[test]
    fn test_step_selection_wraps() {
        let start = Instant::now();
        let mut nav = controller();
        nav.open_from_home(Section::Work, start);
        assert!(!nav.select_next_project());

        nav.select_project(2);
        assert!(nav.select_next_project());
        assert_eq!(nav.selected_project(), Some(0));
        assert!(nav.select_prev_project());
        assert_eq!(nav.selected_project(), Some(2));
    }

    #[test]
    fn test_random_sequences_keep_home_and_selection_invariants() {
        let start = Instant::now();
        let mut rng = StdRng::seed_from_u64(7);
        let mut closed_with_selection = 0;

        for _ in 0..500 {
            let mut nav = controller();
            let mut now = start;

            for _ in 0..40 {
                now += Duration::from_millis(rng.gen_range(0..200));
                let section = Section::ALL[rng.gen_range(0..Section::ALL.len())];
                let had_selection = nav.selected_project().is_some();

                match rng.gen_range(0..8) {
                    0 => {
                        nav.open_from_home(section, now);
                    }
                    1 => {
                        nav.switch_view(section);
                    }
                    2 => {
                        nav.select_project(rng.gen_range(0..4));
                    }
                    3 => {
                        nav.clear_project_selection();
                    }
                    4 => {
                        nav.select_next_project();
                    }
                    5 => {
                        nav.close();
                        closed_with_selection += usize::from(had_selection);
                        assert_home(&nav);
                    }
                    6 => {
                        nav.on_escape();
                        closed_with_selection += usize::from(had_selection);
                        assert_home(&nav);
                    }
                    _ => {
                        nav.tick(now);
                    }
                }

                if !nav.is_overlay_visible() {
                    assert_home(&nav);
                }
                if let Some(index) = nav.selected_project() {
                    assert_eq!(nav.current_view(), View::Work);
                    assert!(index < 3);
                }
            }
        }

        assert!(closed_with_selection > 0);
    }
}
