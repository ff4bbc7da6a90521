// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::config::Config;
use crate::context::SharedContext;
use crate::model::Therapist;
use crate::router::{AuthState, Guard, Route, Screen};
use crate::session::SessionStore;
use crate::tui::action::{Action, Seq};
use crate::tui::form::{self, Form};
use crate::views::bookings::SessionList;
use crate::views::dashboard::Dashboard;
use crate::views::journals::JournalList;
use crate::views::motivation::MotivationBoard;
use crate::views::therapists::TherapistDirectory;
use ratatui::widgets::ListState;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum InputMode {
    Normal,
    Editing,
    Searching,
    ConfirmDelete(i64),
}

pub struct AppState {
    // Data
    pub config: Config,
    pub session: SessionStore,

    // Navigation
    pub route: Route,
    pub screen: Screen,
    /// Sequence number of the most recent screen load.
    pub seq: Seq,
    pub loading: bool,

    // UI State
    pub list_state: ListState,
    pub mode: InputMode,
    pub message: String,
    pub error: Option<String>,
    pub show_help: bool,

    // Screen data
    pub dashboard: Option<Dashboard>,
    pub journals: JournalList,
    pub sessions: SessionList,
    pub directory: TherapistDirectory,
    pub motivation: MotivationBoard,
    pub booking_therapists: Vec<Therapist>,
    /// Therapist picked in the directory, preselected on the booking form.
    pub preselected_therapist: Option<i64>,
    pub form: Option<Form>,
}

impl AppState {
    pub fn new(ctx: SharedContext, config: Config) -> Self {
        let session = SessionStore::load(ctx);
        let mut state = Self {
            config,
            session,
            route: Route::Dashboard,
            screen: Screen::Login,
            seq: 0,
            loading: false,
            list_state: ListState::default(),
            mode: InputMode::Normal,
            message: String::new(),
            error: None,
            show_help: false,
            dashboard: None,
            journals: JournalList::default(),
            sessions: SessionList::default(),
            directory: TherapistDirectory::default(),
            motivation: MotivationBoard::default(),
            booking_therapists: Vec::new(),
            preselected_therapist: None,
            form: None,
        };
        let (route, screen) = Guard::resolve(Route::Dashboard, state.auth_state());
        state.route = route;
        state.screen = screen;
        state
    }

    pub fn auth_state(&self) -> AuthState {
        AuthState::of(self.session.identity())
    }

    /// Resolves `route` through the guard, resets per-screen UI state and
    /// returns the load to send. Older in-flight loads become stale.
    pub fn navigate(&mut self, route: Route) -> Action {
        let (route, screen) = Guard::resolve(route, self.auth_state());
        self.route = route;
        self.screen = screen;
        self.seq += 1;
        self.error = None;
        self.list_state.select(Some(0));
        self.mode = InputMode::Normal;
        self.form = None;

        match screen {
            Screen::Login => {
                self.form = Some(form::login(self.config.default_login_kind));
                self.mode = InputMode::Editing;
            }
            Screen::Register => {
                self.form = Some(form::register(self.config.default_login_kind));
                self.mode = InputMode::Editing;
            }
            Screen::JournalForm(None) => {
                self.form = Some(form::journal(&Default::default(), false));
                self.mode = InputMode::Editing;
            }
            _ => {}
        }

        self.loading = !matches!(
            screen,
            Screen::Login | Screen::Register | Screen::Profile | Screen::JournalForm(None)
        );
        Action::Load(self.seq, screen)
    }

    /// Reloads the current screen under a fresh sequence number.
    pub fn reload(&mut self) -> Action {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        Action::Load(self.seq, self.screen)
    }

    pub fn is_current(&self, seq: Seq) -> bool {
        seq == self.seq
    }

    /// Length of the list the cursor moves over on the current screen.
    pub fn list_len(&self) -> usize {
        match self.screen {
            Screen::Dashboard(_) => match &self.dashboard {
                Some(Dashboard::Therapist(d)) => d.today.len() + d.upcoming.len(),
                Some(Dashboard::EndUser(d)) => d.recent_journals.len(),
                Some(Dashboard::Admin(d)) => d.recent_users.len(),
                None => 0,
            },
            Screen::JournalList => self.journals.visible().len(),
            Screen::SessionList => self.sessions.visible().len(),
            Screen::TherapistDirectory => self.directory.visible().len(),
            Screen::Motivation => self.motivation.visible().len(),
            _ => 0,
        }
    }

    pub fn selected(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    pub fn next(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let i = (self.selected() + 1).min(len - 1);
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = self.selected().saturating_sub(1);
        self.list_state.select(Some(i));
    }

    /// Keeps the cursor inside the list after it shrank.
    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        let i = self.selected().min(len.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("View error: {}", message);
        self.error = Some(message);
        self.loading = false;
    }
}
