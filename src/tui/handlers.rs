// File: src/tui/handlers.rs
// Handles keyboard input and network events for the TUI.
use crate::model::Booking;
use crate::router::{Route, Screen};
use crate::session::{Identity, Owner, Role};
use crate::tui::action::{Action, AppEvent, Loaded};
use crate::tui::form;
use crate::tui::state::{AppState, InputMode};
use crate::views::bookings::{BookingAction, BookingDraft, actions_for};
use crate::views::dashboard::Dashboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::Sender;

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// A mutation result only applies while the account that issued it is still signed in.
fn still_signed_in_as(state: &AppState, owner: Owner) -> bool {
    let current = state.session.identity().map(Identity::owner);
    if current != Some(owner) {
        log::debug!("Dropping result for an account that is no longer signed in");
        return false;
    }
    true
}

/// Applies a network event. Returns the follow-up actions to send.
pub fn handle_app_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    let mut follow_up = Vec::new();
    match event {
        AppEvent::Status(s) => state.message = s,
        AppEvent::Error(seq, message) => {
            if seq.is_some_and(|s| !state.is_current(s)) {
                log::debug!("Dropping error from stale load {:?}", seq);
                return follow_up;
            }
            state.set_error(message);
        }

        AppEvent::LoggedIn(payload) => match state.session.login(payload) {
            Ok(identity) => {
                state.message = format!("Welcome back, {}", identity.account.display_name());
                let identity = identity.clone();
                follow_up.push(Action::SetIdentity(Some(identity)));
                follow_up.push(state.navigate(Route::Dashboard));
            }
            Err(e) => state.set_error(format!("Could not start session: {}", e)),
        },

        AppEvent::Registered(kind) => {
            follow_up.push(state.navigate(Route::Login));
            state.form = Some(form::login(kind));
            state.message = "Account created. Please sign in.".to_string();
        }

        AppEvent::Loaded(seq, loaded) => {
            if !state.is_current(seq) {
                log::debug!("Dropping stale load {}", seq);
                return follow_up;
            }
            state.loading = false;
            apply_loaded(state, loaded);
            state.clamp_selection();
        }

        AppEvent::JournalsChanged(owner, entries) => {
            if !still_signed_in_as(state, owner) {
                return follow_up;
            }
            // A submitted form lands on the list without another round trip.
            if matches!(state.screen, Screen::JournalForm(_)) {
                let _ = state.navigate(Route::Journals);
            }
            state.loading = false;
            state.journals.replace(entries);
            state.clamp_selection();
        }

        AppEvent::BookingUpdated(owner, updated) => {
            if !still_signed_in_as(state, owner) {
                return follow_up;
            }
            if let Some(Dashboard::Therapist(d)) = &state.dashboard {
                state.dashboard = Some(Dashboard::Therapist(d.patched(updated.clone(), now())));
            }
            state.sessions.patch(updated);
            state.clamp_selection();
        }

        AppEvent::Booked(owner, booking) => {
            if !still_signed_in_as(state, owner) {
                return follow_up;
            }
            state.preselected_therapist = None;
            if state.screen == Screen::BookSession {
                follow_up.push(state.navigate(Route::Sessions));
            }
            state.message = format!(
                "Session booked with {} on {}",
                booking.therapist.display_name(),
                crate::model::display::format_date_time(&booking.session_date)
            );
        }

        AppEvent::ProfileSaved(owner, account) => {
            if !still_signed_in_as(state, owner) {
                return follow_up;
            }
            let payload = state
                .session
                .identity()
                .map(|identity| identity.payload_with(&account));
            match payload {
                Some(Ok(payload)) => match state.session.login(payload) {
                    Ok(identity) => {
                        follow_up.push(Action::SetIdentity(Some(identity.clone())));
                        state.form = None;
                        state.mode = InputMode::Normal;
                        state.message = "Profile updated successfully!".to_string();
                    }
                    Err(e) => state.set_error(format!("Could not store profile: {}", e)),
                },
                Some(Err(e)) => state.set_error(format!("Could not store profile: {}", e)),
                None => state.set_error("Signed out while saving"),
            }
        }
    }
    follow_up
}

fn apply_loaded(state: &mut AppState, loaded: Loaded) {
    match loaded {
        Loaded::Dashboard(d) => state.dashboard = Some(d),
        Loaded::Journals(entries) => state.journals.replace(entries),
        Loaded::JournalDraft(id, draft) => {
            if state.screen == Screen::JournalForm(Some(id)) {
                state.form = Some(form::journal(&draft, true));
                state.mode = InputMode::Editing;
            }
        }
        Loaded::Sessions(bookings) => state.sessions.replace(bookings),
        Loaded::Booking(therapists) => {
            if therapists.is_empty() {
                state.set_error("No therapists are available right now");
            }
            let mut draft = BookingDraft::new(now());
            draft.therapist_id = state.preselected_therapist;
            state.form = Some(form::booking(&draft, &therapists));
            state.booking_therapists = therapists;
            state.mode = InputMode::Editing;
        }
        Loaded::Therapists(therapists) => {
            let search = std::mem::take(&mut state.directory.search);
            state.directory = crate::views::therapists::TherapistDirectory::new(therapists);
            state.directory.search = search;
        }
        Loaded::Motivation(items) => state.motivation.replace(items),
        Loaded::Nothing => {}
    }
}

fn logout(state: &mut AppState) -> Vec<Action> {
    if let Err(e) = state.session.logout() {
        log::error!("Failed to clear session: {:#}", e);
        state.set_error(format!("Could not sign out: {:#}", e));
        return Vec::new();
    }
    state.dashboard = None;
    state.journals = Default::default();
    state.sessions = Default::default();
    state.booking_therapists.clear();
    state.preselected_therapist = None;
    state.message = "Signed out.".to_string();
    vec![Action::SetIdentity(None), state.navigate(Route::Login)]
}

/// Booking under the cursor on the sessions list or the therapist dashboard.
fn selected_booking(state: &AppState) -> Option<Booking> {
    let idx = state.selected();
    match state.screen {
        Screen::SessionList => state.sessions.visible().get(idx).map(|b| (*b).clone()),
        Screen::Dashboard(_) => match &state.dashboard {
            Some(Dashboard::Therapist(d)) => d.today.iter().chain(&d.upcoming).nth(idx).cloned(),
            _ => None,
        },
        _ => None,
    }
}

fn booking_action(state: &mut AppState, action: BookingAction) -> Option<Action> {
    let booking = selected_booking(state)?;
    let identity = state.session.identity()?;
    if actions_for(identity, &booking).contains(&action) {
        Some(Action::UpdateBooking(booking, action))
    } else {
        state.set_error(format!("Cannot {} this session", action.to_string().to_lowercase()));
        None
    }
}

/// Validates the open form and turns it into the matching action.
fn submit_form(state: &mut AppState) -> Option<Action> {
    let f = state.form.as_ref()?;
    let result = match state.screen {
        Screen::Login => form::to_login(f).validate().map(Action::Login),
        Screen::Register => form::to_register(f).validate().map(Action::Register),
        Screen::JournalForm(editing) => {
            let identity = state.session.identity()?;
            form::to_journal(f)
                .validate(identity)
                .map(|body| Action::SaveJournal(editing, body))
        }
        Screen::BookSession => {
            let identity = state.session.identity()?;
            form::to_booking(f, &state.booking_therapists)
                .validate(identity, now())
                .map(Action::Book)
        }
        Screen::Profile => {
            let identity = state.session.identity()?;
            form::to_profile(f)
                .validate(&identity.account)
                .map(Action::SaveProfile)
        }
        _ => return None,
    };
    match result {
        Ok(action) => {
            state.error = None;
            state.loading = true;
            Some(action)
        }
        Err(e) => {
            state.set_error(e.user_message());
            None
        }
    }
}

fn cancel_form(state: &mut AppState) -> Option<Action> {
    match state.screen {
        Screen::Login => None,
        Screen::Register => Some(state.navigate(Route::Login)),
        Screen::JournalForm(_) => Some(state.navigate(Route::Journals)),
        Screen::BookSession => Some(state.navigate(Route::Sessions)),
        _ => {
            state.form = None;
            state.mode = InputMode::Normal;
            state.error = None;
            None
        }
    }
}

fn handle_editing(key: KeyEvent, state: &mut AppState) -> Option<Action> {
    match key.code {
        KeyCode::Esc => return cancel_form(state),
        KeyCode::Enter => return submit_form(state),
        KeyCode::F(2) if state.screen == Screen::Login => {
            return Some(state.navigate(Route::Register));
        }
        KeyCode::F(2) if state.screen == Screen::Register => {
            return Some(state.navigate(Route::Login));
        }
        _ => {}
    }
    let f = state.form.as_mut()?;
    match key.code {
        KeyCode::Tab | KeyCode::Down => f.focus_next(),
        KeyCode::BackTab | KeyCode::Up => f.focus_prev(),
        KeyCode::Left => f.left(),
        KeyCode::Right => f.right(),
        KeyCode::Backspace => f.backspace(),
        KeyCode::Char(c) => f.insert_char(c),
        _ => {}
    }
    None
}

fn handle_searching(key: KeyEvent, state: &mut AppState) {
    let search = match state.screen {
        Screen::TherapistDirectory => &mut state.directory.search,
        Screen::Motivation => &mut state.motivation.search,
        _ => {
            state.mode = InputMode::Normal;
            return;
        }
    };
    match key.code {
        KeyCode::Esc => {
            search.clear();
            state.mode = InputMode::Normal;
        }
        KeyCode::Enter => state.mode = InputMode::Normal,
        KeyCode::Backspace => {
            search.pop();
        }
        KeyCode::Char(c) => search.push(c),
        _ => {}
    }
    state.list_state.select(Some(0));
}

fn handle_screen_key(code: KeyCode, state: &mut AppState) -> Option<Action> {
    let role = state.session.identity().map(|i| i.role);
    match (state.screen, code) {
        // Journals
        (Screen::JournalList, KeyCode::Char('a')) => Some(state.navigate(Route::JournalNew)),
        (Screen::JournalList, KeyCode::Char('e') | KeyCode::Enter) => {
            let id = state.journals.visible().get(state.selected()).map(|j| j.id)?;
            Some(state.navigate(Route::JournalEdit(id)))
        }
        (Screen::JournalList, KeyCode::Char('d') | KeyCode::Delete) => {
            let id = state.journals.visible().get(state.selected()).map(|j| j.id)?;
            state.mode = InputMode::ConfirmDelete(id);
            None
        }
        (Screen::JournalList, KeyCode::Char('f')) => {
            state.journals.filter = state.journals.filter.next();
            state.list_state.select(Some(0));
            None
        }

        // Recent journals on the user dashboard open for editing.
        (Screen::Dashboard(_), KeyCode::Enter) => {
            let id = match &state.dashboard {
                Some(Dashboard::EndUser(d)) => d.recent_journals.get(state.selected()).map(|j| j.id),
                _ => None,
            }?;
            Some(state.navigate(Route::JournalEdit(id)))
        }

        // Sessions and the therapist dashboard
        (Screen::SessionList, KeyCode::Char('f')) => {
            state.sessions.filter = state.sessions.filter.next();
            state.list_state.select(Some(0));
            None
        }
        (Screen::SessionList | Screen::Dashboard(_), KeyCode::Char('c')) => {
            booking_action(state, BookingAction::Complete)
        }
        (Screen::SessionList | Screen::Dashboard(_), KeyCode::Char('n')) => {
            booking_action(state, BookingAction::NoShow)
        }
        (Screen::SessionList | Screen::Dashboard(_), KeyCode::Char('x')) => {
            booking_action(state, BookingAction::Cancel)
        }
        (Screen::SessionList, KeyCode::Char('b')) if role == Some(Role::EndUser) => {
            Some(state.navigate(Route::BookSession))
        }

        // Directory
        (Screen::TherapistDirectory, KeyCode::Char('/')) => {
            state.mode = InputMode::Searching;
            None
        }
        (Screen::TherapistDirectory, KeyCode::Char('s')) => {
            state.directory.next_specialization();
            state.list_state.select(Some(0));
            None
        }
        (Screen::TherapistDirectory, KeyCode::Char('b') | KeyCode::Enter) => {
            let id = state.directory.visible().get(state.selected()).map(|t| t.id)?;
            state.preselected_therapist = Some(id);
            Some(state.navigate(Route::BookSession))
        }

        // Motivation
        (Screen::Motivation, KeyCode::Char('/')) => {
            state.mode = InputMode::Searching;
            None
        }
        (Screen::Motivation, KeyCode::Char('f')) => {
            state.motivation.filter = state.motivation.filter.next();
            state.list_state.select(Some(0));
            None
        }

        // Profile
        (Screen::Profile, KeyCode::Char('e')) => {
            let account = state.session.identity().map(|i| i.account.clone())?;
            state.form = Some(form::profile(&account));
            state.mode = InputMode::Editing;
            None
        }
        (Screen::Profile, KeyCode::Char('a')) if role == Some(Role::Therapist) => {
            Some(Action::ToggleAvailability)
        }

        // Book session with no therapists loaded: retry.
        (Screen::BookSession, KeyCode::Enter) => Some(state.reload()),
        _ => None,
    }
}

pub async fn handle_key_event(
    key: KeyEvent,
    state: &mut AppState,
    action_tx: &Sender<Action>,
) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match state.mode {
        InputMode::Editing => return handle_editing(key, state),
        InputMode::Searching => {
            handle_searching(key, state);
            return None;
        }
        InputMode::ConfirmDelete(id) => {
            state.mode = InputMode::Normal;
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                state.loading = true;
                return Some(Action::DeleteJournal(id));
            }
            return None;
        }
        InputMode::Normal => {}
    }

    if state.show_help {
        state.show_help = false;
        return None;
    }

    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('?') => {
            state.show_help = true;
            return None;
        }
        KeyCode::Char('r') => return Some(state.reload()),
        KeyCode::Char('j') | KeyCode::Down => {
            state.next();
            return None;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.previous();
            return None;
        }
        KeyCode::Char('O') if state.session.is_authenticated() => {
            let mut actions = logout(state);
            let last = actions.pop();
            for action in actions {
                let _ = action_tx.send(action).await;
            }
            return last;
        }
        KeyCode::Char(c @ '1'..='9') => {
            let role = state.session.identity().map(|i| i.role)?;
            let idx = c.to_digit(10).map(|d| d as usize - 1)?;
            let (route, _) = Route::menu(role).get(idx).copied()?;
            return Some(state.navigate(route));
        }
        _ => {}
    }

    handle_screen_key(key.code, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::context::TestContext;
    use crate::context::AppContext;
    use crate::model::{BookingStatus, JournalEntry, LoginKind, Mood, SessionKind, Therapist, User};
    use crate::router::DashboardVariant;
    use crate::session::AuthPayload;
    use crate::views::Filter;
    use crate::views::dashboard::TherapistDashboard;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn state() -> AppState {
        AppState::new(Arc::new(TestContext::new()), Config::default())
    }

    fn payload(user_type: &str, id: i64) -> AuthPayload {
        AuthPayload {
            token: "tok".to_string(),
            user: json!({ "id": id, "firstName": "Sam", "lastName": "Lee", "email": "s@x.org" }),
            user_type: user_type.to_string(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn journal(id: i64, mood: Mood) -> JournalEntry {
        JournalEntry {
            id,
            user: None,
            title: format!("Entry {}", id),
            content: "Body".to_string(),
            mood: Some(mood),
            tags: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn booking(id: i64, status: BookingStatus) -> Booking {
        Booking {
            id,
            user: User {
                id: 1,
                ..User::default()
            },
            therapist: Therapist {
                id: 2,
                ..Therapist::default()
            },
            session_date: now() + chrono::Duration::days(1),
            status,
            notes: None,
            session_type: Some(SessionKind::Online),
            duration: 60,
            created_at: None,
        }
    }

    #[test]
    fn test_login_event_stores_session_and_loads_dashboard() {
        let mut s = state();
        let actions = handle_app_event(&mut s, AppEvent::LoggedIn(payload("user", 1)));
        assert!(s.session.is_authenticated());
        assert_eq!(s.screen, Screen::Dashboard(DashboardVariant::EndUser));
        assert!(matches!(actions[0], Action::SetIdentity(Some(_))));
        assert!(matches!(
            actions[1],
            Action::Load(_, Screen::Dashboard(DashboardVariant::EndUser))
        ));
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut s = state();
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("user", 1)));
        let Action::Load(old, _) = s.navigate(Route::Journals) else {
            panic!("expected a load");
        };
        let _ = s.navigate(Route::Motivation);

        handle_app_event(
            &mut s,
            AppEvent::Loaded(old, Loaded::Journals(vec![journal(1, Mood::Happy)])),
        );
        assert!(s.journals.entries().is_empty());

        handle_app_event(&mut s, AppEvent::Error(Some(old), "boom".to_string()));
        assert!(s.error.is_none());

        handle_app_event(&mut s, AppEvent::Error(None, "boom".to_string()));
        assert_eq!(s.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_journals_changed_lands_on_list() {
        let mut s = state();
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("user", 1)));
        let _ = s.navigate(Route::JournalNew);
        assert!(s.form.is_some());

        handle_app_event(
            &mut s,
            AppEvent::JournalsChanged((LoginKind::User, 1), vec![journal(3, Mood::Happy)]),
        );
        assert_eq!(s.screen, Screen::JournalList);
        assert!(s.form.is_none());
        assert!(!s.loading);
        assert_eq!(s.journals.visible().len(), 1);
    }

    #[test]
    fn test_booking_update_patches_therapist_dashboard() {
        let mut s = state();
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("therapist", 2)));
        s.dashboard = Some(Dashboard::Therapist(TherapistDashboard::from_parts(
            vec![booking(7, BookingStatus::Scheduled)],
            now(),
        )));

        handle_app_event(
            &mut s,
            AppEvent::BookingUpdated((LoginKind::Therapist, 2), booking(7, BookingStatus::Completed)),
        );
        let Some(Dashboard::Therapist(d)) = &s.dashboard else {
            panic!("dashboard missing");
        };
        assert_eq!(d.upcoming_count, 0);
        assert_eq!(d.completed_count, 1);
    }

    #[tokio::test]
    async fn test_journal_keys() {
        let (tx, _rx) = mpsc::channel(8);
        let mut s = state();
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("user", 1)));
        let Action::Load(seq, _) = s.navigate(Route::Journals) else {
            panic!("expected a load");
        };
        handle_app_event(
            &mut s,
            AppEvent::Loaded(
                seq,
                Loaded::Journals(vec![journal(1, Mood::Happy), journal(2, Mood::Sad)]),
            ),
        );

        handle_key_event(key(KeyCode::Char('f')), &mut s, &tx).await;
        assert_eq!(s.journals.filter, Filter::Only(Mood::Happy));
        assert_eq!(s.journals.visible().len(), 1);

        assert!(handle_key_event(key(KeyCode::Char('d')), &mut s, &tx).await.is_none());
        assert_eq!(s.mode, InputMode::ConfirmDelete(1));
        let action = handle_key_event(key(KeyCode::Char('y')), &mut s, &tx).await;
        assert!(matches!(action, Some(Action::DeleteJournal(1))));

        let action = handle_key_event(key(KeyCode::Char('e')), &mut s, &tx).await;
        assert!(matches!(action, Some(Action::Load(_, Screen::JournalForm(Some(1))))));
    }

    #[tokio::test]
    async fn test_invalid_form_shows_error_without_request() {
        let (tx, _rx) = mpsc::channel(8);
        let mut s = state();
        assert_eq!(s.mode, InputMode::Normal);
        let _ = s.navigate(Route::Login);
        assert_eq!(s.mode, InputMode::Editing);

        let action = handle_key_event(key(KeyCode::Enter), &mut s, &tx).await;
        assert!(action.is_none());
        assert!(s.error.is_some());
    }

    #[tokio::test]
    async fn test_user_cannot_complete_a_session() {
        let (tx, _rx) = mpsc::channel(8);
        let mut s = state();
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("user", 1)));
        let Action::Load(seq, _) = s.navigate(Route::Sessions) else {
            panic!("expected a load");
        };
        handle_app_event(
            &mut s,
            AppEvent::Loaded(seq, Loaded::Sessions(vec![booking(4, BookingStatus::Scheduled)])),
        );

        assert!(handle_key_event(key(KeyCode::Char('c')), &mut s, &tx).await.is_none());
        assert!(s.error.is_some());
        let action = handle_key_event(key(KeyCode::Char('x')), &mut s, &tx).await;
        assert!(matches!(
            action,
            Some(Action::UpdateBooking(_, BookingAction::Cancel))
        ));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut s = state();
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("user", 1)));
        let _ = s.navigate(Route::Profile);

        let action = handle_key_event(key(KeyCode::Char('O')), &mut s, &tx).await;
        assert!(matches!(action, Some(Action::Load(_, Screen::Login))));
        assert!(matches!(rx.recv().await, Some(Action::SetIdentity(None))));
        assert!(!s.session.is_authenticated());
        assert!(s.form.is_some());
    }

    #[tokio::test]
    async fn test_results_after_logout_are_dropped() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut s = state();
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("user", 1)));
        let _ = s.navigate(Route::JournalNew);

        // Signed out while the save was still in flight.
        let _ = handle_key_event(key(KeyCode::Esc), &mut s, &tx).await;
        let _ = handle_key_event(key(KeyCode::Char('O')), &mut s, &tx).await;
        assert!(matches!(rx.recv().await, Some(Action::SetIdentity(None))));

        let follow_up = handle_app_event(
            &mut s,
            AppEvent::JournalsChanged((LoginKind::User, 1), vec![journal(3, Mood::Happy)]),
        );
        assert!(follow_up.is_empty());
        assert_eq!(s.screen, Screen::Login);
        assert!(s.journals.entries().is_empty());

        handle_app_event(
            &mut s,
            AppEvent::BookingUpdated((LoginKind::User, 1), booking(4, BookingStatus::Cancelled)),
        );
        assert!(s.sessions.bookings().is_empty());
    }

    #[test]
    fn test_results_for_another_account_are_dropped() {
        let mut s = state();
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("therapist", 1)));
        // Same id, different table.
        handle_app_event(
            &mut s,
            AppEvent::JournalsChanged((LoginKind::User, 1), vec![journal(3, Mood::Happy)]),
        );
        assert!(s.journals.entries().is_empty());
    }

    #[test]
    fn test_journals_changed_keeps_current_screen() {
        let mut s = state();
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("user", 1)));
        let _ = s.navigate(Route::Motivation);

        let follow_up = handle_app_event(
            &mut s,
            AppEvent::JournalsChanged((LoginKind::User, 1), vec![journal(3, Mood::Happy)]),
        );
        assert!(follow_up.is_empty());
        assert_eq!(s.screen, Screen::Motivation);
        assert_eq!(s.journals.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_logout_stays_signed_in() {
        let (tx, mut rx) = mpsc::channel(8);
        let ctx = Arc::new(TestContext::new());
        let mut s = AppState::new(ctx.clone(), Config::default());
        handle_app_event(&mut s, AppEvent::LoggedIn(payload("user", 1)));
        let _ = s.navigate(Route::Journals);

        let path = ctx.get_session_path().unwrap();
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let action = handle_key_event(key(KeyCode::Char('O')), &mut s, &tx).await;
        assert!(action.is_none());
        assert!(rx.try_recv().is_err());
        assert!(s.session.is_authenticated());
        assert_eq!(s.screen, Screen::JournalList);
        assert!(s.error.as_deref().is_some_and(|e| e.starts_with("Could not sign out")));
    }
}
