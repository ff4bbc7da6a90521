// Manages background network operations for the TUI.
use crate::client::{ApiClient, ApiError, ApiResult};
use crate::router::Screen;
use crate::session::Identity;
use crate::tui::action::{Action, AppEvent, Loaded, Seq};
use crate::views::bookings::{self, SessionList};
use crate::views::dashboard::Dashboard;
use crate::views::journals::{self, JournalList};
use crate::views::motivation::MotivationBoard;
use crate::views::therapists::TherapistDirectory;
use crate::views::{auth, profile};
use tokio::sync::mpsc::{Receiver, Sender};

struct Actor {
    api: ApiClient,
    authed: Option<(ApiClient, Identity)>,
    recent_items: usize,
    event_tx: Sender<AppEvent>,
}

impl Actor {
    fn signed_in(&self) -> ApiResult<(&ApiClient, &Identity)> {
        self.authed
            .as_ref()
            .map(|(api, who)| (api, who))
            .ok_or(ApiError::MissingIdentity)
    }

    async fn emit(&self, event: AppEvent) {
        let _ = self.event_tx.send(event).await;
    }

    async fn fail(&self, seq: Option<Seq>, message: String) {
        self.emit(AppEvent::Error(seq, message)).await;
    }

    async fn load(&self, screen: Screen) -> ApiResult<Loaded> {
        if matches!(screen, Screen::Login | Screen::Register | Screen::Profile) {
            return Ok(Loaded::Nothing);
        }
        let (api, who) = self.signed_in()?;
        let now = chrono::Local::now().naive_local();
        Ok(match screen {
            Screen::Dashboard(variant) => Loaded::Dashboard(
                Dashboard::load(api, who, variant, self.recent_items, now).await?,
            ),
            Screen::JournalList => Loaded::Journals(JournalList::fetch(api, who).await?),
            Screen::JournalForm(Some(id)) => {
                Loaded::JournalDraft(id, journals::load_entry(api, id).await?)
            }
            Screen::SessionList => Loaded::Sessions(SessionList::fetch(api, who).await?),
            Screen::BookSession => Loaded::Booking(bookings::bookable_therapists(api).await?),
            Screen::TherapistDirectory => {
                Loaded::Therapists(TherapistDirectory::fetch(api).await?)
            }
            Screen::Motivation => Loaded::Motivation(MotivationBoard::fetch(api).await?),
            _ => Loaded::Nothing,
        })
    }

    async fn handle(&mut self, action: Action) {
        match action {
            Action::Quit => {}

            Action::SetIdentity(identity) => {
                self.authed = identity.map(|who| (self.api.authorized(&who.token), who));
            }

            Action::Login(credentials) => match auth::login(&self.api, &credentials).await {
                Ok(payload) => self.emit(AppEvent::LoggedIn(payload)).await,
                Err(e) => self.fail(None, e.user_message()).await,
            },

            Action::Register(registration) => {
                let kind = match &registration {
                    auth::Registration::User(_) => crate::model::LoginKind::User,
                    auth::Registration::Therapist(_) => crate::model::LoginKind::Therapist,
                };
                match auth::register(&self.api, &registration).await {
                    Ok(()) => self.emit(AppEvent::Registered(kind)).await,
                    Err(e) => self.fail(None, e.user_message()).await,
                }
            }

            Action::Load(seq, screen) => match self.load(screen).await {
                Ok(loaded) => self.emit(AppEvent::Loaded(seq, loaded)).await,
                Err(e) => self.fail(Some(seq), e.user_message()).await,
            },

            Action::SaveJournal(editing, body) => {
                let result = match self.signed_in() {
                    Ok((api, who)) => journals::save(api, who, editing, &body)
                        .await
                        .map(|list| (who.owner(), list)),
                    Err(e) => Err(e),
                };
                match result {
                    Ok((owner, list)) => {
                        self.emit(AppEvent::JournalsChanged(owner, list)).await;
                        self.emit(AppEvent::Status("Journal saved.".to_string())).await;
                    }
                    Err(e) => self.fail(None, e.user_message()).await,
                }
            }

            Action::DeleteJournal(id) => {
                let result = match self.signed_in() {
                    Ok((api, who)) => JournalList::delete(api, who, id)
                        .await
                        .map(|list| (who.owner(), list)),
                    Err(e) => Err(e),
                };
                match result {
                    Ok((owner, list)) => {
                        self.emit(AppEvent::JournalsChanged(owner, list)).await;
                        self.emit(AppEvent::Status("Journal deleted.".to_string())).await;
                    }
                    Err(e) => self.fail(None, e.user_message()).await,
                }
            }

            Action::UpdateBooking(booking, action) => {
                let result = match self.signed_in() {
                    Ok((api, who)) => bookings::apply_action(api, who, &booking, action)
                        .await
                        .map(|b| (who.owner(), b)),
                    Err(e) => Err(e.into()),
                };
                match result {
                    Ok((owner, updated)) => {
                        let msg = format!("Session marked {}.", updated.status);
                        self.emit(AppEvent::BookingUpdated(owner, updated)).await;
                        self.emit(AppEvent::Status(msg)).await;
                    }
                    Err(e) => self.fail(None, e.user_message()).await,
                }
            }

            Action::Book(body) => {
                let result = match self.signed_in() {
                    Ok((api, who)) => bookings::book(api, &body).await.map(|b| (who.owner(), b)),
                    Err(e) => Err(e),
                };
                match result {
                    Ok((owner, created)) => self.emit(AppEvent::Booked(owner, created)).await,
                    Err(e) => self.fail(None, e.user_message()).await,
                }
            }

            Action::SaveProfile(update) => {
                let result = match self.signed_in() {
                    Ok((api, who)) => profile::save(api, who, &update)
                        .await
                        .map(|a| (who.owner(), a)),
                    Err(e) => Err(e),
                };
                match result {
                    Ok((owner, account)) => self.emit(AppEvent::ProfileSaved(owner, account)).await,
                    Err(e) => self.fail(None, e.user_message()).await,
                }
            }

            Action::ToggleAvailability => {
                let result = match self.signed_in() {
                    Ok((api, who)) => profile::toggle_availability(api, who)
                        .await
                        .map(|a| (who.owner(), a)),
                    Err(e) => Err(e.into()),
                };
                match result {
                    Ok((owner, account)) => self.emit(AppEvent::ProfileSaved(owner, account)).await,
                    Err(e) => self.fail(None, e.user_message()).await,
                }
            }
        }
    }
}

pub async fn run_network_actor(
    api: ApiClient,
    recent_items: usize,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    let mut actor = Actor {
        api,
        authed: None,
        recent_items,
        event_tx,
    };

    while let Some(action) = action_rx.recv().await {
        if matches!(action, Action::Quit) {
            break;
        }
        actor.handle(action).await;
    }
    log::debug!("Network actor stopped");
}
