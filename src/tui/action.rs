// Defines actions and events exchanged with the network actor.
use crate::client::auth::Credentials;
use crate::model::{Booking, JournalEntry, LoginKind, MotivationalItem, NewBooking, NewJournal, Therapist};
use crate::router::Screen;
use crate::session::{Account, AuthPayload, Identity, Owner};
use crate::views::auth::Registration;
use crate::views::bookings::BookingAction;
use crate::views::dashboard::Dashboard;
use crate::views::journals::JournalDraft;
use crate::views::profile::ProfileUpdate;

/// Screen-load sequence number. Only the latest one issued is applied.
pub type Seq = u64;

#[derive(Debug)]
pub enum Action {
    /// Who the following calls are made as; `None` after logout.
    SetIdentity(Option<Identity>),
    Login(Credentials),
    Register(Registration),
    Load(Seq, Screen),
    SaveJournal(Option<i64>, NewJournal),
    DeleteJournal(i64),
    UpdateBooking(Booking, BookingAction),
    Book(NewBooking),
    SaveProfile(ProfileUpdate),
    ToggleAvailability,
    Quit,
}

#[derive(Debug)]
pub enum Loaded {
    Dashboard(Dashboard),
    Journals(Vec<JournalEntry>),
    JournalDraft(i64, JournalDraft),
    Sessions(Vec<Booking>),
    Booking(Vec<Therapist>),
    Therapists(Vec<Therapist>),
    Motivation(Vec<MotivationalItem>),
    /// Screens that show local state only.
    Nothing,
}

#[derive(Debug)]
pub enum AppEvent {
    LoggedIn(AuthPayload),
    Registered(LoginKind),
    Loaded(Seq, Loaded),
    // Mutation results name the account that issued them.
    JournalsChanged(Owner, Vec<JournalEntry>),
    BookingUpdated(Owner, Booking),
    Booked(Owner, Booking),
    ProfileSaved(Owner, Account),
    /// A load failure carries its sequence number so stale errors can be dropped.
    Error(Option<Seq>, String),
    Status(String),
}
