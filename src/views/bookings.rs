// Session list, status actions and the booking form.
use crate::client::{ApiClient, ApiResult};
use crate::model::{Booking, BookingStatus, IdRef, NewBooking, SessionKind, Therapist};
use crate::session::{Identity, Role};
use crate::views::{Filter, ViewError, ViewResult};
use chrono::{Duration, NaiveDateTime, Timelike};
use std::fmt;

pub const DURATIONS: [u32; 4] = [30, 45, 60, 90];
pub const MIN_LEAD_MINUTES: i64 = 60;
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    Complete,
    NoShow,
    Cancel,
}

impl BookingAction {
    pub fn target(&self) -> BookingStatus {
        match self {
            BookingAction::Complete => BookingStatus::Completed,
            BookingAction::NoShow => BookingStatus::NoShow,
            BookingAction::Cancel => BookingStatus::Cancelled,
        }
    }

    pub fn key(&self) -> char {
        match self {
            BookingAction::Complete => 'c',
            BookingAction::NoShow => 'n',
            BookingAction::Cancel => 'x',
        }
    }
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingAction::Complete => write!(f, "Complete"),
            BookingAction::NoShow => write!(f, "No Show"),
            BookingAction::Cancel => write!(f, "Cancel"),
        }
    }
}

/// What the signed-in account may do to `booking`. Only scheduled sessions move.
pub fn actions_for(identity: &Identity, booking: &Booking) -> Vec<BookingAction> {
    if booking.status != BookingStatus::Scheduled {
        return Vec::new();
    }
    match identity.role {
        Role::Therapist if booking.therapist.id == identity.user_id() => vec![
            BookingAction::Complete,
            BookingAction::NoShow,
            BookingAction::Cancel,
        ],
        Role::EndUser | Role::Admin if booking.user.id == identity.user_id() => {
            vec![BookingAction::Cancel]
        }
        _ => Vec::new(),
    }
}

/// Sends the status change and returns the server's copy of the booking.
pub async fn apply_action(
    api: &ApiClient,
    identity: &Identity,
    booking: &Booking,
    action: BookingAction,
) -> ViewResult<Booking> {
    if !actions_for(identity, booking).contains(&action)
        || !booking.status.can_transition_to(action.target())
    {
        return Err(ViewError::NotAllowed);
    }
    Ok(api
        .bookings()
        .update_status(booking.id, action.target())
        .await?)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionList {
    bookings: Vec<Booking>,
    pub filter: Filter<BookingStatus>,
}

impl SessionList {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            filter: Filter::All,
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Replaces the fetched set, keeping the current filter.
    pub fn replace(&mut self, bookings: Vec<Booking>) {
        self.bookings = bookings;
    }

    pub fn visible(&self) -> Vec<&Booking> {
        self.filter.apply(&self.bookings, |b| Some(b.status))
    }

    /// Replaces the local copy with the one the server returned.
    pub fn patch(&mut self, updated: Booking) {
        if let Some(slot) = self.bookings.iter_mut().find(|b| b.id == updated.id) {
            *slot = updated;
        }
    }

    /// Therapists see the sessions booked with them, everyone else their own.
    pub async fn fetch(api: &ApiClient, identity: &Identity) -> ApiResult<Vec<Booking>> {
        let bookings = api.bookings();
        match identity.role {
            Role::Therapist => bookings.list_for_therapist(identity.user_id()).await,
            Role::EndUser | Role::Admin => bookings.list_for_user(identity.user_id()).await,
        }
    }
}

/// First slot offered by the form: a whole hour at least the minimum lead time away.
pub fn default_start(now: NaiveDateTime) -> NaiveDateTime {
    let later = now + Duration::minutes(MIN_LEAD_MINUTES) + Duration::hours(1);
    later
        .with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(later)
}

pub fn parse_start(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();
    NaiveDateTime::parse_from_str(s, DATE_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub therapist_id: Option<i64>,
    /// `YYYY-MM-DD HH:MM`, local time.
    pub start: String,
    pub kind: SessionKind,
    pub duration: u32,
    pub notes: String,
}

impl BookingDraft {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            therapist_id: None,
            start: default_start(now).format(DATE_INPUT_FORMAT).to_string(),
            kind: SessionKind::Online,
            duration: 60,
            notes: String::new(),
        }
    }

    pub fn next_duration(&mut self) {
        let idx = DURATIONS.iter().position(|d| *d == self.duration);
        self.duration = DURATIONS[idx.map_or(0, |i| (i + 1) % DURATIONS.len())];
    }

    pub fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            SessionKind::Online => SessionKind::InPerson,
            SessionKind::InPerson => SessionKind::Online,
        };
    }

    pub fn validate(&self, identity: &Identity, now: NaiveDateTime) -> ViewResult<NewBooking> {
        let therapist = self
            .therapist_id
            .ok_or_else(|| ViewError::Invalid("Please select a therapist".to_string()))?;
        let start = parse_start(&self.start).ok_or_else(|| {
            ViewError::Invalid("Date must look like 2025-06-01 14:30".to_string())
        })?;
        if start < now + Duration::minutes(MIN_LEAD_MINUTES) {
            return Err(ViewError::Invalid(
                "Sessions must start at least one hour from now".to_string(),
            ));
        }
        if !DURATIONS.contains(&self.duration) {
            return Err(ViewError::Invalid(format!(
                "Duration must be one of {:?} minutes",
                DURATIONS
            )));
        }
        Ok(NewBooking {
            user: IdRef::new(identity.user_id()),
            therapist: IdRef::new(therapist),
            session_date: start,
            session_type: self.kind,
            duration: self.duration,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Therapists a session can be booked with.
pub async fn bookable_therapists(api: &ApiClient) -> ApiResult<Vec<Therapist>> {
    api.therapists().available().await
}

pub async fn book(api: &ApiClient, booking: &NewBooking) -> ApiResult<Booking> {
    api.bookings().create(booking).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use crate::session::AuthPayload;
    use chrono::NaiveDate;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(10, 20, 0)
            .unwrap()
    }

    fn who(user_type: &str, id: i64) -> Identity {
        Identity::from_payload(&AuthPayload {
            token: "t".to_string(),
            user: json!({ "id": id }),
            user_type: user_type.to_string(),
        })
        .unwrap()
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
            session_date: now(),
            status,
            notes: None,
            session_type: Some(SessionKind::Online),
            duration: 60,
            created_at: None,
        }
    }

    #[test]
    fn test_actions_by_role() {
        let scheduled = booking(1, BookingStatus::Scheduled);
        assert_eq!(actions_for(&who("therapist", 2), &scheduled).len(), 3);
        assert_eq!(
            actions_for(&who("user", 1), &scheduled),
            vec![BookingAction::Cancel]
        );
        // Not the owner, not the assigned therapist.
        assert!(actions_for(&who("user", 5), &scheduled).is_empty());
        assert!(actions_for(&who("therapist", 9), &scheduled).is_empty());

        for status in BookingStatus::iter().filter(|s| s.is_terminal()) {
            assert!(actions_for(&who("therapist", 2), &booking(1, status)).is_empty());
        }
    }

    #[test]
    fn test_status_filter_and_patch() {
        let mut list = SessionList::new(vec![
            booking(1, BookingStatus::Scheduled),
            booking(2, BookingStatus::Completed),
        ]);
        list.filter = Filter::Only(BookingStatus::Scheduled);
        assert_eq!(list.visible().len(), 1);

        list.patch(booking(1, BookingStatus::Cancelled));
        assert!(list.visible().is_empty());
        assert_eq!(list.bookings()[0].status, BookingStatus::Cancelled);
    }

    #[test]
    fn test_default_start_respects_lead_time() {
        let start = default_start(now());
        assert_eq!(start.format(DATE_INPUT_FORMAT).to_string(), "2025-06-01 12:00");
        assert!(start >= now() + Duration::minutes(MIN_LEAD_MINUTES));
    }

    #[test]
    fn test_booking_validation() {
        let me = who("user", 1);
        let mut draft = BookingDraft::new(now());
        assert!(draft.validate(&me, now()).is_err());

        draft.therapist_id = Some(2);
        let body = draft.validate(&me, now()).unwrap();
        assert_eq!(body.duration, 60);
        assert_eq!(body.therapist, IdRef::new(2));

        draft.start = "2025-06-01 11:00".to_string();
        assert!(draft.validate(&me, now()).is_err());

        draft.start = "tomorrow".to_string();
        assert!(draft.validate(&me, now()).is_err());
    }

    #[test]
    fn test_duration_and_kind_cycle() {
        let mut draft = BookingDraft::new(now());
        draft.next_duration();
        assert_eq!(draft.duration, 90);
        draft.next_duration();
        assert_eq!(draft.duration, 30);
        draft.toggle_kind();
        assert_eq!(draft.kind, SessionKind::InPerson);
    }
}
