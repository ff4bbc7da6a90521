// Dashboard aggregates, one shape per role.
use crate::client::{ApiClient, ApiResult};
use crate::model::{Booking, BookingStatus, JournalEntry, MotivationalItem, User};
use crate::router::DashboardVariant;
use crate::session::Identity;
use chrono::NaiveDateTime;

pub const THERAPIST_UPCOMING: usize = 5;
pub const ADMIN_RECENT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDashboard {
    pub journal_count: usize,
    pub upcoming_count: usize,
    pub completed_count: usize,
    pub recent_journals: Vec<JournalEntry>,
    pub upcoming: Vec<Booking>,
    pub motivation: Option<MotivationalItem>,
}

impl UserDashboard {
    /// `journals` arrive newest first. `pick` chooses the motivation index from the list length.
    pub fn from_parts(
        journals: Vec<JournalEntry>,
        bookings: Vec<Booking>,
        motivations: Vec<MotivationalItem>,
        recent: usize,
        pick: impl FnOnce(usize) -> usize,
    ) -> Self {
        let mut upcoming: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Scheduled)
            .cloned()
            .collect();
        upcoming.sort_by_key(|b| b.session_date);
        let completed_count = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .count();

        let motivation = if motivations.is_empty() {
            None
        } else {
            let idx = pick(motivations.len()).min(motivations.len() - 1);
            motivations.into_iter().nth(idx)
        };

        Self {
            journal_count: journals.len(),
            upcoming_count: upcoming.len(),
            completed_count,
            recent_journals: journals.into_iter().take(recent).collect(),
            upcoming: upcoming.into_iter().take(recent).collect(),
            motivation,
        }
    }

    pub async fn load(api: &ApiClient, identity: &Identity, recent: usize) -> ApiResult<Self> {
        let id = identity.user_id();
        let journals = api.journals();
        let bookings = api.bookings();
        let motivations = api.motivations();
        let (j, b, m) = futures::try_join!(
            journals.list_for_user(id),
            bookings.list_for_user(id),
            motivations.active(),
        )?;
        Ok(Self::from_parts(j, b, m, recent, |n| fastrand::usize(..n)))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TherapistDashboard {
    pub total: usize,
    pub today_count: usize,
    pub upcoming_count: usize,
    pub completed_count: usize,
    pub today: Vec<Booking>,
    pub upcoming: Vec<Booking>,
    all: Vec<Booking>,
}

impl TherapistDashboard {
    pub fn from_parts(bookings: Vec<Booking>, now: NaiveDateTime) -> Self {
        let today: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.session_date.date() == now.date())
            .cloned()
            .collect();
        let mut upcoming: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Scheduled && b.session_date > now)
            .cloned()
            .collect();
        upcoming.sort_by_key(|b| b.session_date);

        Self {
            total: bookings.len(),
            today_count: today.len(),
            upcoming_count: upcoming.len(),
            completed_count: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Completed)
                .count(),
            today,
            upcoming: upcoming.into_iter().take(THERAPIST_UPCOMING).collect(),
            all: bookings,
        }
    }

    pub async fn load(api: &ApiClient, identity: &Identity, now: NaiveDateTime) -> ApiResult<Self> {
        let bookings = api
            .bookings()
            .list_for_therapist(identity.user_id())
            .await?;
        Ok(Self::from_parts(bookings, now))
    }

    /// Swaps in the server's copy of a booking after a status change and recounts.
    pub fn patched(&self, updated: Booking, now: NaiveDateTime) -> Self {
        let mut all = self.all.clone();
        for b in all.iter_mut().filter(|b| b.id == updated.id) {
            *b = updated.clone();
        }
        Self::from_parts(all, now)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminDashboard {
    pub user_count: usize,
    pub therapist_count: usize,
    pub booking_count: usize,
    pub journal_count: usize,
    pub recent_users: Vec<User>,
    pub recent_bookings: Vec<Booking>,
}

impl AdminDashboard {
    /// Lists arrive oldest first; the recent slices are the last five, newest first.
    pub fn from_parts(
        users: Vec<User>,
        therapist_count: usize,
        bookings: Vec<Booking>,
        journal_count: usize,
    ) -> Self {
        Self {
            user_count: users.len(),
            therapist_count,
            booking_count: bookings.len(),
            journal_count,
            recent_users: users.iter().rev().take(ADMIN_RECENT).cloned().collect(),
            recent_bookings: bookings.iter().rev().take(ADMIN_RECENT).cloned().collect(),
        }
    }

    pub async fn load(api: &ApiClient) -> ApiResult<Self> {
        let (users, therapists, bookings, journals) = (
            api.users(),
            api.therapists(),
            api.bookings(),
            api.journals(),
        );
        let (users, therapists, bookings, journals) = futures::try_join!(
            users.list(),
            therapists.list(),
            bookings.list(),
            journals.list(),
        )?;
        Ok(Self::from_parts(
            users,
            therapists.len(),
            bookings,
            journals.len(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dashboard {
    EndUser(UserDashboard),
    Therapist(TherapistDashboard),
    Admin(AdminDashboard),
}

impl Dashboard {
    pub async fn load(
        api: &ApiClient,
        identity: &Identity,
        variant: DashboardVariant,
        recent: usize,
        now: NaiveDateTime,
    ) -> ApiResult<Self> {
        Ok(match variant {
            DashboardVariant::EndUser => {
                Dashboard::EndUser(UserDashboard::load(api, identity, recent).await?)
            }
            DashboardVariant::Therapist => {
                Dashboard::Therapist(TherapistDashboard::load(api, identity, now).await?)
            }
            DashboardVariant::Admin => Dashboard::Admin(AdminDashboard::load(api).await?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Therapist, User};
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn booking(id: i64, when: NaiveDateTime, status: BookingStatus) -> Booking {
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
            session_date: when,
            status,
            notes: None,
            session_type: None,
            duration: 60,
            created_at: None,
        }
    }

    fn journal(id: i64) -> JournalEntry {
        JournalEntry {
            id,
            user: None,
            title: format!("Entry {}", id),
            content: String::new(),
            mood: None,
            tags: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_fresh_account_has_zero_counts() {
        let d = UserDashboard::from_parts(vec![], vec![], vec![], 3, |_| 0);
        assert_eq!(d, UserDashboard::default());
    }

    #[test]
    fn test_user_dashboard_slices() {
        let journals = (1..=5).rev().map(journal).collect();
        let bookings = vec![
            booking(1, at(10, 9), BookingStatus::Scheduled),
            booking(2, at(3, 9), BookingStatus::Scheduled),
            booking(3, at(1, 9), BookingStatus::Completed),
            booking(4, at(2, 9), BookingStatus::Cancelled),
        ];
        let d = UserDashboard::from_parts(journals, bookings, vec![], 3, |_| 0);
        assert_eq!(d.journal_count, 5);
        assert_eq!(
            d.recent_journals.iter().map(|j| j.id).collect::<Vec<_>>(),
            vec![5, 4, 3]
        );
        assert_eq!(d.upcoming_count, 2);
        assert_eq!(d.completed_count, 1);
        assert_eq!(d.upcoming[0].id, 2);
        assert!(d.motivation.is_none());
    }

    #[test]
    fn test_therapist_dashboard_counts() {
        let now = at(5, 12);
        let bookings = vec![
            booking(1, at(5, 9), BookingStatus::Completed),
            booking(2, at(5, 15), BookingStatus::Scheduled),
            booking(3, at(4, 15), BookingStatus::Scheduled),
            booking(4, at(7, 15), BookingStatus::Scheduled),
        ];
        let d = TherapistDashboard::from_parts(bookings, now);
        assert_eq!(d.total, 4);
        assert_eq!(d.today_count, 2);
        // Past scheduled sessions are not upcoming.
        assert_eq!(d.upcoming_count, 2);
        assert_eq!(d.upcoming.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(d.completed_count, 1);
    }

    #[test]
    fn test_therapist_patch_moves_out_of_upcoming() {
        let now = at(5, 12);
        let d = TherapistDashboard::from_parts(
            vec![booking(2, at(5, 15), BookingStatus::Scheduled)],
            now,
        );
        let done = booking(2, at(5, 15), BookingStatus::Completed);
        let next = d.patched(done, now);
        assert_eq!(next.upcoming_count, 0);
        assert_eq!(next.completed_count, 1);
        assert_eq!(next.today[0].status, BookingStatus::Completed);
    }

    #[test]
    fn test_admin_recent_is_last_five_reversed() {
        let users: Vec<User> = (1..=7)
            .map(|id| User {
                id,
                ..User::default()
            })
            .collect();
        let d = AdminDashboard::from_parts(users, 2, vec![], 9);
        assert_eq!(d.user_count, 7);
        assert_eq!(d.journal_count, 9);
        assert_eq!(
            d.recent_users.iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![7, 6, 5, 4, 3]
        );
        assert!(d.recent_bookings.is_empty());
    }
}
