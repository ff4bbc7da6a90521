// File: ./src/model/mod.rs
pub mod booking;
pub mod display;
pub mod journal;
pub mod motivation;
pub mod therapist;
pub mod user;

pub use booking::{Booking, BookingStatus, NewBooking, SessionKind};
pub use journal::{JournalEntry, Mood, NewJournal};
pub use motivation::{ContentType, MotivationalItem};
pub use therapist::Therapist;
pub use user::{IdRef, LoginKind, RoleRef, User};
