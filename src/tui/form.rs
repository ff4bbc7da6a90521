// Generic field-list form used by every editing screen, plus the per-screen builders.
use crate::model::{LoginKind, Mood, SessionKind, Therapist};
use crate::session::Account;
use crate::views::auth::{LoginForm, RegisterDraft};
use crate::views::bookings::{BookingDraft, DURATIONS};
use crate::views::journals::JournalDraft;
use crate::views::profile::ProfileDraft;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Secret,
    Choice(Vec<String>),
    ReadOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    pub choice: usize,
    /// Shown only for this account kind.
    pub only: Option<LoginKind>,
}

impl Field {
    fn text(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
            value: value.into(),
            choice: 0,
            only: None,
        }
    }

    fn secret(key: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Secret,
            ..Self::text(key, label, "")
        }
    }

    fn read_only(key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::ReadOnly,
            ..Self::text(key, label, value)
        }
    }

    fn choice(key: &'static str, label: &'static str, options: Vec<String>, selected: usize) -> Self {
        Self {
            kind: FieldKind::Choice(options),
            choice: selected,
            ..Self::text(key, label, "")
        }
    }

    fn only(mut self, kind: LoginKind) -> Self {
        self.only = Some(kind);
        self
    }

    pub fn is_editable(&self) -> bool {
        self.kind != FieldKind::ReadOnly
    }

    /// What the field shows: masked secrets, the selected option for choices.
    pub fn display(&self) -> String {
        match &self.kind {
            FieldKind::Secret => "*".repeat(self.value.chars().count()),
            FieldKind::Choice(options) => options
                .get(self.choice)
                .map(|o| format!("< {} >", o))
                .unwrap_or_default(),
            _ => self.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub title: String,
    pub fields: Vec<Field>,
    pub focus: usize,
    pub cursor: usize,
    /// Account kind for forms without a `kind` choice (profile).
    fixed_kind: Option<LoginKind>,
}

impl Form {
    fn new(title: impl Into<String>, fields: Vec<Field>, fixed_kind: Option<LoginKind>) -> Self {
        let mut form = Self {
            title: title.into(),
            fields,
            focus: 0,
            cursor: 0,
            fixed_kind,
        };
        if !form.is_active(0) {
            form.focus_next();
        }
        form.reset_cursor();
        form
    }

    fn active_kind(&self) -> Option<LoginKind> {
        match self.fields.iter().find(|f| f.key == "kind") {
            Some(f) => LoginKind::iter().nth(f.choice),
            None => self.fixed_kind,
        }
    }

    fn is_active(&self, idx: usize) -> bool {
        self.fields.get(idx).is_some_and(|f| {
            f.is_editable() && f.only.is_none_or(|k| Some(k) == self.active_kind())
        })
    }

    /// Fields currently on screen, with their index.
    pub fn visible_fields(&self) -> Vec<(usize, &Field)> {
        let kind = self.active_kind();
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.only.is_none_or(|k| Some(k) == kind))
            .collect()
    }

    fn reset_cursor(&mut self) {
        self.cursor = self
            .fields
            .get(self.focus)
            .map_or(0, |f| f.value.chars().count());
    }

    fn step(&mut self, forward: bool) {
        let n = self.fields.len();
        if n == 0 {
            return;
        }
        for _ in 0..n {
            self.focus = if forward {
                (self.focus + 1) % n
            } else {
                (self.focus + n - 1) % n
            };
            if self.is_active(self.focus) {
                break;
            }
        }
        self.reset_cursor();
    }

    pub fn focus_next(&mut self) {
        self.step(true);
    }

    pub fn focus_prev(&mut self) {
        self.step(false);
    }

    pub fn focused(&self) -> Option<&Field> {
        self.fields.get(self.focus)
    }

    fn byte_index(value: &str, char_idx: usize) -> usize {
        value
            .char_indices()
            .nth(char_idx)
            .map_or(value.len(), |(i, _)| i)
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor;
        if let Some(field) = self.fields.get_mut(self.focus)
            && matches!(field.kind, FieldKind::Text | FieldKind::Secret)
        {
            let at = Self::byte_index(&field.value, cursor);
            field.value.insert(at, c);
            self.cursor += 1;
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let cursor = self.cursor;
        if let Some(field) = self.fields.get_mut(self.focus)
            && matches!(field.kind, FieldKind::Text | FieldKind::Secret)
        {
            let at = Self::byte_index(&field.value, cursor - 1);
            field.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Left/Right: cycles a choice, otherwise moves the cursor.
    pub fn left(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if let FieldKind::Choice(options) = &field.kind {
                let n = options.len().max(1);
                field.choice = (field.choice + n - 1) % n;
            } else {
                self.cursor = self.cursor.saturating_sub(1);
            }
        }
    }

    pub fn right(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if let FieldKind::Choice(options) = &field.kind {
                let n = options.len().max(1);
                field.choice = (field.choice + 1) % n;
            } else {
                let len = field.value.chars().count();
                self.cursor = (self.cursor + 1).min(len);
            }
        }
    }

    pub fn value(&self, key: &str) -> String {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    pub fn choice(&self, key: &str) -> usize {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map_or(0, |f| f.choice)
    }
}

fn kind_field(kind: LoginKind) -> Field {
    let options = LoginKind::iter().map(|k| k.to_string()).collect();
    let selected = LoginKind::iter().position(|k| k == kind).unwrap_or(0);
    Field::choice("kind", "Account type", options, selected)
}

fn kind_from(form: &Form) -> LoginKind {
    LoginKind::iter().nth(form.choice("kind")).unwrap_or_default()
}

// --- Login / Register ---

pub fn login(kind: LoginKind) -> Form {
    Form::new(
        "Sign in",
        vec![
            kind_field(kind),
            Field::text("email", "Email", ""),
            Field::secret("password", "Password"),
        ],
        None,
    )
}

pub fn to_login(form: &Form) -> LoginForm {
    LoginForm {
        email: form.value("email"),
        password: form.value("password"),
        kind: kind_from(form),
    }
}

pub fn register(kind: LoginKind) -> Form {
    Form::new(
        "Create account",
        vec![
            kind_field(kind),
            Field::text("first_name", "First name", ""),
            Field::text("last_name", "Last name", ""),
            Field::text("email", "Email", ""),
            Field::secret("password", "Password"),
            Field::secret("confirm_password", "Confirm password"),
            Field::text("phone", "Phone", ""),
            Field::text("age", "Age", "").only(LoginKind::User),
            Field::text("emergency_contact", "Emergency contact", "").only(LoginKind::User),
            Field::text("specialization", "Specialization", "").only(LoginKind::Therapist),
            Field::text("qualification", "Qualification", "").only(LoginKind::Therapist),
            Field::text("experience", "Experience (years)", "").only(LoginKind::Therapist),
            Field::text("bio", "Bio", "").only(LoginKind::Therapist),
        ],
        None,
    )
}

pub fn to_register(form: &Form) -> RegisterDraft {
    RegisterDraft {
        kind: kind_from(form),
        first_name: form.value("first_name"),
        last_name: form.value("last_name"),
        email: form.value("email"),
        password: form.value("password"),
        confirm_password: form.value("confirm_password"),
        phone: form.value("phone"),
        age: form.value("age"),
        emergency_contact: form.value("emergency_contact"),
        specialization: form.value("specialization"),
        qualification: form.value("qualification"),
        experience: form.value("experience"),
        bio: form.value("bio"),
    }
}

// --- Journal ---

pub fn journal(draft: &JournalDraft, editing: bool) -> Form {
    let moods: Vec<Mood> = Mood::iter().collect();
    let options = moods
        .iter()
        .map(|m| format!("{} {}", m.emoji(), m))
        .collect();
    let selected = moods.iter().position(|m| *m == draft.mood).unwrap_or(0);
    let title = if editing { "Edit entry" } else { "New entry" };
    Form::new(
        title,
        vec![
            Field::text("title", "Title", draft.title.clone()),
            Field::text("content", "Content", draft.content.clone()),
            Field::choice("mood", "Mood", options, selected),
            Field::text("tags", "Tags (comma separated)", draft.tags.clone()),
        ],
        None,
    )
}

pub fn to_journal(form: &Form) -> JournalDraft {
    JournalDraft {
        title: form.value("title"),
        content: form.value("content"),
        mood: Mood::iter().nth(form.choice("mood")).unwrap_or_default(),
        tags: form.value("tags"),
    }
}

// --- Booking ---

const NO_THERAPIST: &str = "-- choose a therapist --";

/// The therapist choice starts on a placeholder unless one was preselected.
pub fn booking(draft: &BookingDraft, therapists: &[Therapist]) -> Form {
    let names = std::iter::once(NO_THERAPIST.to_string())
        .chain(therapists.iter().map(|t| {
            let specialty = t.specialization_or_empty();
            if specialty.is_empty() {
                t.display_name()
            } else {
                format!("{} ({})", t.display_name(), specialty)
            }
        }))
        .collect();
    let selected = draft
        .therapist_id
        .and_then(|id| therapists.iter().position(|t| t.id == id))
        .map_or(0, |i| i + 1);
    let kinds = SessionKind::iter().map(|k| k.to_string()).collect();
    let durations = DURATIONS.iter().map(|d| format!("{} min", d)).collect();
    let duration_idx = DURATIONS.iter().position(|d| *d == draft.duration).unwrap_or(2);
    let kind_idx = SessionKind::iter().position(|k| k == draft.kind).unwrap_or(0);
    Form::new(
        "Book a session",
        vec![
            Field::choice("therapist", "Therapist", names, selected),
            Field::text("start", "Date & time (YYYY-MM-DD HH:MM)", draft.start.clone()),
            Field::choice("session_type", "Session type", kinds, kind_idx),
            Field::choice("duration", "Duration", durations, duration_idx),
            Field::text("notes", "Notes", draft.notes.clone()),
        ],
        None,
    )
}

pub fn to_booking(form: &Form, therapists: &[Therapist]) -> BookingDraft {
    BookingDraft {
        therapist_id: form
            .choice("therapist")
            .checked_sub(1)
            .and_then(|i| therapists.get(i))
            .map(|t| t.id),
        start: form.value("start"),
        kind: SessionKind::iter()
            .nth(form.choice("session_type"))
            .unwrap_or_default(),
        duration: DURATIONS.get(form.choice("duration")).copied().unwrap_or(60),
        notes: form.value("notes"),
    }
}

// --- Profile ---

pub fn profile(account: &Account) -> Form {
    let d = ProfileDraft::from_account(account);
    let kind = match account {
        Account::Client(_) => LoginKind::User,
        Account::Therapist(_) => LoginKind::Therapist,
    };
    Form::new(
        "Edit profile",
        vec![
            Field::text("first_name", "First name", d.first_name),
            Field::text("last_name", "Last name", d.last_name),
            Field::read_only("email", "Email", d.email),
            Field::text("phone", "Phone", d.phone),
            Field::text("age", "Age", d.age).only(LoginKind::User),
            Field::text("emergency_contact", "Emergency contact", d.emergency_contact)
                .only(LoginKind::User),
            Field::text("specialization", "Specialization", d.specialization)
                .only(LoginKind::Therapist),
            Field::text("qualification", "Qualification", d.qualification)
                .only(LoginKind::Therapist),
            Field::text("experience", "Experience (years)", d.experience)
                .only(LoginKind::Therapist),
            Field::text("bio", "Bio", d.bio).only(LoginKind::Therapist),
        ],
        Some(kind),
    )
}

pub fn to_profile(form: &Form) -> ProfileDraft {
    ProfileDraft {
        first_name: form.value("first_name"),
        last_name: form.value("last_name"),
        email: form.value("email"),
        phone: form.value("phone"),
        age: form.value("age"),
        emergency_contact: form.value("emergency_contact"),
        specialization: form.value("specialization"),
        qualification: form.value("qualification"),
        experience: form.value("experience"),
        bio: form.value("bio"),
    }
}
