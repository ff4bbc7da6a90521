// Journal entries and the mood scale attached to them.
use crate::model::user::IdRef;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Emotional-state tag on a journal entry.
///
/// Variant order is the order the mood picker offers them in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    VeryHappy,
    Happy,
    Excited,
    Calm,
    #[default]
    Neutral,
    Anxious,
    Stressed,
    Sad,
    VerySad,
    Angry,
}

impl Mood {
    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::VeryHappy => "😄",
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Sad => "😢",
            Mood::VerySad => "😭",
            Mood::Anxious => "😰",
            Mood::Stressed => "😫",
            Mood::Calm => "😌",
            Mood::Excited => "🤩",
            Mood::Angry => "😠",
        }
    }

    /// Indicator for an entry whose mood may be missing; unset renders as neutral.
    pub fn indicator(mood: Option<Mood>) -> &'static str {
        mood.unwrap_or_default().emoji()
    }

    /// Wire name, as used in `/journals/mood/{mood}`.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Mood::VeryHappy => "VERY_HAPPY",
            Mood::Happy => "HAPPY",
            Mood::Excited => "EXCITED",
            Mood::Calm => "CALM",
            Mood::Neutral => "NEUTRAL",
            Mood::Anxious => "ANXIOUS",
            Mood::Stressed => "STRESSED",
            Mood::Sad => "SAD",
            Mood::VerySad => "VERY_SAD",
            Mood::Angry => "ANGRY",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mood::VeryHappy => "Very Happy",
            Mood::Happy => "Happy",
            Mood::Excited => "Excited",
            Mood::Calm => "Calm",
            Mood::Neutral => "Neutral",
            Mood::Anxious => "Anxious",
            Mood::Stressed => "Stressed",
            Mood::Sad => "Sad",
            Mood::VerySad => "Very Sad",
            Mood::Angry => "Angry",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<IdRef>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    /// Comma-separated, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl JournalEntry {
    pub fn mood_indicator(&self) -> &'static str {
        Mood::indicator(self.mood)
    }

    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .map(crate::model::display::split_tags)
            .unwrap_or_default()
    }
}

/// Body for `POST /journals` and `PUT /journals/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournal {
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub tags: String,
    pub user: IdRef,
}
