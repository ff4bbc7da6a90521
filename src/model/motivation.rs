use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    Quote,
    Article,
    Tip,
    Exercise,
    Video,
    Audio,
}

impl ContentType {
    pub fn icon(&self) -> &'static str {
        match self {
            ContentType::Quote => "💭",
            ContentType::Article => "📖",
            ContentType::Tip => "💡",
            ContentType::Exercise => "🧘",
            ContentType::Video => "🎥",
            ContentType::Audio => "🎧",
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            ContentType::Quote => "QUOTE",
            ContentType::Article => "ARTICLE",
            ContentType::Tip => "TIP",
            ContentType::Exercise => "EXERCISE",
            ContentType::Video => "VIDEO",
            ContentType::Audio => "AUDIO",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotivationalItem {
    pub id: i64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ContentType>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl MotivationalItem {
    pub fn icon(&self) -> &'static str {
        self.kind.map(|k| k.icon()).unwrap_or("📝")
    }
}
