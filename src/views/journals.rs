// Journal list and form. Every mutation re-fetches the owner's list.
use crate::client::{ApiClient, ApiResult};
use crate::model::{IdRef, JournalEntry, Mood, NewJournal};
use crate::session::Identity;
use crate::views::{Filter, ViewError, ViewResult};

pub const LIST_PREVIEW: usize = 150;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalList {
    entries: Vec<JournalEntry>,
    pub filter: Filter<Mood>,
}

impl JournalList {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        Self {
            entries,
            filter: Filter::All,
        }
    }

    /// Replaces the fetched set, keeping the current filter.
    pub fn replace(&mut self, entries: Vec<JournalEntry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn visible(&self) -> Vec<&JournalEntry> {
        self.filter.apply(&self.entries, |j| j.mood)
    }

    pub async fn fetch(api: &ApiClient, identity: &Identity) -> ApiResult<Vec<JournalEntry>> {
        api.journals().list_for_user(identity.user_id()).await
    }

    pub async fn delete(
        api: &ApiClient,
        identity: &Identity,
        id: i64,
    ) -> ApiResult<Vec<JournalEntry>> {
        api.journals().delete(id).await?;
        Self::fetch(api, identity).await
    }
}

/// Editable copy of a journal entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalDraft {
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub tags: String,
}

impl JournalDraft {
    pub fn from_entry(entry: &JournalEntry) -> Self {
        Self {
            title: entry.title.clone(),
            content: entry.content.clone(),
            mood: entry.mood.unwrap_or_default(),
            tags: entry.tags.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self, identity: &Identity) -> ViewResult<NewJournal> {
        if self.title.trim().is_empty() {
            return Err(ViewError::Required("Title"));
        }
        if self.content.trim().is_empty() {
            return Err(ViewError::Required("Content"));
        }
        Ok(NewJournal {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            mood: self.mood,
            tags: self.tags.trim().to_string(),
            user: IdRef::new(identity.user_id()),
        })
    }
}

pub async fn load_entry(api: &ApiClient, id: i64) -> ApiResult<JournalDraft> {
    Ok(JournalDraft::from_entry(&api.journals().get(id).await?))
}

/// Creates (`editing == None`) or updates, then returns the refreshed list.
pub async fn save(
    api: &ApiClient,
    identity: &Identity,
    editing: Option<i64>,
    entry: &NewJournal,
) -> ApiResult<Vec<JournalEntry>> {
    match editing {
        Some(id) => api.journals().update(id, entry).await?,
        None => api.journals().create(entry).await?,
    };
    JournalList::fetch(api, identity).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{AuthPayload, Identity};
    use serde_json::json;

    fn identity() -> Identity {
        Identity::from_payload(&AuthPayload {
            token: "t".to_string(),
            user: json!({"id": 12, "firstName": "Jo"}),
            user_type: "user".to_string(),
        })
        .unwrap()
    }

    fn entry(id: i64, mood: Option<Mood>) -> JournalEntry {
        JournalEntry {
            id,
            user: Some(IdRef::new(12)),
            title: format!("t{}", id),
            content: "c".to_string(),
            mood,
            tags: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_mood_filter() {
        let mut list = JournalList::new(vec![
            entry(1, Some(Mood::Happy)),
            entry(2, Some(Mood::Sad)),
            entry(3, None),
        ]);
        assert_eq!(list.visible().len(), 3);

        list.filter = Filter::Only(Mood::Happy);
        let ids: Vec<i64> = list.visible().iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1]);

        list.replace(vec![entry(4, Some(Mood::Calm))]);
        assert!(list.visible().is_empty());
        assert_eq!(list.filter, Filter::Only(Mood::Happy));
    }

    #[test]
    fn test_draft_requires_title_and_content() {
        let who = identity();
        let mut draft = JournalDraft::default();
        assert!(matches!(draft.validate(&who), Err(ViewError::Required("Title"))));

        draft.title = "Evening".to_string();
        assert!(matches!(draft.validate(&who), Err(ViewError::Required("Content"))));

        draft.content = "  Calm walk  ".to_string();
        let body = draft.validate(&who).unwrap();
        assert_eq!(body.mood, Mood::Neutral);
        assert_eq!(body.content, "Calm walk");
        assert_eq!(body.user, IdRef::new(12));
    }

    #[test]
    fn test_draft_from_entry_defaults_mood() {
        let draft = JournalDraft::from_entry(&entry(1, None));
        assert_eq!(draft.mood, Mood::Neutral);
        assert_eq!(draft.title, "t1");
    }
}
