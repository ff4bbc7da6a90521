use crate::client::{ApiClient, ApiResult};
use crate::model::{JournalEntry, Mood, NewJournal};

pub struct Journals<'a>(pub(crate) &'a ApiClient);

impl Journals<'_> {
    /// Every entry on the server; only admins have a use for this.
    pub async fn list(&self) -> ApiResult<Vec<JournalEntry>> {
        self.0.get("/journals").await
    }

    pub async fn get(&self, id: i64) -> ApiResult<JournalEntry> {
        self.0.get(&format!("/journals/{}", id)).await
    }

    pub async fn list_for_user(&self, user_id: i64) -> ApiResult<Vec<JournalEntry>> {
        self.0.get(&format!("/journals/user/{}", user_id)).await
    }

    pub async fn list_by_mood(&self, mood: Mood) -> ApiResult<Vec<JournalEntry>> {
        let path = ApiClient::path_with_segment("/journals/mood", mood.as_wire())?;
        self.0.get(&path).await
    }

    pub async fn create(&self, entry: &NewJournal) -> ApiResult<JournalEntry> {
        self.0.post("/journals", entry).await
    }

    pub async fn update(&self, id: i64, entry: &NewJournal) -> ApiResult<JournalEntry> {
        self.0.put(&format!("/journals/{}", id), entry).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.0.delete(&format!("/journals/{}", id)).await
    }
}
