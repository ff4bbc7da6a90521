use crate::client::{ApiClient, ApiResult};
use crate::model::Therapist;
use serde::Serialize;

/// Body for `PUT /therapists/{id}`. The server overwrites `available` too, so it is always sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<u32>,
    pub bio: Option<String>,
    pub available: bool,
}

pub struct Therapists<'a>(pub(crate) &'a ApiClient);

impl Therapists<'_> {
    pub async fn list(&self) -> ApiResult<Vec<Therapist>> {
        self.0.get("/therapists").await
    }

    pub async fn available(&self) -> ApiResult<Vec<Therapist>> {
        self.0.get_public("/therapists/available").await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Therapist> {
        self.0.get(&format!("/therapists/{}", id)).await
    }

    pub async fn by_specialization(&self, specialization: &str) -> ApiResult<Vec<Therapist>> {
        let path = ApiClient::path_with_segment("/therapists/specialization", specialization)?;
        self.0.get(&path).await
    }

    pub async fn update(&self, id: i64, update: &TherapistUpdate) -> ApiResult<Therapist> {
        self.0.put(&format!("/therapists/{}", id), update).await
    }

    pub async fn set_availability(&self, id: i64, available: bool) -> ApiResult<Therapist> {
        self.0
            .put(&format!("/therapists/{}/availability", id), &available)
            .await
    }
}
