use crate::client::{ApiClient, ApiResult};
use crate::model::User;
use serde::Serialize;

/// Body for `PUT /users/{id}`. Email is echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<u32>,
    pub emergency_contact: Option<String>,
}

pub struct Users<'a>(pub(crate) &'a ApiClient);

impl Users<'_> {
    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.0.get("/users").await
    }

    pub async fn get(&self, id: i64) -> ApiResult<User> {
        self.0.get(&format!("/users/{}", id)).await
    }

    pub async fn update(&self, id: i64, update: &UserUpdate) -> ApiResult<User> {
        self.0.put(&format!("/users/{}", id), update).await
    }
}
