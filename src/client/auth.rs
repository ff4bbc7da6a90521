// Login and registration. All three endpoints are called without a token.
use crate::client::{ApiClient, ApiResult};
use crate::model::{LoginKind, Therapist, User};
use crate::session::AuthPayload;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub user_type: LoginKind,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTherapist {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

pub struct Auth<'a>(pub(crate) &'a ApiClient);

impl Auth<'_> {
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<AuthPayload> {
        self.0.post_public("/auth/login", credentials).await
    }

    pub async fn register_user(&self, user: &NewUser) -> ApiResult<User> {
        self.0.post_public("/auth/register", user).await
    }

    pub async fn register_therapist(&self, therapist: &NewTherapist) -> ApiResult<Therapist> {
        self.0.post_public("/auth/register-therapist", therapist).await
    }
}
