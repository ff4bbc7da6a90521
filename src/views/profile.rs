// Profile editing for both account kinds, plus the therapist availability switch.
use crate::client::therapists::TherapistUpdate;
use crate::client::users::UserUpdate;
use crate::client::{ApiClient, ApiResult};
use crate::session::{Account, Identity};
use crate::views::{ViewError, ViewResult, non_empty, optional_number};

/// Text fields of the profile form. Fields that do not apply to the account kind are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    /// Read-only; sent back unchanged.
    pub email: String,
    pub phone: String,
    pub age: String,
    pub emergency_contact: String,
    pub specialization: String,
    pub qualification: String,
    pub experience: String,
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    User(UserUpdate),
    Therapist(TherapistUpdate),
}

impl ProfileDraft {
    pub fn from_account(account: &Account) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let num = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_default();
        match account {
            Account::Client(u) => Self {
                first_name: u.first_name.clone(),
                last_name: u.last_name.clone(),
                email: u.email.clone(),
                phone: text(&u.phone),
                age: num(u.age),
                emergency_contact: text(&u.emergency_contact),
                ..Self::default()
            },
            Account::Therapist(t) => Self {
                first_name: t.first_name.clone(),
                last_name: t.last_name.clone(),
                email: t.email.clone(),
                phone: text(&t.phone),
                specialization: text(&t.specialization),
                qualification: text(&t.qualification),
                experience: num(t.experience),
                bio: text(&t.bio),
                ..Self::default()
            },
        }
    }

    pub fn validate(&self, account: &Account) -> ViewResult<ProfileUpdate> {
        if self.first_name.trim().is_empty() {
            return Err(ViewError::Required("First name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(ViewError::Required("Last name"));
        }
        Ok(match account {
            Account::Client(u) => ProfileUpdate::User(UserUpdate {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email: u.email.clone(),
                phone: non_empty(&self.phone),
                age: optional_number(&self.age, "Age")?,
                emergency_contact: non_empty(&self.emergency_contact),
            }),
            Account::Therapist(t) => ProfileUpdate::Therapist(TherapistUpdate {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email: t.email.clone(),
                phone: non_empty(&self.phone),
                specialization: non_empty(&self.specialization),
                qualification: non_empty(&self.qualification),
                experience: optional_number(&self.experience, "Experience")?,
                bio: non_empty(&self.bio),
                available: t.is_available(),
            }),
        })
    }
}

/// Saves and returns the account as the server now has it.
pub async fn save(
    api: &ApiClient,
    identity: &Identity,
    update: &ProfileUpdate,
) -> ApiResult<Account> {
    let id = identity.user_id();
    Ok(match update {
        ProfileUpdate::User(u) => Account::Client(api.users().update(id, u).await?),
        ProfileUpdate::Therapist(t) => {
            Account::Therapist(api.therapists().update(id, t).await?)
        }
    })
}

/// Flips the therapist's availability flag.
pub async fn toggle_availability(api: &ApiClient, identity: &Identity) -> ViewResult<Account> {
    let Account::Therapist(t) = &identity.account else {
        return Err(ViewError::NotAllowed);
    };
    let updated = api
        .therapists()
        .set_availability(t.id, !t.is_available())
        .await?;
    Ok(Account::Therapist(updated))
}
