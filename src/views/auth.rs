// Login and registration forms.
use crate::client::auth::{Credentials, NewTherapist, NewUser};
use crate::client::{ApiClient, ApiResult};
use crate::model::LoginKind;
use crate::session::AuthPayload;
use crate::views::{ViewError, ViewResult, non_empty, optional_number};

fn check_email(email: &str) -> ViewResult<String> {
    let e = email.trim();
    if e.is_empty() {
        return Err(ViewError::Required("Email"));
    }
    if !e.contains('@') {
        return Err(ViewError::Invalid("Enter a valid email address".to_string()));
    }
    Ok(e.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub kind: LoginKind,
}

impl LoginForm {
    pub fn new(kind: LoginKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ViewResult<Credentials> {
        let email = check_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ViewError::Required("Password"));
        }
        Ok(Credentials {
            email,
            password: self.password.clone(),
            user_type: self.kind,
        })
    }
}

pub async fn login(api: &ApiClient, credentials: &Credentials) -> ApiResult<AuthPayload> {
    api.auth().login(credentials).await
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterDraft {
    pub kind: LoginKind,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub age: String,
    pub emergency_contact: String,
    pub specialization: String,
    pub qualification: String,
    pub experience: String,
    pub bio: String,
}

#[derive(Debug, Clone)]
pub enum Registration {
    User(NewUser),
    Therapist(NewTherapist),
}

impl RegisterDraft {
    pub fn validate(&self) -> ViewResult<Registration> {
        let first_name = non_empty(&self.first_name).ok_or(ViewError::Required("First name"))?;
        let last_name = non_empty(&self.last_name).ok_or(ViewError::Required("Last name"))?;
        let email = check_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ViewError::Required("Password"));
        }
        if self.password != self.confirm_password {
            return Err(ViewError::Invalid("Passwords do not match".to_string()));
        }
        let password = self.password.clone();

        Ok(match self.kind {
            LoginKind::User => Registration::User(NewUser {
                first_name,
                last_name,
                email,
                password,
                phone: non_empty(&self.phone),
                age: optional_number(&self.age, "Age")?,
                emergency_contact: non_empty(&self.emergency_contact),
            }),
            LoginKind::Therapist => Registration::Therapist(NewTherapist {
                first_name,
                last_name,
                email,
                password,
                specialization: non_empty(&self.specialization),
                qualification: non_empty(&self.qualification),
                experience: optional_number(&self.experience, "Experience")?,
                phone: non_empty(&self.phone),
                bio: non_empty(&self.bio),
            }),
        })
    }
}

/// Creates the account. The caller still has to log in afterwards.
pub async fn register(api: &ApiClient, registration: &Registration) -> ApiResult<()> {
    match registration {
        Registration::User(u) => {
            api.auth().register_user(u).await?;
        }
        Registration::Therapist(t) => {
            api.auth().register_therapist(t).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        let mut form = LoginForm::new(LoginKind::Therapist);
        assert!(matches!(form.validate(), Err(ViewError::Required("Email"))));
        form.email = "not-an-email".to_string();
        assert!(matches!(form.validate(), Err(ViewError::Invalid(_))));
        form.email = " dr@example.org ".to_string();
        assert!(matches!(form.validate(), Err(ViewError::Required("Password"))));
        form.password = "secret".to_string();

        let creds = form.validate().unwrap();
        assert_eq!(creds.email, "dr@example.org");
        let body = serde_json::to_value(&creds).unwrap();
        assert_eq!(body["userType"], "therapist");
    }

    #[test]
    fn test_register_picks_body_by_kind() {
        let mut draft = RegisterDraft {
            first_name: "Lee".to_string(),
            last_name: "Park".to_string(),
            email: "lee@example.org".to_string(),
            password: "pw".to_string(),
            confirm_password: "pw".to_string(),
            age: "31".to_string(),
            specialization: "Grief".to_string(),
            ..RegisterDraft::default()
        };
        match draft.validate().unwrap() {
            Registration::User(u) => assert_eq!(u.age, Some(31)),
            Registration::Therapist(_) => panic!("expected a user"),
        }

        draft.kind = LoginKind::Therapist;
        match draft.validate().unwrap() {
            Registration::Therapist(t) => {
                assert_eq!(t.specialization.as_deref(), Some("Grief"));
                let body = serde_json::to_value(&t).unwrap();
                assert!(body.get("age").is_none());
            }
            Registration::User(_) => panic!("expected a therapist"),
        }

        draft.confirm_password = "other".to_string();
        assert!(draft.validate().is_err());
    }
}
