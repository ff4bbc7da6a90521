// File: tests/api_client.rs
use mindconnect::client::auth::{Credentials, NewTherapist, NewUser};
use mindconnect::client::therapists::TherapistUpdate;
use mindconnect::client::users::UserUpdate;
use mindconnect::client::{ApiClient, ApiError};
use mindconnect::model::{BookingStatus, IdRef, LoginKind, Mood, NewJournal};
use mindconnect::session::{Account, AuthPayload, Identity};
use mindconnect::views::auth::{self, Registration};
use mindconnect::views::bookings::{self, BookingAction, SessionList};
use mindconnect::views::journals;
use mindconnect::views::profile::{self, ProfileUpdate};
use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;

fn client(url: &str) -> ApiClient {
    ApiClient::new(url, Duration::from_secs(5)).unwrap()
}

fn identity(user_type: &str, id: i64) -> Identity {
    Identity::from_payload(&AuthPayload {
        token: "tok-123".to_string(),
        user: json!({ "id": id, "firstName": "Ada", "lastName": "Byron", "email": "ada@example.org" }),
        user_type: user_type.to_string(),
    })
    .unwrap()
}

fn booking_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "user": { "id": 1, "firstName": "Ada", "lastName": "Byron" },
        "therapist": { "id": 2, "firstName": "Carl", "lastName": "Rogers" },
        "sessionDate": "2030-01-15T10:00:00",
        "status": status,
        "sessionType": "online",
        "duration": 60
    })
}

#[tokio::test]
async fn test_login_posts_credentials_without_token() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("POST", "/auth/login")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "email": "ada@example.org",
            "password": "secret",
            "userType": "user"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "token": "tok-123",
                "user": { "id": 1, "firstName": "Ada", "email": "ada@example.org" },
                "userType": "user"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let api = client(&server.url());
    let payload = api
        .auth()
        .login(&Credentials {
            email: "ada@example.org".to_string(),
            password: "secret".to_string(),
            user_type: LoginKind::User,
        })
        .await
        .unwrap();

    m.assert_async().await;
    assert_eq!(payload.token, "tok-123");
    let who = Identity::from_payload(&payload).unwrap();
    assert_eq!(who.user_id(), 1);
}

#[tokio::test]
async fn test_protected_calls_carry_bearer_and_public_ones_do_not() {
    let mut server = Server::new_async().await;
    let m_private = server
        .mock("GET", "/journals/user/1")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let m_public = server
        .mock("GET", "/motivations/active")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let api = client(&server.url()).authorized("tok-123");
    assert!(api.journals().list_for_user(1).await.unwrap().is_empty());
    assert!(api.motivations().active().await.unwrap().is_empty());

    m_private.assert_async().await;
    m_public.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_keep_status_and_message() {
    let mut server = Server::new_async().await;
    let _m_login = server
        .mock("POST", "/auth/login")
        .with_status(400)
        .with_body("Invalid credentials")
        .create_async()
        .await;
    let _m_users = server
        .mock("GET", "/users")
        .with_status(401)
        .with_body("")
        .create_async()
        .await;

    let api = client(&server.url());
    let err = api
        .auth()
        .login(&Credentials {
            email: "ada@example.org".to_string(),
            password: "wrong".to_string(),
            user_type: LoginKind::User,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 400, .. }));
    assert_eq!(err.user_message(), "Invalid credentials");

    let err = api.authorized("stale").users().list().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Request failed (401)");
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/therapists/available")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client(&server.url())
        .therapists()
        .available()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_created_journal_appears_once_after_refetch() {
    let mut server = Server::new_async().await;
    let entry = json!({
        "id": 10,
        "title": "Morning walk",
        "content": "Felt lighter afterwards",
        "mood": "HAPPY",
        "tags": "outside, exercise",
        "createdAt": "2030-01-01T08:00:00"
    });
    let m_create = server
        .mock("POST", "/journals")
        .match_header("authorization", "Bearer tok-123")
        .match_body(Matcher::PartialJson(json!({
            "title": "Morning walk",
            "mood": "HAPPY",
            "user": { "id": 1 }
        })))
        .with_status(200)
        .with_body(entry.to_string())
        .expect(1)
        .create_async()
        .await;
    let m_list = server
        .mock("GET", "/journals/user/1")
        .with_status(200)
        .with_body(json!([entry]).to_string())
        .expect(1)
        .create_async()
        .await;

    let who = identity("user", 1);
    let api = client(&server.url()).authorized(&who.token);
    let body = NewJournal {
        title: "Morning walk".to_string(),
        content: "Felt lighter afterwards".to_string(),
        mood: Mood::Happy,
        tags: "outside, exercise".to_string(),
        user: IdRef::new(1),
    };
    let list = journals::save(&api, &who, None, &body).await.unwrap();

    m_create.assert_async().await;
    m_list.assert_async().await;
    assert_eq!(list.iter().filter(|j| j.id == 10).count(), 1);
    assert_eq!(list[0].tag_list(), vec!["outside", "exercise"]);
}

#[tokio::test]
async fn test_status_change_is_patched_from_server_copy() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("PUT", "/sessions/5/status")
        .match_body(Matcher::Json(json!("COMPLETED")))
        .with_status(200)
        .with_body(booking_json(5, "COMPLETED").to_string())
        .expect(1)
        .create_async()
        .await;

    let therapist = identity("therapist", 2);
    let api = client(&server.url()).authorized(&therapist.token);
    let scheduled: mindconnect::model::Booking =
        serde_json::from_value(booking_json(5, "SCHEDULED")).unwrap();
    let mut list = SessionList::new(vec![scheduled.clone()]);

    let updated = bookings::apply_action(&api, &therapist, &scheduled, BookingAction::Complete)
        .await
        .unwrap();
    list.patch(updated);

    m.assert_async().await;
    assert_eq!(list.bookings()[0].status, BookingStatus::Completed);
}

#[tokio::test]
async fn test_disallowed_action_never_reaches_server() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    // The client owns the booking but may only cancel it.
    let user = identity("user", 1);
    let api = client(&server.url()).authorized(&user.token);
    let scheduled: mindconnect::model::Booking =
        serde_json::from_value(booking_json(5, "SCHEDULED")).unwrap();

    let result = bookings::apply_action(&api, &user, &scheduled, BookingAction::Complete).await;
    assert!(result.is_err());
    m.assert_async().await;
}

#[tokio::test]
async fn test_specialization_is_one_encoded_segment() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("GET", "/therapists/specialization/CBT%2FDBT")
        .with_status(200)
        .with_body(json!([{ "id": 2, "firstName": "Carl", "specialization": "CBT/DBT" }]).to_string())
        .expect(1)
        .create_async()
        .await;

    let found = client(&server.url())
        .authorized("tok-123")
        .therapists()
        .by_specialization("CBT/DBT")
        .await
        .unwrap();

    m.assert_async().await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].specialization_or_empty(), "CBT/DBT");
}

#[tokio::test]
async fn test_registration_uses_the_endpoint_for_each_kind() {
    let mut server = Server::new_async().await;
    let m_user = server
        .mock("POST", "/auth/register")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "firstName": "Ada",
            "lastName": "Byron",
            "email": "ada@example.org",
            "password": "secret",
            "age": 36
        })))
        .with_status(200)
        .with_body(json!({ "id": 1, "firstName": "Ada", "lastName": "Byron" }).to_string())
        .expect(1)
        .create_async()
        .await;
    let m_therapist = server
        .mock("POST", "/auth/register-therapist")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "firstName": "Carl",
            "lastName": "Rogers",
            "email": "carl@example.org",
            "password": "secret",
            "specialization": "Person-centred",
            "experience": 12
        })))
        .with_status(200)
        .with_body(json!({ "id": 2, "firstName": "Carl", "lastName": "Rogers" }).to_string())
        .expect(1)
        .create_async()
        .await;

    let api = client(&server.url());
    let user = Registration::User(NewUser {
        first_name: "Ada".to_string(),
        last_name: "Byron".to_string(),
        email: "ada@example.org".to_string(),
        password: "secret".to_string(),
        age: Some(36),
        ..NewUser::default()
    });
    let therapist = Registration::Therapist(NewTherapist {
        first_name: "Carl".to_string(),
        last_name: "Rogers".to_string(),
        email: "carl@example.org".to_string(),
        password: "secret".to_string(),
        specialization: Some("Person-centred".to_string()),
        experience: Some(12),
        ..NewTherapist::default()
    });
    auth::register(&api, &user).await.unwrap();
    auth::register(&api, &therapist).await.unwrap();

    m_user.assert_async().await;
    m_therapist.assert_async().await;
}

#[tokio::test]
async fn test_availability_toggle_sends_bare_bool() {
    let mut server = Server::new_async().await;
    let m = server
        .mock("PUT", "/therapists/2/availability")
        .match_header("authorization", "Bearer tok-123")
        .match_body(Matcher::Json(json!(false)))
        .with_status(200)
        .with_body(json!({ "id": 2, "firstName": "Carl", "available": false }).to_string())
        .expect(1)
        .create_async()
        .await;

    // No `available` in the stored record means available.
    let therapist = identity("therapist", 2);
    let api = client(&server.url()).authorized(&therapist.token);
    let account = profile::toggle_availability(&api, &therapist).await.unwrap();

    m.assert_async().await;
    let Account::Therapist(t) = account else {
        panic!("expected a therapist account");
    };
    assert!(!t.is_available());
}

#[tokio::test]
async fn test_profile_saves_put_the_whole_record() {
    let mut server = Server::new_async().await;
    let m_user = server
        .mock("PUT", "/users/1")
        .match_header("authorization", "Bearer tok-123")
        .match_body(Matcher::Json(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.org",
            "phone": null,
            "age": 36,
            "emergencyContact": null
        })))
        .with_status(200)
        .with_body(json!({ "id": 1, "firstName": "Ada", "lastName": "Lovelace", "age": 36 }).to_string())
        .expect(1)
        .create_async()
        .await;
    let m_therapist = server
        .mock("PUT", "/therapists/2")
        .match_body(Matcher::PartialJson(json!({
            "firstName": "Carl",
            "bio": "Listening first.",
            "available": true
        })))
        .with_status(200)
        .with_body(json!({ "id": 2, "firstName": "Carl", "bio": "Listening first." }).to_string())
        .expect(1)
        .create_async()
        .await;

    let api = client(&server.url()).authorized("tok-123");

    let user = identity("user", 1);
    let saved = profile::save(
        &api,
        &user,
        &ProfileUpdate::User(UserUpdate {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            phone: None,
            age: Some(36),
            emergency_contact: None,
        }),
    )
    .await
    .unwrap();
    assert_eq!(saved.last_name(), "Lovelace");

    let therapist = identity("therapist", 2);
    let saved = profile::save(
        &api,
        &therapist,
        &ProfileUpdate::Therapist(TherapistUpdate {
            first_name: "Carl".to_string(),
            last_name: "Rogers".to_string(),
            email: "carl@example.org".to_string(),
            phone: None,
            specialization: None,
            qualification: None,
            experience: None,
            bio: Some("Listening first.".to_string()),
            available: true,
        }),
    )
    .await
    .unwrap();
    assert_eq!(saved.first_name(), "Carl");

    m_user.assert_async().await;
    m_therapist.assert_async().await;
}

#[tokio::test]
async fn test_status_change_survives_refetch() {
    let mut server = Server::new_async().await;
    let m_status = server
        .mock("PUT", "/sessions/5/status")
        .match_body(Matcher::Json(json!("NO_SHOW")))
        .with_status(200)
        .with_body(booking_json(5, "NO_SHOW").to_string())
        .expect(1)
        .create_async()
        .await;

    let therapist = identity("therapist", 2);
    let api = client(&server.url()).authorized(&therapist.token);
    let scheduled: mindconnect::model::Booking =
        serde_json::from_value(booking_json(5, "SCHEDULED")).unwrap();
    bookings::apply_action(&api, &therapist, &scheduled, BookingAction::NoShow)
        .await
        .unwrap();
    m_status.assert_async().await;

    let m_list = server
        .mock("GET", "/sessions/therapist/2")
        .match_header("authorization", "Bearer tok-123")
        .with_status(200)
        .with_body(json!([booking_json(5, "NO_SHOW")]).to_string())
        .expect(1)
        .create_async()
        .await;
    let list = SessionList::new(SessionList::fetch(&api, &therapist).await.unwrap());

    m_list.assert_async().await;
    assert_eq!(list.bookings().len(), 1);
    assert_eq!(list.bookings()[0].status, BookingStatus::NoShow);
}
