//! End-to-end invitation lifecycle tests against a real Postgres.
//!
//! These tests run only when TEST_DATABASE_URL is set; without it each test
//! returns early so the suite passes in environments without a database.
//! Email dispatch stays disabled so no mail leaves the test run.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use domain::models::{AccountStatus, InvitationState, ResponseDecision, Role};
use persistence::repositories::{
    AccountRepository, CandidateRepository, CheckinOutcome, InvitationRepository, NewCandidate,
};
use rams_api::app::create_app;
use rams_api::config::{AdminBootstrapConfig, Config, EmailConfig};
use rams_api::error::ApiError;
use rams_api::services::admin_bootstrap::bootstrap_admin;
use rams_api::services::auth::AuthService;
use rams_api::services::email::EmailService;
use rams_api::services::invitation::InvitationService;
use shared::jwt::SessionTokenConfig;

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("failed to connect to TEST_DATABASE_URL");

    sqlx::migrate!("../persistence/src/migrations")
        .run(&pool)
        .await
        .expect("migrations failed");

    Some(pool)
}

fn invitation_service(pool: PgPool) -> InvitationService {
    let email = EmailService::new(EmailConfig::default());
    InvitationService::new(pool, email, "http://localhost:3000")
}

async fn insert_candidate(pool: &PgPool, language: &str) -> Uuid {
    let unique = Uuid::new_v4().simple().to_string();
    let candidate = NewCandidate {
        first_name: "Amina".to_string(),
        last_name: "Hassan".to_string(),
        position: None,
        institute: Some("Chamber".to_string()),
        country: Some("EG".to_string()),
        phone_number: format!("+20{}", &unique[..10]),
        email: format!("guest-{unique}@example.org"),
        language: language.to_string(),
        institute_id: None,
    };

    CandidateRepository::new(pool.clone())
        .create(&candidate)
        .await
        .expect("insert candidate")
        .expect("candidate should not conflict")
        .candidate_id
}

#[tokio::test]
async fn issue_confirm_and_check_in() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let candidate_id = insert_candidate(&pool, "en").await;
    let event_id = Uuid::new_v4();

    let service = invitation_service(pool.clone());
    let outcome = service
        .issue(vec![candidate_id], event_id)
        .await
        .expect("issue batch");
    assert_eq!(outcome.sent.len(), 1);
    assert!(outcome.excluded.is_empty());

    let invitations = InvitationRepository::new(pool.clone());
    let invitation = invitations
        .find_by_candidate_event(candidate_id, event_id)
        .await
        .expect("query invitation")
        .expect("invitation row exists");
    assert_eq!(invitation.state().as_str(), "pending");
    assert_eq!(invitation.invitations_sent, 1);

    // Confirm via the token
    let confirmed = service
        .respond(&invitation.invitation_token, ResponseDecision::Accept, None)
        .await
        .expect("confirm succeeds");
    assert_eq!(confirmed.invitation.state(), InvitationState::Accepted);
    assert!(confirmed.invitation.responded_at.is_some());

    // Second response attempt with the same token fails: first writer wins
    let retry = service
        .respond(
            &invitation.invitation_token,
            ResponseDecision::Decline,
            None,
        )
        .await;
    assert!(matches!(retry, Err(ApiError::NotFound(_))));

    // Check-in transitions once
    let first = invitations
        .check_in(invitation.invitation_id)
        .await
        .expect("check-in query");
    assert_eq!(first, CheckinOutcome::Done);

    let second = invitations
        .check_in(invitation.invitation_id)
        .await
        .expect("check-in query");
    assert_eq!(second, CheckinOutcome::NotEligible);
}

#[tokio::test]
async fn reissue_rotates_token_and_bumps_counter() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let candidate_id = insert_candidate(&pool, "fr").await;
    let event_id = Uuid::new_v4();
    let service = invitation_service(pool.clone());
    let invitations = InvitationRepository::new(pool.clone());

    service
        .issue(vec![candidate_id], event_id)
        .await
        .expect("first issue");
    let first = invitations
        .find_by_candidate_event(candidate_id, event_id)
        .await
        .expect("query invitation")
        .expect("row after first issue");

    service
        .issue(vec![candidate_id], event_id)
        .await
        .expect("second issue");
    let second = invitations
        .find_by_candidate_event(candidate_id, event_id)
        .await
        .expect("query invitation")
        .expect("row after second issue");

    assert_eq!(second.invitation_id, first.invitation_id);
    assert_eq!(second.invitations_sent, 2);
    assert_ne!(second.invitation_token, first.invitation_token);
    assert_eq!(second.state(), InvitationState::Pending);

    // The rotated-out token no longer matches anything
    let stale = service
        .respond(&first.invitation_token, ResponseDecision::Accept, None)
        .await;
    assert!(matches!(stale, Err(ApiError::NotFound(_))));

    // The fresh token works
    let fresh = service
        .respond(&second.invitation_token, ResponseDecision::Accept, None)
        .await
        .expect("fresh token confirms");
    assert_eq!(fresh.invitation.state(), InvitationState::Accepted);
}

#[tokio::test]
async fn decline_is_terminal() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let candidate_id = insert_candidate(&pool, "ar").await;
    let event_id = Uuid::new_v4();
    let service = invitation_service(pool.clone());
    let invitations = InvitationRepository::new(pool.clone());

    service
        .issue(vec![candidate_id], event_id)
        .await
        .expect("issue");
    let invitation = invitations
        .find_by_candidate_event(candidate_id, event_id)
        .await
        .expect("query invitation")
        .expect("row");

    let declined = service
        .respond(
            &invitation.invitation_token,
            ResponseDecision::Decline,
            None,
        )
        .await
        .expect("decline succeeds");
    assert_eq!(declined.invitation.state(), InvitationState::Rejected);

    // A declined invitation can neither show a QR nor be checked in
    let qr = service.show_qr(&invitation.invitation_token, None).await;
    assert!(matches!(qr, Err(ApiError::NotFound(_))));

    let gate = invitations
        .check_in(invitation.invitation_id)
        .await
        .expect("check-in query");
    assert_eq!(gate, CheckinOutcome::NotEligible);
}

#[tokio::test]
async fn qr_view_requires_confirmation() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let candidate_id = insert_candidate(&pool, "en").await;
    let event_id = Uuid::new_v4();
    let service = invitation_service(pool.clone());
    let invitations = InvitationRepository::new(pool.clone());

    service
        .issue(vec![candidate_id], event_id)
        .await
        .expect("issue");
    let invitation = invitations
        .find_by_candidate_event(candidate_id, event_id)
        .await
        .expect("query invitation")
        .expect("row");

    // Pending: no QR
    let pending = service.show_qr(&invitation.invitation_token, None).await;
    assert!(matches!(pending, Err(ApiError::NotFound(_))));

    service
        .respond(&invitation.invitation_token, ResponseDecision::Accept, None)
        .await
        .expect("confirm");

    // Accepted: QR resolves, and keeps resolving after check-in
    let view = service
        .show_qr(&invitation.invitation_token, None)
        .await
        .expect("QR after confirm");
    assert_eq!(view.invitation_id, invitation.invitation_id);

    invitations
        .check_in(invitation.invitation_id)
        .await
        .expect("check in");

    let after = service
        .show_qr(&invitation.invitation_token, Some("fr"))
        .await
        .expect("QR after check-in");
    assert_eq!(after.lang.as_str(), "fr");
}

#[tokio::test]
async fn batch_excludes_unknown_candidates() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let known = insert_candidate(&pool, "en").await;
    let unknown = Uuid::new_v4();
    let event_id = Uuid::new_v4();

    let outcome = invitation_service(pool.clone())
        .issue(vec![known, unknown], event_id)
        .await
        .expect("batch completes");

    assert_eq!(outcome.sent.len(), 1);
    assert_eq!(outcome.excluded, vec![unknown]);
}

#[tokio::test]
async fn suspended_registerer_round_trip() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let accounts = AccountRepository::new(pool.clone());
    let username = format!("gate-{}", Uuid::new_v4().simple());
    let hash = shared::password::hash_password("correct horse battery").expect("hash");

    let account = accounts
        .create(&username, &hash, Role::Registerer)
        .await
        .expect("insert")
        .expect("username unique");
    assert_eq!(account.status(), AccountStatus::Active);

    accounts
        .set_status(account.account_id, AccountStatus::Suspended)
        .await
        .expect("suspend");
    let reloaded = accounts
        .find_by_id(account.account_id)
        .await
        .expect("reload")
        .expect("still present");
    assert_eq!(reloaded.status(), AccountStatus::Suspended);

    accounts
        .set_status(account.account_id, AccountStatus::Active)
        .await
        .expect("reactivate");
    let reloaded = accounts
        .find_by_id(account.account_id)
        .await
        .expect("reload")
        .expect("still present");
    assert!(reloaded.is_active());

    let deleted = accounts
        .delete_registerer(account.account_id)
        .await
        .expect("delete");
    assert!(deleted);
}

async fn authed_get(app: &Router, uri: &str, token: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("router call");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[tokio::test]
async fn role_gates_reject_non_admin_and_suspended() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let config = Config::load_for_test(&[]).expect("test config");
    let session_tokens = Arc::new(SessionTokenConfig::with_leeway(
        &config.auth.jwt_secret,
        config.auth.session_ttl_secs,
        config.auth.leeway_secs,
    ));
    let auth = AuthService::new(pool.clone(), session_tokens);
    let app = create_app(config, pool.clone());

    let username = format!("gatekeeper-{}", Uuid::new_v4().simple());
    let account = auth
        .create_account(&username, "correct horse battery", Role::Registerer)
        .await
        .expect("create registerer");

    let token = auth
        .login(&username, "correct horse battery")
        .await
        .expect("login")
        .token;

    // A registerer token never opens an admin route.
    let (status, body) = authed_get(&app, "/api/auth/registerers", &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    // An active registerer passes the check-in gate (the invitation itself
    // may be missing, but the gate lets the request through).
    let uri = format!("/api/checkin/{}", Uuid::new_v4());
    let (status, _) = authed_get(&app, &uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Suspension takes effect on the very next request, with the token
    // still otherwise valid.
    AccountRepository::new(pool.clone())
        .set_status(account.account_id, AccountStatus::Suspended)
        .await
        .expect("suspend");

    let (status, body) = authed_get(&app, &uri, &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "account_suspended");

    // Suspension does not block login itself; the gates do the refusing.
    let relogin = auth.login(&username, "correct horse battery").await;
    assert!(relogin.is_ok());
}

#[tokio::test]
async fn admin_bootstrap_is_idempotent() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let username = format!("root-{}", Uuid::new_v4().simple());
    let config = AdminBootstrapConfig {
        bootstrap_username: username,
        bootstrap_password: "bootstrap pw".to_string(),
    };
    bootstrap_admin(&pool, &config).await.expect("bootstrap");

    let admin_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE role = 'admin')")
            .fetch_one(&pool)
            .await
            .expect("query admins");
    assert!(admin_exists);

    // With an admin present, later bootstraps leave the store untouched.
    let late_username = format!("root-{}", Uuid::new_v4().simple());
    let config = AdminBootstrapConfig {
        bootstrap_username: late_username.clone(),
        bootstrap_password: "bootstrap pw".to_string(),
    };
    bootstrap_admin(&pool, &config).await.expect("bootstrap again");

    let created: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)")
            .bind(&late_username)
            .fetch_one(&pool)
            .await
            .expect("query late username");
    assert!(!created);

    // Unconfigured bootstrap is a no-op.
    bootstrap_admin(&pool, &AdminBootstrapConfig::default())
        .await
        .expect("unconfigured bootstrap");
}
