/// Integration tests for the Huddle API
///
/// These tests verify the full system works end-to-end:
/// - Registration, login, and the authenticated profile
/// - Team creation and enrollment via the shared code
/// - Member listings driven by token claims
/// - Note CRUD
/// - Error shapes (status codes and JSON error bodies)
///
/// All tests need a reachable PostgreSQL instance (DATABASE_URL or the
/// default test URL) and run under `cargo test -- --ignored`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use huddle_shared::auth::jwt;
use huddle_shared::models::membership::TeamRole;
use serde_json::json;
use tower::Service as _;
use uuid::Uuid;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_health_check() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert!(body["version"].is_string());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_register_and_login_round_trip() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("round-trip");

    let body = common::register_user(&ctx, "Ada Lovelace", &email, "correct horse").await;

    assert_eq!(body["user"]["fullName"], "Ada Lovelace");
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"]["teamId"].is_null());

    // The issued token validates and carries the account's claims
    let token = body["token"].as_str().unwrap();
    let claims = jwt::validate_token(token, common::TEST_JWT_SECRET).unwrap();
    assert_eq!(claims.sub.to_string(), body["user"]["id"].as_str().unwrap());
    assert_eq!(claims.email, email);
    assert!(claims.team_id.is_none());

    let (status, body) = ctx
        .post(
            "/users/login",
            json!({"email": email, "password": "correct horse"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], email);
    assert!(body["user"]["lastLoginAt"].is_string());

    let token = body["token"].as_str().unwrap();
    jwt::validate_token(token, common::TEST_JWT_SECRET).unwrap();
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_register_duplicate_email_conflicts() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("duplicate");

    common::register_user(&ctx, "First", &email, "password-one").await;

    let (status, body) = ctx
        .post(
            "/users/register",
            json!({"fullName": "Second", "email": email, "password": "password-two"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_register_missing_field_is_validation_error() {
    let ctx = TestContext::new().await.unwrap();

    // Body deserialization rejects the missing password
    let (status, body) = ctx
        .post(
            "/users/register",
            json!({"fullName": "Ada", "email": common::unique_email("missing")}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].is_string());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_register_empty_field_is_validation_error() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post(
            "/users/register",
            json!({
                "fullName": "",
                "email": common::unique_email("empty"),
                "password": "password",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_malformed_json_body_is_bad_request_not_422() {
    let ctx = TestContext::new().await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/users/register")
        .header("content-type", "application/json")
        .body(Body::from("{not valid json"))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_login_failures_do_not_reveal_registered_emails() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("enumeration");

    common::register_user(&ctx, "Ada", &email, "right-password").await;

    let (wrong_status, wrong_body) = ctx
        .post(
            "/users/login",
            json!({"email": email, "password": "wrong-password"}),
        )
        .await;

    let (unknown_status, unknown_body) = ctx
        .post(
            "/users/login",
            json!({"email": common::unique_email("ghost"), "password": "whatever"}),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["error"], "unauthorized");
    assert_eq!(
        wrong_body["message"], unknown_body["message"],
        "wrong password and unknown email must be indistinguishable"
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_profile_requires_valid_token() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("profile");

    let body = common::register_user(&ctx, "Ada", &email, "password").await;
    let token = body["token"].as_str().unwrap();

    // No header
    let (status, body) = ctx.get("/users/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");

    // Wrong scheme
    let request = Request::builder()
        .method("GET")
        .uri("/users/profile")
        .header("authorization", format!("Token {}", token))
        .body(Body::empty())
        .unwrap();
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Valid token
    let (status, body) = ctx.get("/users/profile", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], email);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_expired_token_is_unauthorized() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("expired");

    let body = common::register_user(&ctx, "Ada", &email, "password").await;
    let user_id: Uuid = body["user"]["id"].as_str().unwrap().parse().unwrap();

    // An hour past expiry clears the default validation leeway
    let claims = jwt::Claims::with_expiration(
        user_id,
        email,
        None,
        None,
        chrono::Duration::seconds(-3600),
    );
    let stale = jwt::create_token(&claims, &ctx.config.jwt.secret).unwrap();

    let (status, body) = ctx.get("/users/profile", Some(&stale)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        body["message"].as_str().unwrap().contains("expired"),
        "message should name the expiry: {}",
        body["message"]
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_tampered_token_is_unauthorized() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("tampered");

    let body = common::register_user(&ctx, "Ada", &email, "password").await;
    let token = body["token"].as_str().unwrap();

    // Flip one character inside the claims segment
    let mut parts: Vec<String> = token.split('.').map(String::from).collect();
    let payload = &mut parts[1];
    let flipped = if payload.starts_with('A') { "B" } else { "A" };
    payload.replace_range(0..1, flipped);
    let tampered = parts.join(".");

    let (status, body) = ctx.get("/users/profile", Some(&tampered)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_create_team_generates_code_and_admin_role() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("creator");
    let team_name = common::unique_team_name("platform");

    common::register_user(&ctx, "Ada", &email, "password").await;
    let body = common::create_team(&ctx, &team_name, "Ada", &email).await;

    let code = body["team"]["teamCode"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert!(code.parse::<u32>().unwrap() >= 100_000);

    assert_eq!(body["team"]["teamName"], team_name);
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["teamCode"], code);

    // The fresh token carries the new team's claims
    let token = body["token"].as_str().unwrap();
    let claims = jwt::validate_token(token, common::TEST_JWT_SECRET).unwrap();
    assert_eq!(
        claims.team_id.unwrap().to_string(),
        body["team"]["id"].as_str().unwrap()
    );
    assert_eq!(claims.role, Some(TeamRole::Admin));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_create_team_honors_supplied_code_once() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("supplied-code");
    let code = format!("9{}", &Uuid::new_v4().as_u128().to_string()[..5]);

    common::register_user(&ctx, "Ada", &email, "password").await;

    let (status, body) = ctx
        .post(
            "/teams/create-team",
            json!({
                "teamName": common::unique_team_name("first"),
                "userName": "Ada",
                "email": email,
                "teamCode": code,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["team"]["teamCode"], code.as_str());

    // The same code a second time violates the unique constraint
    let (status, body) = ctx
        .post(
            "/teams/create-team",
            json!({
                "teamName": common::unique_team_name("second"),
                "userName": "Ada",
                "email": email,
                "teamCode": code,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_create_team_requires_registered_creator() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post(
            "/teams/create-team",
            json!({
                "teamName": common::unique_team_name("orphan"),
                "userName": "Nobody",
                "email": common::unique_email("unregistered"),
            }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_join_team_and_list_members() {
    let ctx = TestContext::new().await.unwrap();
    let creator_email = common::unique_email("creator");
    let joiner_email = common::unique_email("joiner");
    let team_name = common::unique_team_name("joinable");

    common::register_user(&ctx, "Ada", &creator_email, "password").await;
    common::register_user(&ctx, "Grace", &joiner_email, "password").await;

    let created = common::create_team(&ctx, &team_name, "Ada", &creator_email).await;
    let code = created["team"]["teamCode"].as_str().unwrap();

    let (status, joined) = ctx
        .post(
            "/teams/join-team",
            json!({"teamCode": code, "userName": "Grace", "email": joiner_email}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(joined["user"]["role"], "member");
    assert_eq!(joined["team"]["id"], created["team"]["id"]);

    // The joiner's token lists members, creator first
    let token = joined["token"].as_str().unwrap();
    let (status, body) = ctx.get("/teams/members", Some(token)).await;

    assert_eq!(status, StatusCode::OK);
    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["email"], creator_email);
    assert_eq!(members[0]["role"], "admin");
    assert_eq!(members[1]["email"], joiner_email);
    assert_eq!(members[1]["role"], "member");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_join_unknown_code_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("joiner");

    common::register_user(&ctx, "Grace", &email, "password").await;

    // Generated codes never lead with zero
    let (status, body) = ctx
        .post(
            "/teams/join-team",
            json!({"teamCode": "000000", "userName": "Grace", "email": email}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_join_requires_registered_email() {
    let ctx = TestContext::new().await.unwrap();
    let creator_email = common::unique_email("creator");
    let team_name = common::unique_team_name("closed");

    common::register_user(&ctx, "Ada", &creator_email, "password").await;
    let created = common::create_team(&ctx, &team_name, "Ada", &creator_email).await;
    let code = created["team"]["teamCode"].as_str().unwrap();

    let (status, body) = ctx
        .post(
            "/teams/join-team",
            json!({
                "teamCode": code,
                "userName": "Ghost",
                "email": common::unique_email("ghost"),
            }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_joining_twice_keeps_a_single_membership() {
    let ctx = TestContext::new().await.unwrap();
    let creator_email = common::unique_email("creator");
    let joiner_email = common::unique_email("rejoiner");
    let team_name = common::unique_team_name("idempotent");

    common::register_user(&ctx, "Ada", &creator_email, "password").await;
    common::register_user(&ctx, "Grace", &joiner_email, "password").await;

    let created = common::create_team(&ctx, &team_name, "Ada", &creator_email).await;
    let code = created["team"]["teamCode"].as_str().unwrap();
    let team_id: Uuid = created["team"]["id"].as_str().unwrap().parse().unwrap();

    for _ in 0..2 {
        let (status, _) = ctx
            .post(
                "/teams/join-team",
                json!({"teamCode": code, "userName": "Grace", "email": joiner_email}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE team_id = $1")
        .bind(team_id)
        .fetch_one(&ctx.db)
        .await
        .unwrap();
    assert_eq!(count, 2, "creator plus one joiner, no duplicate rows");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_members_requires_team_claims() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("teamless");

    let body = common::register_user(&ctx, "Ada", &email, "password").await;
    let token = body["token"].as_str().unwrap();

    let (status, body) = ctx.get("/teams/members", Some(token)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_team_page_is_public() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("public");
    let team_name = common::unique_team_name("showcase");

    common::register_user(&ctx, "Ada", &email, "password").await;
    common::create_team(&ctx, &team_name, "Ada", &email).await;

    let (status, body) = ctx.get(&format!("/teams/{}", team_name), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"]["teamName"], team_name);
    assert_eq!(body["members"].as_array().unwrap().len(), 1);

    let (status, body) = ctx
        .get(&format!("/teams/{}", common::unique_team_name("ghost")), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_notes_crud_lifecycle() {
    let ctx = TestContext::new().await.unwrap();
    let team_name = common::unique_team_name("notes");

    let (status, body) = ctx
        .post(
            "/notes/create",
            json!({
                "heading": "Standup",
                "text": "Moved to 10am",
                "memberName": "Ada",
                "memberEmail": "ada@example.com",
                "teamName": team_name,
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let note_id = body["note"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["note"]["heading"], "Standup");

    // A second note lands first in the team listing (newest first)
    let (_, second) = ctx
        .post(
            "/notes/create",
            json!({
                "heading": "Retro",
                "text": "Friday 3pm",
                "memberName": "Ada",
                "memberEmail": "ada@example.com",
                "teamName": team_name,
            }),
        )
        .await;
    let second_id = second["note"]["id"].as_str().unwrap();

    let (status, body) = ctx.get(&format!("/notes/team/{}", team_name), None).await;
    assert_eq!(status, StatusCode::OK);
    let notes = body["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["id"], second_id);
    assert_eq!(notes[1]["id"], note_id.as_str());

    // The global listing carries the note as well
    let (status, body) = ctx.get("/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["notes"]
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["id"] == note_id.as_str()));

    // Fetch by id
    let (status, body) = ctx.get(&format!("/notes/{}", note_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["note"]["text"], "Moved to 10am");

    // Update stamps updated_at
    let (status, body) = ctx
        .send(
            "PUT",
            &format!("/notes/{}", note_id),
            None,
            Some(json!({"heading": "Standup", "text": "Back to 9am"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["note"]["text"], "Back to 9am");
    let created_at = body["note"]["createdAt"].as_str().unwrap();
    let updated_at = body["note"]["updatedAt"].as_str().unwrap();
    assert!(updated_at >= created_at);

    // Delete returns the removed note; a second delete misses
    let (status, body) = ctx
        .send("DELETE", &format!("/notes/{}", note_id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["note"]["id"], note_id.as_str());

    let (status, body) = ctx
        .send("DELETE", &format!("/notes/{}", note_id), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = ctx.get(&format!("/notes/{}", note_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_note_create_missing_fields() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .post("/notes/create", json!({"heading": "Standup"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_note_malformed_id_is_bad_request() {
    let ctx = TestContext::new().await.unwrap();

    let (status, _) = ctx.get("/notes/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_no_password_material_in_response_bodies() {
    let ctx = TestContext::new().await.unwrap();
    let email = common::unique_email("leak-check");
    let team_name = common::unique_team_name("leak-check");

    let registered = common::register_user(&ctx, "Ada", &email, "hunter2-secret").await;
    let created = common::create_team(&ctx, &team_name, "Ada", &email).await;

    let (_, login) = ctx
        .post(
            "/users/login",
            json!({"email": email, "password": "hunter2-secret"}),
        )
        .await;

    let token = login["token"].as_str().unwrap();
    let (_, profile) = ctx.get("/users/profile", Some(token)).await;
    let (_, members) = ctx.get("/teams/members", Some(token)).await;
    let (_, page) = ctx.get(&format!("/teams/{}", team_name), None).await;

    for body in [&registered, &created, &login, &profile, &members, &page] {
        let raw = body.to_string();
        assert!(
            !raw.contains("password") && !raw.contains("argon2") && !raw.contains("hunter2"),
            "response leaks credential material: {}",
            raw
        );
    }
}
