use crate::common::{TestApp, routes};
use serde_json::json;

#[tokio::test]
async fn granting_twice_is_a_no_op_with_a_single_row() {
    let app = TestApp::spawn().await;
    let player = app.session("player@example.com");

    let body = json!({"coach_email": "coach@clubhouse.example"});
    let first = app.post(routes::COACH_GRANTS, &body, Some(&player)).await;
    assert_eq!(first.status, 200, "{}", first.text);

    let second = app.post(routes::COACH_GRANTS, &body, Some(&player)).await;
    assert_eq!(second.status, 200, "duplicate grant must not error");

    let res = app.get(routes::COACH_GRANTS, Some(&player)).await;
    assert_eq!(res.body["total"], 1);
    assert_eq!(res.body["coaches"][0]["coach_email"], "coach@clubhouse.example");
}

#[tokio::test]
async fn grant_emails_are_normalized_before_storage() {
    let app = TestApp::spawn().await;
    let player = app.session("player@example.com");

    let res = app
        .post(
            routes::COACH_GRANTS,
            &json!({"coach_email": "  Coach@ClubHouse.Example "}),
            Some(&player),
        )
        .await;
    assert_eq!(res.status, 200);

    let res = app.get(routes::COACH_GRANTS, Some(&player)).await;
    assert_eq!(res.body["coaches"][0]["coach_email"], "coach@clubhouse.example");
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = TestApp::spawn().await;
    let player = app.session("player@example.com");

    let res = app
        .post(routes::COACH_GRANTS, &json!({"coach_email": "not-an-email"}), Some(&player))
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn grants_list_newest_first() {
    let app = TestApp::spawn().await;
    let player = app.session("player@example.com");

    for email in ["first@coach.example", "second@coach.example"] {
        let res = app
            .post(routes::COACH_GRANTS, &json!({"coach_email": email}), Some(&player))
            .await;
        assert_eq!(res.status, 200);
        // Keep created_at strictly ordered.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let res = app.get(routes::COACH_GRANTS, Some(&player)).await;
    assert_eq!(res.body["total"], 2);
    assert_eq!(res.body["coaches"][0]["coach_email"], "second@coach.example");
    assert_eq!(res.body["coaches"][1]["coach_email"], "first@coach.example");
}

#[tokio::test]
async fn revoking_a_nonexistent_grant_is_a_silent_no_op() {
    let app = TestApp::spawn().await;
    let player = app.session("player@example.com");

    let res = app
        .delete_with_body(
            routes::COACH_GRANTS,
            &json!({"coach_email": "never@granted.example"}),
            Some(&player),
        )
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["ok"], true);
}

#[tokio::test]
async fn coach_sees_granted_libraries_until_revoked() {
    let app = TestApp::spawn().await;
    let player = app.session("player@example.com");
    let coach = app.session("coach@clubhouse.example");

    app.create_video(&player, Some(8)).await;
    let (_, _) = app.create_video(&coach, Some(3)).await;

    // Before the grant: the coach only sees their own swing.
    let res = app.get(routes::VIDEOS, Some(&coach)).await;
    assert_eq!(res.body["total"], 1);

    let res = app
        .post(
            routes::COACH_GRANTS,
            &json!({"coach_email": "coach@clubhouse.example"}),
            Some(&player),
        )
        .await;
    assert_eq!(res.status, 200);

    // After: the union of the coach's and the player's videos.
    let res = app.get(routes::VIDEOS, Some(&coach)).await;
    assert_eq!(res.body["total"], 2);

    // The grant is read, not cached: revoking takes effect immediately.
    let res = app
        .delete_with_body(
            routes::COACH_GRANTS,
            &json!({"coach_email": "coach@clubhouse.example"}),
            Some(&player),
        )
        .await;
    assert_eq!(res.status, 200);

    let res = app.get(routes::VIDEOS, Some(&coach)).await;
    assert_eq!(res.body["total"], 1);
}

#[tokio::test]
async fn grant_matching_is_case_insensitive_via_normalization() {
    let app = TestApp::spawn().await;
    let player = app.session("player@example.com");
    // Provider emails are lower-cased on extraction.
    let coach = app.session("Coach@ClubHouse.Example");

    app.create_video(&player, None).await;

    let res = app
        .post(
            routes::COACH_GRANTS,
            &json!({"coach_email": "coach@clubhouse.example"}),
            Some(&player),
        )
        .await;
    assert_eq!(res.status, 200);

    let res = app.get(routes::VIDEOS, Some(&coach)).await;
    assert_eq!(res.body["total"], 1);
}
