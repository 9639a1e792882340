use crate::common::{TestApp, routes};
use serde_json::json;

mod registration {
    use super::*;

    #[tokio::test]
    async fn registers_an_uploaded_video() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let key = app.issue_upload_key(&session).await;

        let res = app
            .post(
                routes::VIDEOS,
                &json!({"key": key, "name": "driver.mp4", "rating": 8}),
                Some(&session),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["key"], json!(key));
        assert_eq!(res.body["name"], "driver.mp4");
        assert_eq!(res.body["rating"], 8);
        assert_eq!(res.body["favorite"], false);
        assert_eq!(res.body["user_id"], json!(session.user_id.to_string()));
    }

    #[tokio::test]
    async fn name_defaults_to_the_key_filename() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let key = app.issue_upload_key(&session).await;

        let res = app
            .post(routes::VIDEOS, &json!({"key": key}), Some(&session))
            .await;

        assert_eq!(res.status, 201);
        let name = res.body["name"].as_str().unwrap();
        assert_eq!(name, key.rsplit('/').next().unwrap());
    }

    #[tokio::test]
    async fn duplicate_key_is_a_conflict() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let key = app.issue_upload_key(&session).await;

        let first = app
            .post(routes::VIDEOS, &json!({"key": key}), Some(&session))
            .await;
        assert_eq!(first.status, 201);

        let second = app
            .post(routes::VIDEOS, &json!({"key": key}), Some(&session))
            .await;
        assert_eq!(second.status, 409);
        assert_eq!(second.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn out_of_range_initial_rating_is_rejected() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let key = app.issue_upload_key(&session).await;

        let res = app
            .post(routes::VIDEOS, &json!({"key": key, "rating": 11}), Some(&session))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod library {
    use super::*;

    #[tokio::test]
    async fn lists_own_videos_newest_first_with_playback_urls() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        app.create_video(&session, Some(5)).await;
        app.create_video(&session, None).await;

        let res = app.get(routes::VIDEOS, Some(&session)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["total"], 2);
        let videos = res.body["videos"].as_array().unwrap();
        for video in videos {
            let url = video["url"].as_str().unwrap();
            assert!(url.contains("expires=300"), "{url}");
        }
    }

    #[tokio::test]
    async fn min_rating_filter_treats_unrated_as_zero() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        app.create_video(&session, Some(6)).await;
        app.create_video(&session, Some(7)).await;
        app.create_video(&session, None).await;

        let res = app
            .get(&format!("{}?min_rating=7", routes::VIDEOS), Some(&session))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total"], 1);
        assert_eq!(res.body["videos"][0]["rating"], 7);
    }

    #[tokio::test]
    async fn rating_sorts_use_the_asymmetric_sentinels() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        app.create_video(&session, Some(5)).await;
        app.create_video(&session, None).await;
        app.create_video(&session, Some(9)).await;

        let ratings = |body: &serde_json::Value| -> Vec<serde_json::Value> {
            body["videos"]
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v["rating"].clone())
                .collect()
        };

        // Descending: unrated (sentinel -1) lands last.
        let res = app
            .get(&format!("{}?sort=highest", routes::VIDEOS), Some(&session))
            .await;
        assert_eq!(ratings(&res.body), vec![json!(9), json!(5), json!(null)]);

        // Ascending: unrated (sentinel 999) also lands last.
        let res = app
            .get(&format!("{}?sort=lowest", routes::VIDEOS), Some(&session))
            .await;
        assert_eq!(ratings(&res.body), vec![json!(5), json!(9), json!(null)]);
    }

    #[tokio::test]
    async fn thumbnail_url_appears_once_a_sidecar_exists() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let (_, key) = app.create_video(&session, None).await;

        let res = app.get(routes::VIDEOS, Some(&session)).await;
        assert!(res.body["videos"][0]["thumbnail_url"].is_null());

        app.gateway
            .insert(&format!("{key}.thumb.jpg"), b"jpg".to_vec(), "image/jpeg")
            .await;

        let res = app.get(routes::VIDEOS, Some(&session)).await;
        let thumb = res.body["videos"][0]["thumbnail_url"].as_str().unwrap();
        assert!(thumb.contains("expires=120"), "{thumb}");
    }

    #[tokio::test]
    async fn other_players_videos_are_invisible_without_a_grant() {
        let app = TestApp::spawn().await;
        let player = app.session("player@example.com");
        let stranger = app.session("stranger@example.com");
        let (id, _) = app.create_video(&player, Some(9)).await;

        let res = app.get(routes::VIDEOS, Some(&stranger)).await;
        assert_eq!(res.body["total"], 0);

        let res = app.get(&routes::video(&id), Some(&stranger)).await;
        assert_eq!(res.status, 404);
    }
}

mod metadata {
    use super::*;

    #[tokio::test]
    async fn patch_writes_only_the_named_columns() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let (id, _) = app.create_video(&session, Some(6)).await;

        let res = app
            .patch(
                &routes::video(&id),
                &json!({"notes": "head down", "club": "driver"}),
                Some(&session),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        // Untouched fields survive.
        let res = app.get(&routes::video(&id), Some(&session)).await;
        assert_eq!(res.body["rating"], 6);
        assert_eq!(res.body["notes"], "head down");
        assert_eq!(res.body["club"], "driver");
    }

    #[tokio::test]
    async fn explicit_null_clears_a_column() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let (id, _) = app.create_video(&session, Some(6)).await;

        let res = app
            .patch(&routes::video(&id), &json!({"rating": null}), Some(&session))
            .await;
        assert_eq!(res.status, 200);
        assert!(res.body["rating"].is_null());
    }

    #[tokio::test]
    async fn read_after_write_returns_the_last_written_fields() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let (id, _) = app.create_video(&session, None).await;

        app.patch(
            &routes::video(&id),
            &json!({"rating": 4, "notes": "first"}),
            Some(&session),
        )
        .await;
        app.patch(
            &routes::video(&id),
            &json!({"rating": 9, "notes": "second", "favorite": true, "tags": ["draw", "windy"]}),
            Some(&session),
        )
        .await;

        let res = app.get(&routes::video(&id), Some(&session)).await;
        assert_eq!(res.body["rating"], 9);
        assert_eq!(res.body["notes"], "second");
        assert_eq!(res.body["favorite"], true);
        assert_eq!(res.body["tags"], json!(["draw", "windy"]));
    }

    #[tokio::test]
    async fn rating_endpoint_validates_the_range() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let (id, _) = app.create_video(&session, None).await;

        for bad in [0, 11] {
            let res = app
                .put(&routes::video_rating(&id), &json!({"rating": bad}), Some(&session))
                .await;
            assert_eq!(res.status, 400, "rating {bad} should be rejected");
        }

        let res = app
            .put(&routes::video_rating(&id), &json!({"rating": 10}), Some(&session))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["rating"], 10);
    }

    #[tokio::test]
    async fn only_the_owner_can_edit() {
        let app = TestApp::spawn().await;
        let player = app.session("player@example.com");
        let stranger = app.session("stranger@example.com");
        let (id, _) = app.create_video(&player, None).await;

        let res = app
            .patch(&routes::video(&id), &json!({"rating": 3}), Some(&stranger))
            .await;
        assert_eq!(res.status, 404);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_the_row_leaves_the_storage_object() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");
        let (id, key) = app.create_video(&session, None).await;

        let res = app.delete(&routes::video(&id), Some(&session)).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::video(&id), Some(&session)).await;
        assert_eq!(res.status, 404);

        // Row deletion does not cascade into storage.
        assert!(app.gateway.contains(&key).await);
    }

    #[tokio::test]
    async fn deleting_a_missing_row_is_404() {
        let app = TestApp::spawn().await;
        let session = app.session("player@example.com");

        let res = app
            .delete(&routes::video(&uuid::Uuid::now_v7().to_string()), Some(&session))
            .await;
        assert_eq!(res.status, 404);
    }
}
