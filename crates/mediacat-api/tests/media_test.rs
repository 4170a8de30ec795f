//! Media API integration tests.
//!
//! Run with: `cargo test -p mediacat-api --test media_test`

mod helpers;

use helpers::{file_form, setup_test_app, setup_test_app_with, upload, TestOptions};
use serde_json::{json, Value};

#[tokio::test]
async fn upload_then_get_returns_detail() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = file_form("Holiday Photo.png", "image/png", vec![1; 2048])
        .add_text("collection", "trips")
        .add_text("custom_properties", r#"{"alt": "beach", "rating": 5}"#);
    let response = client.post("/api/v1/media/upload").multipart(form).await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["message"], "File uploaded successfully");
    let data = &body["data"];
    assert_eq!(data["file_name"], "Holiday_Photo.png");
    assert_eq!(data["mime_type"], "image/png");
    assert_eq!(data["size"], 2048);
    assert_eq!(data["size_formatted"], "2.00 KB");
    assert_eq!(data["collection_name"], "trips");
    assert_eq!(data["thumb_url"], data["url"]);

    let id = data["id"].as_i64().unwrap();
    let response = client.get(&format!("/api/v1/media/{}", id)).await;
    assert_eq!(response.status_code(), 200);
    let detail: Value = response.json();
    assert_eq!(detail["data"]["id"], id);
    assert_eq!(detail["data"]["custom_properties"], json!({"alt": "beach", "rating": 5}));
}

#[tokio::test]
async fn uploaded_file_is_served_from_its_url() {
    let app = setup_test_app().await;
    let client = app.client();

    let data = upload(client, "notes.txt", "text/plain", None, 12).await;
    assert_eq!(data["collection_name"], "default");

    let url = data["url"].as_str().unwrap();
    let path = url.strip_prefix("http://localhost:3000").unwrap();
    assert!(path.starts_with("/files/media/"));

    let response = client.get(path).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), vec![b'x'; 12].as_slice());
}

#[tokio::test]
async fn file_names_with_double_dots_upload_and_serve() {
    let app = setup_test_app().await;
    let client = app.client();

    let data = upload(client, "release..notes.pdf", "application/pdf", None, 8).await;
    assert_eq!(data["file_name"], "release..notes.pdf");

    let url = data["url"].as_str().unwrap();
    let path = url.strip_prefix("http://localhost:3000").unwrap();
    let response = client.get(path).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.as_bytes().as_ref(), vec![b'x'; 8].as_slice());
}

#[tokio::test]
async fn list_filters_by_collection_and_type_with_limit() {
    let app = setup_test_app().await;
    let client = app.client();

    upload(client, "a.png", "image/png", Some("avatars"), 10).await;
    upload(client, "b.pdf", "application/pdf", Some("avatars"), 10).await;
    upload(client, "c.jpg", "image/jpeg", Some("avatars"), 10).await;
    upload(client, "d.png", "image/png", Some("banners"), 10).await;

    let response = client
        .get("/api/v1/media")
        .add_query_param("collection", "avatars")
        .add_query_param("type", "image")
        .add_query_param("limit", 1)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["meta"]["total"], 2);
    assert_eq!(body["meta"]["count"], 1);
    assert_eq!(body["data"][0]["file_name"], "a.png");

    let all: Value = client.get("/api/v1/media").await.json();
    assert_eq!(all["meta"]["total"], 4);
    assert_eq!(all["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn list_rejects_unknown_type_and_bad_limit() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .get("/api/v1/media")
        .add_query_param("type", "hologram")
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "INVALID_INPUT");

    let response = client.get("/api/v1/media").add_query_param("limit", 0).await;
    assert_eq!(response.status_code(), 400);

    let response = client
        .get("/api/v1/media")
        .add_query_param("limit", "many")
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = setup_test_app().await;
    let client = app.client();

    let data = upload(client, "gone.png", "image/png", None, 64).await;
    let id = data["id"].as_i64().unwrap();

    let response = client.delete(&format!("/api/v1/media/{}", id)).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({"message": "Media deleted successfully"})
    );

    let response = client.get(&format!("/api/v1/media/{}", id)).await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "Media not found");

    let response = client.delete(&format!("/api/v1/media/{}", id)).await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn stats_totals_match_listing() {
    let app = setup_test_app().await;
    let client = app.client();

    upload(client, "a.png", "image/png", Some("zeta"), 1024).await;
    upload(client, "b.pdf", "application/pdf", Some("alpha"), 1024).await;
    upload(client, "c.png", "image/png", Some("zeta"), 1024).await;

    let response = client.get("/api/v1/media/stats").await;
    assert_eq!(response.status_code(), 200);
    let stats = response.json::<Value>()["data"].clone();

    let listed: Value = client.get("/api/v1/media").await.json();
    assert_eq!(stats["total_count"], listed["meta"]["total"]);
    assert_eq!(stats["total_size_bytes"], 3072);
    assert_eq!(stats["total_size_formatted"], "3.00 KB");
    assert_eq!(stats["by_collection"][0]["collection_name"], "zeta");
    assert_eq!(stats["by_collection"][0]["count"], 2);
    assert_eq!(stats["by_collection"][1]["collection_name"], "alpha");
    assert_eq!(stats["by_mime_type"][0]["mime_type"], "image/png");
}

#[tokio::test]
async fn upload_one_byte_over_limit_is_rejected() {
    let app = setup_test_app_with(TestOptions {
        max_upload_bytes: Some(1024),
        ..Default::default()
    })
    .await;
    let client = app.client();

    upload(client, "exact.bin", "application/octet-stream", None, 1024).await;

    let response = client
        .post("/api/v1/media/upload")
        .multipart(file_form("big.bin", "application/octet-stream", vec![0; 1025]))
        .await;
    assert_eq!(response.status_code(), 413);
    assert_eq!(response.json::<Value>()["code"], "PAYLOAD_TOO_LARGE");

    let listed: Value = client.get("/api/v1/media").await.json();
    assert_eq!(listed["meta"]["total"], 1);
}

#[tokio::test]
async fn invalid_uploads_are_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let no_file = axum_test::multipart::MultipartForm::new().add_text("collection", "docs");
    let response = client.post("/api/v1/media/upload").multipart(no_file).await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "No file provided");

    let empty = file_form("empty.txt", "text/plain", Vec::new());
    let response = client.post("/api/v1/media/upload").multipart(empty).await;
    assert_eq!(response.status_code(), 400);

    let bad_props = file_form("a.txt", "text/plain", vec![1])
        .add_text("custom_properties", "{not json");
    let response = client.post("/api/v1/media/upload").multipart(bad_props).await;
    assert_eq!(response.status_code(), 400);

    let bad_collection =
        file_form("a.txt", "text/plain", vec![1]).add_text("collection", "no spaces allowed");
    let response = client
        .post("/api/v1/media/upload")
        .multipart(bad_collection)
        .await;
    assert_eq!(response.status_code(), 400);

    let listed: Value = client.get("/api/v1/media").await.json();
    assert_eq!(listed["meta"]["total"], 0);
}

#[tokio::test]
async fn cleanup_dry_run_then_remove() {
    let app = setup_test_app().await;
    let client = app.client();

    let kept = upload(client, "kept.txt", "text/plain", None, 4).await;
    let orphan_dir = app.storage_dir.path().join("media/stray");
    std::fs::create_dir_all(&orphan_dir).unwrap();
    std::fs::write(orphan_dir.join("orphan.txt"), b"lost").unwrap();

    let response = client
        .post("/api/v1/media/cleanup")
        .json(&json!({"dry_run": true}))
        .await;
    assert_eq!(response.status_code(), 200);
    let report = response.json::<Value>()["data"].clone();
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["orphaned_keys"], json!(["media/stray/orphan.txt"]));
    assert_eq!(report["removed_keys"], json!([]));
    assert!(orphan_dir.join("orphan.txt").exists());

    let response = client.post("/api/v1/media/cleanup").json(&json!({})).await;
    assert_eq!(response.status_code(), 200);
    let report = response.json::<Value>()["data"].clone();
    assert_eq!(report["dry_run"], false);
    assert_eq!(report["removed_keys"], json!(["media/stray/orphan.txt"]));
    assert!(!orphan_dir.join("orphan.txt").exists());

    let id = kept["id"].as_i64().unwrap();
    let response = client.get(&format!("/api/v1/media/{}", id)).await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn dashboard_routes_share_handlers() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/dashboard/media/upload")
        .multipart(file_form("dash.png", "image/png", vec![1; 8]))
        .await;
    assert_eq!(response.status_code(), 201);
    let id = response.json::<Value>()["data"]["id"].as_i64().unwrap();

    let listed: Value = client.get("/dashboard/media").await.json();
    assert_eq!(listed["meta"]["count"], 1);

    let response = client.delete(&format!("/dashboard/media/{}", id)).await;
    assert_eq!(response.status_code(), 200);
}
