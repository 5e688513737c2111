mod common;

use common::{oak_hall, TestServer};
use serde_json::json;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn lists_newest_first() {
    let server = TestServer::start().await;

    for name in ["A", "B", "C"] {
        let mut body = oak_hall();
        body["name"] = json!(name);
        let (status, resp) = server.post_json(&body).await;
        assert_eq!(status, 200, "{resp}");
    }

    let schools = server.list().await;
    let names: Vec<&str> = schools.iter().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(names, vec!["C", "B", "A"]);

    let ids: Vec<i64> = schools.iter().filter_map(|s| s["id"].as_i64()).collect();
    assert!(ids.windows(2).all(|pair| pair[0] > pair[1]), "{ids:?}");
}

#[tokio::test]
async fn empty_directory_is_an_empty_list() {
    let server = TestServer::start().await;
    assert!(server.list().await.is_empty());
}

#[tokio::test]
async fn listing_is_also_served_under_api_prefix() {
    let server = TestServer::start().await;
    server.post_json(&oak_hall()).await;

    let resp = server
        .client
        .get(server.url("/api/getSchools"))
        .send()
        .await
        .expect("send");
    let (status, body) = common::read(resp).await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn storage_fault_returns_generic_error() {
    let server = TestServer::start().await;
    server.store.fail_reads.store(true, Ordering::Relaxed);

    let resp = server
        .client
        .get(server.url("/getSchools"))
        .send()
        .await
        .expect("send");
    let (status, body) = common::read(resp).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Server error" }));
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/getSchools"))
        .json(&oak_hall())
        .send()
        .await
        .expect("send");
    let (status, body) = common::read(resp).await;
    assert_eq!(status, 405);
    assert_eq!(body["error"], "Method Not Allowed");
}

#[tokio::test]
async fn health_check_answers_ok() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .get(server.url("/api/health"))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.text().await.expect("body"), "OK");
}
