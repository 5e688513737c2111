#![allow(dead_code)]

use configuration::UploadSettings;
use database::InMemoryStore;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use web_server::{build_router, uploads::ImageStore, AppState};

/// Small cap so oversize uploads are cheap to produce.
pub const MAX_IMAGE_BYTES: usize = 4 * 1024;

/// A running router on an ephemeral port, backed by an in-memory store and a
/// throwaway upload directory.
pub struct TestServer {
    _tmp: TempDir,
    pub base: String,
    pub store: Arc<InMemoryStore>,
    pub upload_dir: PathBuf,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let upload_dir = tmp.path().join("public").join("schoolImages");
        let images = ImageStore::new(&UploadSettings {
            dir: upload_dir.clone(),
            public_prefix: "/schoolImages".to_string(),
            max_image_bytes: MAX_IMAGE_BYTES,
        });
        images.ensure_dir().await.expect("create upload dir");

        let store = Arc::new(InMemoryStore::new());
        let state = Arc::new(AppState {
            store: store.clone(),
            images,
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(web_server::serve(
            listener,
            build_router(state),
            std::future::pending(),
        ));

        Self {
            _tmp: tmp,
            base: format!("http://{addr}"),
            store,
            upload_dir,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn post_json(&self, body: &Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url("/addSchool"))
            .json(body)
            .send()
            .await
            .expect("send addSchool");
        read(resp).await
    }

    pub async fn post_form(&self, form: reqwest::multipart::Form) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url("/addSchool"))
            .multipart(form)
            .send()
            .await
            .expect("send addSchool");
        read(resp).await
    }

    pub async fn list(&self) -> Vec<Value> {
        let resp = self
            .client
            .get(self.url("/getSchools"))
            .send()
            .await
            .expect("send getSchools");
        let (status, body) = read(resp).await;
        assert_eq!(status, 200, "listing failed: {body}");
        body.as_array().expect("listing is an array").clone()
    }

    pub fn uploaded_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.upload_dir)
            .expect("read upload dir")
            .map(|entry| entry.expect("dir entry").path())
            .collect()
    }
}

pub async fn read(resp: reqwest::Response) -> (u16, Value) {
    let status = resp.status().as_u16();
    let text = resp.text().await.expect("response body");
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    (status, body)
}

/// The Oak Hall example submission, without image.
pub fn oak_hall() -> Value {
    json!({
        "name": "Oak Hall",
        "address": "12 Elm St",
        "city": "Pune",
        "state": "MH",
        "contact": "9876543210",
        "email_id": "a@b.com",
        "board": "CBSE"
    })
}

/// The same fields as [`oak_hall`], as a multipart form.
pub fn oak_hall_form() -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    if let Value::Object(fields) = oak_hall() {
        for (key, value) in fields {
            form = form.text(key, value.as_str().unwrap_or_default().to_string());
        }
    }
    form
}
