//! In-process mock backend on `tiny_http`.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use aja_client::AjaClient;

/// A canned response for `method path`.
#[derive(Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: String,
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
}

impl Route {
    pub fn json(method: &'static str, path: &str, status: u16, body: serde_json::Value) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
            content_type: "application/json",
        }
    }
}

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub content_type: String,
    pub body: String,
}

pub struct MockBackend {
    server: Arc<tiny_http::Server>,
    handle: Option<JoinHandle<()>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    base: String,
}

impl MockBackend {
    pub fn start(routes: Vec<Route>) -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").unwrap());
        let port = server.server_addr().to_ip().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            std::thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let mut raw = Vec::new();
                    let _ = request.as_reader().read_to_end(&mut raw);
                    let path = request.url().split('?').next().unwrap_or("").to_string();
                    let method = request.method().as_str().to_uppercase();
                    let content_type = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Content-Type"))
                        .map(|h| h.value.as_str().to_string())
                        .unwrap_or_default();
                    requests.lock().unwrap().push(Recorded {
                        method: method.clone(),
                        path: path.clone(),
                        content_type,
                        body: String::from_utf8_lossy(&raw).into_owned(),
                    });

                    let route = routes.iter().find(|r| r.method == method && r.path == path);
                    let response = match route {
                        Some(route) => tiny_http::Response::from_string(route.body.clone())
                            .with_status_code(route.status)
                            .with_header(
                                tiny_http::Header::from_bytes("Content-Type", route.content_type)
                                    .unwrap(),
                            ),
                        None => tiny_http::Response::from_string(r#"{"detail":"Not Found"}"#)
                            .with_status_code(404),
                    };
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            handle: Some(handle),
            requests,
            base: format!("http://127.0.0.1:{port}"),
        }
    }

    /// Client pointing both backends at this mock.
    pub fn client(&self) -> AjaClient {
        AjaClient::with_urls(&self.base, &self.base, Duration::from_secs(5))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
