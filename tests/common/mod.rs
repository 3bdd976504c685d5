//! In-process mock of the bot control backend, served by `tiny_http` on an
//! ephemeral port. Each test supplies a routing closure and inspects the
//! recorded requests afterwards.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use botdash::client::HttpBackend;
use tiny_http::{Header, Response, Server, StatusCode};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub body: String,
    pub content_type: Option<String>,
}

impl Recorded {
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }
}

pub struct MockBackend {
    server: Arc<Server>,
    handle: Option<JoinHandle<()>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    url: String,
}

impl MockBackend {
    /// Start serving. `route(method, url, body)` returns status and JSON body.
    pub fn start<F>(route: F) -> Self
    where
        F: Fn(&str, &str, &str) -> (u16, String) + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind mock backend"));
        let addr = server
            .server_addr()
            .to_ip()
            .expect("mock backend has an IP address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let handle = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            std::thread::spawn(move || {
                for mut request in server.incoming_requests() {
                    let method = request.method().to_string();
                    let url = request.url().to_string();
                    let content_type = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Content-Type"))
                        .map(|h| h.value.as_str().to_string());
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);

                    let (status, reply) = route(&method, &url, &body);
                    requests.lock().unwrap().push(Recorded {
                        method,
                        url,
                        body,
                        content_type,
                    });

                    let response = Response::from_string(reply)
                        .with_status_code(StatusCode(status))
                        .with_header(
                            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                                .unwrap(),
                        );
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            handle: Some(handle),
            requests,
            url: format!("http://{addr}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn client(&self) -> HttpBackend {
        HttpBackend::new(&self.url, Duration::from_secs(5))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path() == path)
            .count()
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

/// Route helper: JSON `200 OK`.
pub fn ok(body: &str) -> (u16, String) {
    (200, body.to_string())
}
