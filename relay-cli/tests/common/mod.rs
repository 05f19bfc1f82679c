use async_trait::async_trait;
use relay_core::{HttpRequest, HttpResponse, HttpTransport, RelayResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Stub transport answering every POST with a canned response and counting
/// the calls it receives. Clones share the counter.
#[derive(Clone)]
pub struct CountingTransport {
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    response: HttpResponse,
}

impl CountingTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            response: HttpResponse {
                status,
                body: body.as_bytes().to_vec(),
            },
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for CountingTransport {
    async fn post(&self, request: HttpRequest) -> RelayResult<HttpResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        Ok(self.response.clone())
    }
}

/// In-memory stdout/stderr pair.
#[derive(Default)]
pub struct Output {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Output {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}
