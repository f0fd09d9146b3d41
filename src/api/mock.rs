//! Local stand-in for the Qualys API, driven from synchronous tests.

use super::QualysClient;
use crate::config::Credentials;
use std::time::Duration;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub(crate) const USERNAME: &str = "user";
pub(crate) const PASSWORD: &str = "secret";

/// `Authorization` header for [`USERNAME`] / [`PASSWORD`]
pub(crate) const BASIC_AUTH: &str = "Basic dXNlcjpzZWNyZXQ=";

/// The server answers on its own thread, so the blocking client can be
/// called from the test thread between `block_on` calls.
pub(crate) struct MockApi {
    server: MockServer,
    runtime: Runtime,
}

impl MockApi {
    pub(crate) fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub(crate) fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub(crate) fn uri(&self) -> String {
        self.server.uri()
    }

    pub(crate) fn client(&self) -> QualysClient {
        QualysClient::new(self.uri(), Credentials::new(USERNAME, PASSWORD)).unwrap()
    }

    pub(crate) fn client_with_timeout(&self, timeout: Duration) -> QualysClient {
        QualysClient::with_timeout(
            self.uri(),
            Credentials::new(USERNAME, PASSWORD),
            Some(timeout),
        )
        .unwrap()
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}

/// Raw form body of a recorded request
pub(crate) fn body_text(request: &Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}
