//! Mail API HTTP mock endpoint creation.

use std::time::Duration;

use mockito::{Matcher, Mock};

use crate::{
    constant::{TEST_MAIL_API_KEY, TEST_MAIL_SEND_PATH},
    TestContext,
};

impl TestContext {
    pub fn mail(&mut self) -> MailFixtures<'_> {
        MailFixtures { setup: self }
    }
}

pub struct MailFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> MailFixtures<'a> {
    /// Create a mock send endpoint which accepts messages addressed to `recipient`.
    ///
    /// The mock verifies the bearer token and that it was called exactly `expected_requests`
    /// times.
    pub fn create_send_endpoint(&mut self, recipient: &str, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", TEST_MAIL_SEND_PATH)
            .match_header(
                "authorization",
                format!("Bearer {}", TEST_MAIL_API_KEY).as_str(),
            )
            .match_body(Matcher::PartialJson(serde_json::json!({ "to": recipient })))
            .with_status(202)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"queued"}"#)
            .expect(expected_requests)
            .create()
    }

    /// Create a mock send endpoint which always fails with the given status.
    pub fn create_failing_send_endpoint(&mut self, status: usize, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", TEST_MAIL_SEND_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"unavailable"}"#)
            .expect(expected_requests)
            .create()
    }

    /// Create a mock send endpoint which holds every response back for `delay`.
    pub fn create_stalled_send_endpoint(&mut self, delay: Duration, expected_requests: usize) -> Mock {
        self.setup
            .server
            .mock("POST", TEST_MAIL_SEND_PATH)
            .with_status(202)
            .with_header("content-type", "application/json")
            .with_body_from_request(move |_| {
                std::thread::sleep(delay);
                br#"{"status":"queued"}"#.to_vec()
            })
            .expect(expected_requests)
            .create()
    }
}
