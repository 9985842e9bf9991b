//! Mock implementations for test fixtures.
//!
//! Re-exports the mocks from `chatline::adapters::mock` and adds builders for
//! scripted streaming replies.

pub use chatline::adapters::mock::{InMemoryCredentials, MockHttpClient, MockResponse};
pub use chatline::traits::{Headers, HttpClient, HttpError, Response};

use bytes::Bytes;

/// Chunks as the transport would deliver them.
pub fn chunks(parts: &[&str]) -> Vec<Bytes> {
    parts.iter().map(|p| Bytes::from(p.to_string())).collect()
}

/// A mock whose stream endpoint replies with `parts`, then closes.
pub fn stream_mock(parts: &[&str]) -> MockHttpClient {
    let mock = MockHttpClient::new();
    mock.set_response(&super::stream_url(), MockResponse::Stream(chunks(parts)));
    mock
}

/// A mock whose stream endpoint replies with `parts`, then fails the read.
pub fn failing_stream_mock(parts: &[&str], error: HttpError) -> MockHttpClient {
    let mock = MockHttpClient::new();
    mock.set_response(
        &super::stream_url(),
        MockResponse::StreamThenError {
            chunks: chunks(parts),
            error,
        },
    );
    mock
}

/// A mock whose stream endpoint replies with `parts`, then stalls forever.
pub fn hanging_stream_mock(parts: &[&str]) -> MockHttpClient {
    let mock = MockHttpClient::new();
    mock.set_response(&super::stream_url(), MockResponse::StreamThenHang(chunks(parts)));
    mock
}

/// A buffered JSON response.
pub fn json_response(status: u16, json: &str) -> MockResponse {
    MockResponse::Success(Response::new(status, Bytes::from(json.to_string())))
}

/// A `data:` line carrying a reply fragment.
pub fn delta_line(text: &str) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({"type": "text_delta", "text": text})
    )
}
