//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for the analysis-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

/// HTTP test client
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET /
    pub async fn home(&self) -> Response {
        self.get_raw("/").await
    }

    /// GET /api/songs
    pub async fn get_songs(&self) -> Response {
        self.get_raw("/api/songs").await
    }

    /// GET /api/analyze/{song_title}
    ///
    /// The title is percent-encoded the way the player's `fetch` call does it.
    pub async fn get_analysis(&self, song_title: &str) -> Response {
        self.get_raw(&format!(
            "/api/analyze/{}",
            urlencoding::encode(song_title)
        ))
        .await
    }

    /// GET an arbitrary path (static files, probes)
    pub async fn get_raw(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }
}
