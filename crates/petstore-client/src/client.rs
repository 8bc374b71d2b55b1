// Pet-store API client
//
// Endpoint-per-method client over a shared reqwest::Client. Every completed
// exchange returns an ApiResponse carrying status, elapsed time, and the raw
// body; asserting on them is the caller's business.

use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;

/// Public swagger petstore deployment.
pub const PUBLIC_BASE_URL: &str = "https://petstore.swagger.io/v2";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub elapsed: Duration,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as arbitrary JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Parses the body into a typed value.
    pub fn json_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Whether the body holds well-formed JSON.
    pub fn is_json(&self) -> bool {
        serde_json::from_slice::<serde_json::Value>(&self.body).is_ok()
    }

    /// Whether the exchange completed within `max`.
    pub fn within(&self, max: Duration) -> bool {
        self.elapsed <= max
    }
}

/// Client for the pet endpoints of the pet-store API.
pub struct PetStoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl PetStoreClient {
    /// Builds a client against `base_url` (no trailing slash required).
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST /pet
    pub async fn create_pet<T: Serialize + ?Sized>(&self, pet: &T) -> Result<ApiResponse> {
        self.dispatch(self.http.post(format!("{}/pet", self.base_url)).json(pet))
            .await
    }

    /// GET /pet/{petId}
    pub async fn get_pet(&self, pet_id: i64) -> Result<ApiResponse> {
        self.dispatch(self.http.get(format!("{}/pet/{pet_id}", self.base_url)))
            .await
    }

    /// PUT /pet
    pub async fn update_pet<T: Serialize + ?Sized>(&self, pet: &T) -> Result<ApiResponse> {
        self.dispatch(self.http.put(format!("{}/pet", self.base_url)).json(pet))
            .await
    }

    /// DELETE /pet/{petId}, optionally authenticated with an api key
    pub async fn delete_pet(&self, pet_id: i64, api_key: Option<&str>) -> Result<ApiResponse> {
        let mut request = self.http.delete(format!("{}/pet/{pet_id}", self.base_url));
        if let Some(key) = api_key {
            request = request.header("api_key", key);
        }
        self.dispatch(request).await
    }

    /// GET /pet/findByStatus
    pub async fn find_pets_by_status(&self, status: &str) -> Result<ApiResponse> {
        self.dispatch(
            self.http
                .get(format!("{}/pet/findByStatus", self.base_url))
                .query(&[("status", status)]),
        )
        .await
    }

    /// POST /pet/{petId} with form data
    pub async fn update_pet_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<ApiResponse> {
        let mut form = Vec::new();
        if let Some(name) = name {
            form.push(("name", name));
        }
        if let Some(status) = status {
            form.push(("status", status));
        }
        self.dispatch(
            self.http
                .post(format!("{}/pet/{pet_id}", self.base_url))
                .form(&form),
        )
        .await
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        let elapsed = started.elapsed();
        debug!(status, ?elapsed, "api exchange completed");
        Ok(ApiResponse {
            status,
            elapsed,
            body,
        })
    }
}
