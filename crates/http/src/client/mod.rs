//! Porter API client

pub mod error;
pub mod interceptor;

use crate::config::{ApiConfig, DEFAULT_USER_AGENT};
use error::ClientError;
use interceptor::{InterceptorChain, InterceptorId, RequestInterceptor, ResponseInterceptor};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// API client shared by everything that talks to the backend.
///
/// Clones share default headers and interceptor chains, so a hook registered
/// through one handle applies to requests sent through any other.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    shared: Rc<Shared>,
}

#[derive(Default)]
struct Shared {
    default_headers: RefCell<HeaderMap>,
    request_interceptors: InterceptorChain<RequestInterceptor>,
    response_interceptors: InterceptorChain<ResponseInterceptor>,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a client from an [`ApiConfig`]
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut builder = Self::builder()
            .base_url(config.base_url.clone())
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set a header sent with every request unless the request sets it itself
    pub fn set_default_header(&self, name: &str, value: &str) -> Result<(), ClientError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::Configuration(format!("invalid header name: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::Configuration(format!("invalid header value: {e}")))?;
        self.shared.default_headers.borrow_mut().insert(name, value);
        Ok(())
    }

    /// Remove a default header; returns whether it was set
    pub fn remove_default_header(&self, name: &str) -> bool {
        self.shared.default_headers.borrow_mut().remove(name).is_some()
    }

    /// Current value of a default header
    pub fn default_header(&self, name: &str) -> Option<String> {
        self.shared
            .default_headers
            .borrow()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    /// Register a hook that may rewrite every outgoing request
    pub fn intercept_requests(
        &self,
        interceptor: impl Fn(&mut reqwest::Request) + 'static,
    ) -> InterceptorId {
        self.shared.request_interceptors.register(Rc::new(interceptor))
    }

    /// Register a hook that observes every failed request
    pub fn intercept_responses(
        &self,
        interceptor: impl Fn(&ClientError) + 'static,
    ) -> InterceptorId {
        self.shared.response_interceptors.register(Rc::new(interceptor))
    }

    /// Remove a request interceptor; returns `false` if it was already ejected
    pub fn eject_request_interceptor(&self, id: InterceptorId) -> bool {
        self.shared.request_interceptors.eject(id)
    }

    /// Remove a response interceptor; returns `false` if it was already ejected
    pub fn eject_response_interceptor(&self, id: InterceptorId) -> bool {
        self.shared.response_interceptors.eject(id)
    }

    /// Number of registered (request, response) interceptors
    pub fn interceptor_count(&self) -> (usize, usize) {
        (
            self.shared.request_interceptors.len(),
            self.shared.response_interceptors.len(),
        )
    }

    /// Create a request builder for `path` relative to the base URL
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        self.execute(request).await
    }

    /// POST a JSON body and ignore whatever the server sends back
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path).json(body);
        self.send(request).await.map(|_| ())
    }

    /// GET a path and decode the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(Method::GET, path);
        self.execute(request).await
    }

    /// Execute a request and decode its JSON body
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request through both interceptor chains and return the body
    /// of a successful response.
    ///
    /// Response interceptors see the error before it is returned; they cannot
    /// swallow it.
    pub async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ClientError> {
        let result = self.dispatch(request).await;
        if let Err(error) = &result {
            for interceptor in self.shared.response_interceptors.snapshot() {
                interceptor(error);
            }
        }
        result
    }

    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<String, ClientError> {
        let mut request = request.build()?;
        self.apply_default_headers(&mut request);
        for interceptor in self.shared.request_interceptors.snapshot() {
            interceptor(&mut request);
        }

        tracing::debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = self.client.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            tracing::debug!(status = status.as_u16(), "Request rejected");
            Err(ClientError::from_status(status, message))
        }
    }

    fn apply_default_headers(&self, request: &mut reqwest::Request) {
        let defaults = self.shared.default_headers.borrow();
        let headers = request.headers_mut();
        for (name, value) in &*defaults {
            if !headers.contains_key(name) {
                headers.insert(name.clone(), value.clone());
            }
        }
    }
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let client_builder = ClientBuilder::new().user_agent(user_agent);

        #[cfg(not(target_arch = "wasm32"))]
        let client_builder = match self.timeout {
            Some(timeout) => client_builder.timeout(timeout),
            None => client_builder,
        };

        #[cfg(target_arch = "wasm32")]
        let _ = self.timeout; // Timeouts not supported on WASM

        let client = client_builder.build()?;

        Ok(ApiClient {
            client,
            base_url,
            shared: Rc::new(Shared::default()),
        })
    }
}
