use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use clubsite_core::{ErrorDetail, FetchState};
use serde_json::Value;

use crate::error::{RequestError, INVALID_JSON_MESSAGE};
use crate::request::{PreparedRequest, RequestConfig};
use crate::settings::ClientSettings;
use crate::transport::{HttpSend, RawResponse, ReqwestSender};

/// One fetchable backend resource and its tri-state result.
///
/// All failures are captured into the owned [`FetchState`]; nothing is
/// thrown to the caller. `invoke` additionally returns the decoded value
/// on success so call sites can branch on the result directly.
///
/// Invocations are fenced by a generation counter: a response belonging
/// to a superseded invocation (a later `invoke` or a retarget to a new
/// URL) is discarded instead of overwriting fresher state.
pub struct Resource {
    sender: Arc<dyn HttpSend>,
    config: RequestConfig,
    url: Mutex<String>,
    state: Mutex<FetchState>,
    generation: AtomicU64,
}

impl Resource {
    /// A resource using the default `reqwest` transport and settings.
    pub fn new(url: impl Into<String>, config: RequestConfig) -> Result<Self, RequestError> {
        Self::with_settings(url, config, &ClientSettings::default())
    }

    pub fn with_settings(
        url: impl Into<String>,
        config: RequestConfig,
        settings: &ClientSettings,
    ) -> Result<Self, RequestError> {
        let sender = ReqwestSender::new(settings)?;
        Ok(Self::with_sender(url, config, Arc::new(sender)))
    }

    /// A resource over an injected transport.
    pub fn with_sender(
        url: impl Into<String>,
        config: RequestConfig,
        sender: Arc<dyn HttpSend>,
    ) -> Self {
        Self {
            sender,
            config,
            url: Mutex::new(url.into()),
            state: Mutex::new(FetchState::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// A snapshot of the current fetch state.
    pub fn state(&self) -> FetchState {
        lock(&self.state).clone()
    }

    pub fn url(&self) -> String {
        lock(&self.url).clone()
    }

    /// Fires the initial request if this resource auto-fires (explicitly
    /// configured, or defaulting to `GET` requests).
    pub async fn mount(&self) -> Option<Value> {
        if self.config.auto_fires() {
            self.invoke(None).await
        } else {
            None
        }
    }

    /// Points the resource at a new URL, fencing any in-flight request,
    /// and re-fires if the resource auto-fires.
    pub async fn retarget(&self, url: impl Into<String>) -> Option<Value> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *lock(&self.url) = url.into();
        if self.config.auto_fires() {
            self.invoke(None).await
        } else {
            None
        }
    }

    /// Performs the HTTP call.
    ///
    /// Returns the decoded payload on success and `None` otherwise; the
    /// failure detail (or a superseded result) lands in [`Self::state`].
    pub async fn invoke(&self, body: Option<Value>) -> Option<Value> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        lock(&self.state).begin();

        let outcome = match self.prepare(body) {
            Ok(request) => match self.sender.send(request).await {
                Ok(response) => classify(response),
                Err(err) => Err(err),
            },
            Err(err) => Err(err),
        };
        self.resolve(generation, outcome)
    }

    fn prepare(&self, body: Option<Value>) -> Result<PreparedRequest, RequestError> {
        let raw = lock(&self.url).clone();
        let url =
            reqwest::Url::parse(&raw).map_err(|err| RequestError::InvalidUrl(err.to_string()))?;
        Ok(PreparedRequest {
            method: self.config.method.clone(),
            url,
            language: self.config.language,
            body,
        })
    }

    fn resolve(&self, generation: u64, outcome: Result<Value, RequestError>) -> Option<Value> {
        let mut state = lock(&self.state);
        if self.generation.load(Ordering::SeqCst) != generation {
            log::debug!("discarding superseded response for {}", self.url());
            return None;
        }
        match outcome {
            Ok(value) => {
                state.succeed(value.clone());
                Some(value)
            }
            Err(err) => {
                log::warn!("request to {} failed: {err}", self.url());
                state.fail(err.into_detail());
                None
            }
        }
    }
}

/// Splits a completed exchange into payload or failure.
fn classify(response: RawResponse) -> Result<Value, RequestError> {
    let RawResponse { status, body } = response;
    if (200..300).contains(&status) {
        body.ok_or(RequestError::Decode)
    } else {
        let detail = match body {
            Some(body) => ErrorDetail::from_body(&body),
            None => ErrorDetail::message(INVALID_JSON_MESSAGE),
        };
        Err(RequestError::Http { status, detail })
    }
}

// Poisoning only happens if a panic interrupted a state write; the data
// is still the freshest available, so recover it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
