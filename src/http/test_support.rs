use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Barrier;

use super::{HttpResponse, HttpTransport, RequestSpec, ResponseBody};
use crate::error::HttpError;

/// In-memory transport that records every call instead of touching the network.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    calls: Mutex<Vec<String>>,
    completed: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    barrier: Option<Barrier>,
    delay: Duration,
    failing_url: Option<String>,
}

impl RecordingTransport {
    /// Every call waits until `parties` calls are in flight at once.
    pub(crate) fn with_barrier(parties: usize) -> Self {
        Self {
            barrier: Some(Barrier::new(parties)),
            ..Self::default()
        }
    }

    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub(crate) fn failing(mut self, url: &str) -> Self {
        self.failing_url = Some(url.to_owned());
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub(crate) fn calls_to(&self, url: &str) -> usize {
        self.calls().iter().filter(|called| *called == url).count()
    }

    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::Acquire)
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::Acquire)
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn call(&self, request: &RequestSpec) -> Result<HttpResponse, HttpError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.url.clone());
        }
        let in_flight = self.in_flight.fetch_add(1, Ordering::AcqRel).saturating_add(1);
        self.max_in_flight.fetch_max(in_flight, Ordering::AcqRel);

        if let Some(barrier) = self.barrier.as_ref() {
            barrier.wait().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::AcqRel);
        self.completed.fetch_add(1, Ordering::AcqRel);

        if self.failing_url.as_deref() == Some(request.url.as_str()) {
            return Err(HttpError::TestExpectation {
                message: "induced failure",
            });
        }
        Ok(HttpResponse {
            status: 200,
            headers: vec![("content-type".to_owned(), "text/plain".to_owned())],
            body: ResponseBody::Text("ok".to_owned()),
        })
    }
}
