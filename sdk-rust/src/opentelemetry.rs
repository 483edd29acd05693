use crate::StoreResult;
use opentelemetry::trace::Status;
use std::time::Instant;
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Span covering one call to the store.
pub struct StoreSpan {
    span: Span,
    start_time: Instant,
    returned_rows: Option<usize>,
}

impl StoreSpan {
    pub fn new(provider: &str, table: &str, operation: &str) -> Self {
        let span = match operation {
            "select" => info_span!("facts_sdk.select"),
            "insert" => info_span!("facts_sdk.insert"),
            _ => info_span!("facts_sdk.update"),
        };
        span.set_attribute("db.system.name", "postgresql");
        span.set_attribute("db.collection.name", table.to_string());
        span.set_attribute("db.operation.name", operation.to_string());
        span.set_attribute("facts_sdk.provider", provider.to_string());

        Self {
            span,
            start_time: Instant::now(),
            returned_rows: None,
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        future.instrument(self.span()).await
    }

    pub fn on_rows(&mut self, rows: usize) {
        self.returned_rows = Some(rows);
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        if let Some(rows) = self.returned_rows {
            self.span.set_attribute(
                "db.response.returned_rows",
                i64::try_from(rows).unwrap_or(i64::MAX),
            );
        }
        self.span
            .set_attribute("facts_sdk.duration", self.start_time.elapsed().as_secs_f64());
    }
}

/// Run a store call inside a [`StoreSpan`]. `rows` reports how many rows
/// the successful result carries.
pub async fn trace_call<T, Fut>(
    provider: &str,
    table: &str,
    operation: &str,
    rows: impl FnOnce(&T) -> usize,
    call: Fut,
) -> StoreResult<T>
where
    Fut: std::future::Future<Output = StoreResult<T>>,
{
    let mut span = StoreSpan::new(provider, table, operation);
    let result = span.instrument_future(call).await;

    match &result {
        Ok(value) => span.on_rows(rows(value)),
        Err(error) => span.on_error(error),
    }

    span.on_end();
    result
}
