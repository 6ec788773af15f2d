//! Metrics decorator for any operations gateway

use async_trait::async_trait;
use opload_core::{
    Operation, OperationId, OperationKind, OperationsGateway, RemoteError, RequestEvent,
    SharedGateway, SharedSink,
};
use std::future::Future;
use std::time::Instant;
use tracing::debug;

/// Gateway that reports every call to a metrics sink.
///
/// Exactly one [`RequestEvent`] is recorded per call, success or failure,
/// named by the route template so get-one calls aggregate under one entry.
/// The wrapped gateway's result is returned unchanged.
pub struct InstrumentedGateway {
    inner: SharedGateway,
    sink: SharedSink,
}

impl InstrumentedGateway {
    pub fn new(inner: SharedGateway, sink: SharedSink) -> Self {
        Self { inner, sink }
    }

    async fn observe<T, F>(&self, kind: OperationKind, call: F) -> Result<T, RemoteError>
    where
        F: Future<Output = Result<T, RemoteError>> + Send,
        T: Send,
    {
        let started = Instant::now();
        let result = call.await;
        let elapsed = started.elapsed();

        let event = match &result {
            Ok(_) => RequestEvent::success(kind.method(), kind.route(), elapsed),
            Err(e) => RequestEvent::failure(kind.method(), kind.route(), elapsed, e.to_string()),
        };
        debug!(
            "{} {} -> {} in {:?}",
            event.method,
            event.name,
            if event.success { "ok" } else { "failed" },
            elapsed
        );
        self.sink.record_request(event);

        result
    }
}

#[async_trait]
impl OperationsGateway for InstrumentedGateway {
    async fn create_operation(&self) -> Result<Operation, RemoteError> {
        self.observe(OperationKind::Create, self.inner.create_operation())
            .await
    }

    async fn get_operation(&self, operation_id: OperationId) -> Result<Operation, RemoteError> {
        self.observe(OperationKind::Get, self.inner.get_operation(operation_id))
            .await
    }

    async fn get_operations(&self) -> Result<Vec<Operation>, RemoteError> {
        self.observe(OperationKind::List, self.inner.get_operations())
            .await
    }
}
