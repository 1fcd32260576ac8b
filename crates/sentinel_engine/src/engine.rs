use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::thread;

use futures_util::FutureExt;
use sentinel_logging::{sentinel_debug, sentinel_error, sentinel_info};
use tokio_util::sync::CancellationToken;

use crate::{
    AnalysisClient, AnalysisError, AnalysisRequest, ClientSettings, EngineEvent, FailureKind,
    ReqwestAnalysisClient, RequestId,
};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build analysis client: {0}")]
    Client(#[from] AnalysisError),
    #[error("engine thread has stopped")]
    Stopped,
}

enum EngineCommand {
    Submit {
        request_id: RequestId,
        request: AnalysisRequest,
    },
}

/// Runs analysis requests on a background tokio runtime.
///
/// Commands go in through [`EngineHandle::submit`], completions come back out
/// through [`EngineHandle::try_recv`], so the caller's thread never blocks on
/// the network. Every request runs under a child of one cancellation token;
/// [`EngineHandle::shutdown`] (or dropping the handle) aborts whatever is still
/// in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestAnalysisClient::new(&settings)?;
        sentinel_info!("Analysis endpoint {}", client.base());
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn AnalysisClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let runtime = tokio::runtime::Runtime::new()?;

        let root = shutdown.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                let token = root.child_token();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, token, event_tx).await;
                });
            }
            sentinel_debug!("Engine command channel closed");
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            shutdown,
        })
    }

    /// Hands a request to the engine. Fails only when the engine thread is
    /// gone, in which case no completion will ever arrive for `request_id`.
    pub fn submit(
        &self,
        request_id: RequestId,
        request: AnalysisRequest,
    ) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Submit { request_id, request })
            .map_err(|_| EngineError::Stopped)
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Cancels every in-flight request. Requests submitted afterwards complete
    /// immediately with [`FailureKind::Cancelled`].
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_command(
    client: &dyn AnalysisClient,
    command: EngineCommand,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            request_id,
            request,
        } => {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => Err(AnalysisError::new(
                    FailureKind::Cancelled,
                    "engine shut down",
                )),
                outcome = AssertUnwindSafe(client.analyze(&request)).catch_unwind() => {
                    outcome.unwrap_or_else(|payload| {
                        let reason = panic_reason(payload.as_ref());
                        sentinel_error!(
                            "Analysis request_id={} panicked: {}",
                            request_id,
                            reason
                        );
                        Err(AnalysisError::new(FailureKind::Internal, reason))
                    })
                }
            };
            let _ = event_tx.send(EngineEvent::Completed { request_id, result });
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "analysis client panicked".to_string()
    }
}
