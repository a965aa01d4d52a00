//! Test server harness.

use std::net::SocketAddr;
use std::time::Duration;

use textscore::embedding::AiTextDetector;
use textscore::gateway::{HandlerState, create_router_with_state};
use textscore::scoring::{BatchScheduler, MockScorer, SchedulerConfig, TextScorer};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub scheduler: SchedulerConfig,
    pub max_blocks: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            max_blocks: textscore::DEFAULT_MAX_BLOCKS,
        }
    }
}

pub struct TestServer<S: TextScorer + 'static> {
    pub addr: SocketAddr,
    pub state: HandlerState<S>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl<S: TextScorer + 'static> TestServer<S> {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl<S: TextScorer + 'static> Drop for TestServer<S> {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => tokio::time::sleep(interval).await,
        }
    }
}

/// Serves `scorer` on an ephemeral localhost port.
pub async fn spawn_server<S: TextScorer + 'static>(
    scorer: S,
    config: TestServerConfig,
) -> Result<TestServer<S>, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let scheduler = BatchScheduler::new(scorer, config.scheduler)
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let state = HandlerState::new(scheduler).with_max_blocks(config.max_blocks);

    let app = create_router_with_state(state.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        state,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Server backed by the recording [`MockScorer`].
pub async fn spawn_mock_server(
    config: TestServerConfig,
) -> Result<TestServer<MockScorer>, ServerStartupError> {
    spawn_server(MockScorer::new(), config).await
}

/// Server backed by the detector in stub mode (no model weights needed).
pub async fn spawn_stub_server() -> Result<TestServer<AiTextDetector>, ServerStartupError> {
    let detector =
        AiTextDetector::stub().map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    spawn_server(detector, TestServerConfig::default()).await
}
