use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use cinematch_core::{PosterProbe, RequestId};
use engine_logging::{engine_debug, engine_warn};

use crate::client::{GeminiClient, RecommendationClient};
use crate::poster::{PosterProber, ReqwestPosterProber};
use crate::{EngineError, EngineEvent, ProbeSettings, ServiceSettings};

enum EngineCommand {
    Recommend {
        request_id: RequestId,
        query: String,
    },
    ProbePosters {
        request_id: RequestId,
        posters: Vec<PosterProbe>,
    },
}

/// Runs service calls on a background runtime. Commands go in, [`EngineEvent`]s come out.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings, probe: ProbeSettings) -> Result<Self, EngineError> {
        let client =
            GeminiClient::new(settings).map_err(|err| EngineError::Client(err.to_string()))?;
        let prober =
            ReqwestPosterProber::new(&probe).map_err(|err| EngineError::Client(err.to_string()))?;
        Self::with_services(Arc::new(client), Arc::new(prober))
    }

    pub fn with_services(
        client: Arc<dyn RecommendationClient>,
        prober: Arc<dyn PosterProber>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let prober = prober.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), prober.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn recommend(&self, request_id: RequestId, query: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Recommend {
            request_id,
            query: query.into(),
        });
    }

    pub fn probe_posters(&self, request_id: RequestId, posters: Vec<PosterProbe>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ProbePosters { request_id, posters });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn RecommendationClient,
    prober: &dyn PosterProber,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Recommend { request_id, query } => {
            let result = client.fetch_recommendations(&query).await;
            let _ = event_tx.send(EngineEvent::RecommendationsCompleted { request_id, result });
        }
        EngineCommand::ProbePosters { request_id, posters } => {
            for poster in posters {
                match prober.probe(&poster.url).await {
                    Ok(()) => engine_debug!("Poster {} reachable: {}", poster.index, poster.url),
                    Err(reason) => {
                        engine_warn!(
                            "Poster {} unavailable ({}): {}",
                            poster.index,
                            reason,
                            poster.url
                        );
                        let _ = event_tx.send(EngineEvent::PosterUnavailable {
                            request_id,
                            index: poster.index,
                            reason,
                        });
                    }
                }
            }
        }
    }
}
