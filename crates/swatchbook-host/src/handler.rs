// ABOUTME: Request handler trait and the sequential loop that drives it
// ABOUTME: Each request is handled to completion before the next one is received

use async_trait::async_trait;
use swatchbook_logging::{debug, info};
use tokio::sync::mpsc;

use crate::error::{HostError, Result};
use crate::protocol::{HostRequest, HostResponse};

/// Handles host requests, producing the responses to send back in order
#[async_trait]
pub trait RequestHandler: Send {
    async fn handle(&mut self, request: HostRequest) -> Result<Vec<HostResponse>>;

    /// Handle several requests in order, stopping after a `Closed` response
    async fn handle_batch(&mut self, requests: Vec<HostRequest>) -> Result<Vec<HostResponse>> {
        let mut responses = Vec::new();
        for request in requests {
            let batch = self.handle(request).await?;
            let closed = batch.iter().any(HostResponse::is_closed);
            responses.extend(batch);
            if closed {
                break;
            }
        }
        Ok(responses)
    }
}

/// Drive `handler` until the request channel ends or a request closes the session.
///
/// A handler error is reported to the host as a notification; only a closed
/// response channel ends the loop with an error.
pub async fn run<H: RequestHandler>(
    handler: &mut H,
    mut requests: mpsc::Receiver<HostRequest>,
    responses: mpsc::Sender<HostResponse>,
) -> Result<()> {
    while let Some(request) = requests.recv().await {
        debug!(request = ?request, "Handling host request");

        let batch = match handler.handle(request).await {
            Ok(batch) => batch,
            Err(err) => vec![HostResponse::notify(err.to_string())],
        };

        let mut closed = false;
        for response in batch {
            closed |= response.is_closed();
            responses
                .send(response)
                .await
                .map_err(|_| HostError::ChannelClosed)?;
        }

        if closed {
            info!("Host session closed");
            return Ok(());
        }
    }

    debug!("Host request channel ended");
    Ok(())
}
