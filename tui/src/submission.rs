//! Background Submissions
//!
//! Each prompt runs on its own tokio task so the render loop never waits on
//! the network. Finished responses come back over an unbounded channel that
//! the loop drains once per frame. Results are applied in arrival order, so
//! with overlapping submissions the one that finishes last wins.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use gem3d_core::{ApiKey, ResponseFetcher, ResponseText, Transport};

/// Monotonic id of one submission, for logs
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmissionId(u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Spawns fetches and collects their results
pub struct Submitter<T: Transport + 'static> {
    fetcher: Arc<ResponseFetcher<T>>,
    api_key: Option<ApiKey>,
    tx: mpsc::UnboundedSender<(SubmissionId, ResponseText)>,
    rx: mpsc::UnboundedReceiver<(SubmissionId, ResponseText)>,
    next_id: u64,
    in_flight: usize,
}

impl<T: Transport + 'static> Submitter<T> {
    /// Create a submitter; the key is read once by the caller and reused
    pub fn new(fetcher: ResponseFetcher<T>, api_key: Option<ApiKey>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            fetcher: Arc::new(fetcher),
            api_key,
            tx,
            rx,
            next_id: 0,
            in_flight: 0,
        }
    }

    /// Whether a credential was found at startup
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Number of submissions whose result has not been collected yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start fetching a response for `prompt`
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self, prompt: String) -> SubmissionId {
        let id = SubmissionId(self.next_id);
        self.next_id += 1;
        self.in_flight += 1;

        tracing::info!(submission = %id, prompt_len = prompt.len(), "Submitting prompt");

        let fetcher = Arc::clone(&self.fetcher);
        let api_key = self.api_key.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let text = fetcher.fetch_response(&prompt, api_key.as_ref()).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send((id, text));
        });

        id
    }

    /// Drain finished submissions without blocking
    ///
    /// Returns the most recently arrived response, if any arrived.
    pub fn poll(&mut self) -> Option<ResponseText> {
        let mut latest = None;
        while let Ok((id, text)) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            tracing::debug!(submission = %id, "Response arrived");
            latest = Some(text);
        }
        latest
    }

    /// Wait for the next finished submission
    pub async fn next(&mut self) -> Option<(SubmissionId, ResponseText)> {
        let item = self.rx.recv().await;
        if item.is_some() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        item
    }
}
