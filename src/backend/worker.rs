//! Request dispatch to a search backend.
//!
//! The coordinator submits requests and later drains completions. Two
//! dispatchers are provided:
//! - `SearchWorker`: serves requests on a background thread (used by the TUI)
//! - `InlineDispatch`: serves requests synchronously on submit (used in tests
//!   and for deterministic harness runs)

use super::{SearchBackend, SearchRequest};
use crate::model::{BackendError, ResultPage};
use std::collections::VecDeque;
use std::fmt;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Monotonically increasing request identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out request ids in increasing order.
#[derive(Debug, Default)]
pub(crate) struct IdSequence(u64);

impl IdSequence {
    pub(crate) fn next(&mut self) -> RequestId {
        self.0 += 1;
        RequestId(self.0)
    }
}

/// A finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCompletion {
    /// Id handed out by `submit`.
    pub id: RequestId,
    /// Page or the backend failure.
    pub result: Result<ResultPage, BackendError>,
}

/// Submits requests and yields their completions.
pub trait SearchDispatch {
    /// Queue a request.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Unavailable` if the request cannot be queued.
    fn submit(&mut self, request: SearchRequest) -> Result<RequestId, BackendError>;

    /// Take the next finished request without blocking.
    fn try_recv(&mut self) -> Option<SearchCompletion>;
}

// ===== InlineDispatch =====

/// Runs each request on the calling thread at submit time.
#[derive(Debug)]
pub struct InlineDispatch<B> {
    backend: B,
    ids: IdSequence,
    completed: VecDeque<SearchCompletion>,
}

impl<B: SearchBackend> InlineDispatch<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ids: IdSequence::default(),
            completed: VecDeque::new(),
        }
    }
}

impl<B: SearchBackend> SearchDispatch for InlineDispatch<B> {
    fn submit(&mut self, request: SearchRequest) -> Result<RequestId, BackendError> {
        let id = self.ids.next();
        let result = self.backend.search(&request);
        self.completed.push_back(SearchCompletion { id, result });
        Ok(id)
    }

    fn try_recv(&mut self) -> Option<SearchCompletion> {
        self.completed.pop_front()
    }
}

// ===== SearchWorker =====

/// Upper bound on simulated latency so the wait deadline cannot overflow.
const MAX_LATENCY: Duration = Duration::from_secs(3600);

/// Serves requests on a background thread.
///
/// When several requests are queued, only the newest is executed; the
/// coordinator would discard the older responses anyway. If the thread dies
/// with a request outstanding, that request completes once with
/// `BackendError::Unavailable`.
#[derive(Debug)]
pub struct SearchWorker {
    request_tx: Option<Sender<(RequestId, SearchRequest)>>,
    completion_rx: Receiver<SearchCompletion>,
    ids: IdSequence,
    /// Newest submitted id not yet answered
    outstanding: Option<RequestId>,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    /// Spawn the worker thread.
    ///
    /// `latency` is slept before each request to simulate a remote backend.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the thread cannot be spawned.
    pub fn spawn<B>(backend: B, latency: Duration) -> std::io::Result<Self>
    where
        B: SearchBackend + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<(RequestId, SearchRequest)>();
        let (completion_tx, completion_rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("rpager-search".to_string())
            .spawn(move || serve(backend, latency.min(MAX_LATENCY), request_rx, completion_tx))?;

        Ok(Self {
            request_tx: Some(request_tx),
            completion_rx,
            ids: IdSequence::default(),
            outstanding: None,
            handle: Some(handle),
        })
    }

    /// Block until the next completion arrives or `timeout` elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SearchCompletion> {
        self.completion_rx.recv_timeout(timeout).ok()
    }
}

fn serve<B: SearchBackend>(
    backend: B,
    latency: Duration,
    request_rx: Receiver<(RequestId, SearchRequest)>,
    completion_tx: Sender<SearchCompletion>,
) {
    while let Ok(mut next) = request_rx.recv() {
        let deadline = Instant::now() + latency;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match request_rx.recv_timeout(remaining) {
                Ok(newer) => {
                    debug!(skipped = %next.0, "Superseded search request skipped");
                    next = newer;
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("Search worker stopped during latency");
                    return;
                }
            }
        }

        // Collapse anything queued behind this request
        while let Ok(newer) = request_rx.try_recv() {
            debug!(skipped = %next.0, "Superseded search request skipped");
            next = newer;
        }

        let (id, request) = next;
        let result = backend.search(&request);
        if completion_tx.send(SearchCompletion { id, result }).is_err() {
            break;
        }
    }
    debug!("Search worker exiting");
}

impl SearchDispatch for SearchWorker {
    fn submit(&mut self, request: SearchRequest) -> Result<RequestId, BackendError> {
        let id = self.ids.next();
        let tx = self
            .request_tx
            .as_ref()
            .ok_or_else(|| BackendError::Unavailable("worker stopped".to_string()))?;
        tx.send((id, request))
            .map_err(|_| BackendError::Unavailable("worker thread exited".to_string()))?;
        debug!(id = %id, "Search request submitted");
        self.outstanding = Some(id);
        Ok(id)
    }

    fn try_recv(&mut self) -> Option<SearchCompletion> {
        match self.completion_rx.try_recv() {
            Ok(completion) => {
                if self.outstanding == Some(completion.id) {
                    self.outstanding = None;
                }
                Some(completion)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Later submits fail fast instead of queueing into a dead channel
                if self.request_tx.take().is_some() {
                    warn!("Search worker disconnected");
                }
                let id = self.outstanding.take()?;
                Some(SearchCompletion {
                    id,
                    result: Err(BackendError::Unavailable(
                        "worker thread exited".to_string(),
                    )),
                })
            }
        }
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        // Closing the channel ends the serve loop
        self.request_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Search worker panicked");
            }
        }
    }
}
