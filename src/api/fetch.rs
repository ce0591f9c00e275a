use std::collections::HashMap;
use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Tracks the in-flight fetch of each widget.
///
/// Starting a fetch for a widget cancels the one before it, so a slow stale
/// result can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct FetchRegistry {
    root: CancellationToken,
    next_generation: u64,
    in_flight: HashMap<String, (u64, CancellationToken)>,
}

impl FetchRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket for `widget_id`, cancelling its previous fetch.
    pub fn begin(&mut self, widget_id: &str) -> FetchTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        let token = self.root.child_token();
        if let Some((stale, previous)) = self
            .in_flight
            .insert(widget_id.to_owned(), (generation, token.clone()))
        {
            debug!(widget_id, stale_generation = stale, "superseded in-flight fetch");
            previous.cancel();
        }
        FetchTicket {
            widget_id: widget_id.to_owned(),
            generation,
            token,
        }
    }

    /// Cancels the fetch of one widget. Returns whether one was in flight.
    pub fn cancel(&mut self, widget_id: &str) -> bool {
        match self.in_flight.remove(widget_id) {
            Some((_, token)) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancels every fetch; used on teardown. The registry stays usable.
    pub fn cancel_all(&mut self) {
        self.root.cancel();
        self.in_flight.clear();
        self.root = CancellationToken::new();
    }

    /// Forgets a finished ticket if it is still the current one.
    pub fn complete(&mut self, ticket: &FetchTicket) {
        if self
            .in_flight
            .get(&ticket.widget_id)
            .is_some_and(|(generation, _)| *generation == ticket.generation)
        {
            self.in_flight.remove(&ticket.widget_id);
        }
    }

    #[must_use]
    pub fn is_pending(&self, widget_id: &str) -> bool {
        self.in_flight.contains_key(widget_id)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.in_flight.len()
    }
}

/// Handle for one widget fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    widget_id: String,
    generation: u64,
    token: CancellationToken,
}

impl FetchTicket {
    #[must_use]
    pub fn widget_id(&self) -> &str {
        &self.widget_id
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Runs `future` until it finishes or the ticket is cancelled.
    pub async fn run<F>(&self, future: F) -> Option<F::Output>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            () = self.token.cancelled() => {
                debug!(widget_id = %self.widget_id, generation = self.generation, "fetch cancelled");
                None
            }
            output = future => Some(output),
        }
    }

    /// Hands `result` to `apply` only while the ticket is live.
    pub fn commit<T>(&self, result: T, apply: impl FnOnce(T)) -> bool {
        if !self.is_live() {
            debug!(
                widget_id = %self.widget_id,
                generation = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }
        apply(result);
        true
    }
}
