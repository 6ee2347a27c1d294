// Latest-wins gate for in-flight requests issued from the same control.

use std::future::Future;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Each `issue` supersedes every earlier ticket. A future run under a
/// superseded ticket is dropped and yields `None`, so a stale result can
/// never be applied after a newer request started.
#[derive(Debug)]
pub struct RequestGate {
    latest: watch::Sender<u64>,
}

impl RequestGate {
    pub fn new() -> RequestGate {
        let (latest, _) = watch::channel(0);
        RequestGate { latest }
    }

    pub fn issue(&self) -> Ticket {
        let mut id = 0;
        self.latest.send_modify(|current| {
            *current += 1;
            id = *current;
        });
        Ticket(id)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        *self.latest.borrow() == ticket.0
    }

    pub async fn run<F: Future>(&self, ticket: Ticket, fut: F) -> Option<F::Output> {
        let mut rx = self.latest.subscribe();
        if *rx.borrow_and_update() != ticket.0 {
            return None;
        }

        tokio::pin!(fut);
        loop {
            tokio::select! {
                out = &mut fut => {
                    return self.is_current(ticket).then_some(out);
                }
                changed = rx.changed() => {
                    if changed.is_err() || *rx.borrow_and_update() != ticket.0 {
                        debug!("Request {} superseded, abandoning", ticket.0);
                        return None;
                    }
                }
            }
        }
    }
}

impl Default for RequestGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn current_ticket_gets_its_result() {
        let gate = RequestGate::new();
        let t = gate.issue();
        assert_eq!(gate.run(t, async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn stale_ticket_is_refused_up_front() {
        let gate = RequestGate::new();
        let old = gate.issue();
        let _new = gate.issue();
        assert!(!gate.is_current(old));
        assert_eq!(gate.run(old, async { 1 }).await, None);
    }

    #[tokio::test]
    async fn newer_request_abandons_in_flight_one() {
        let gate = Arc::new(RequestGate::new());
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let first = gate.issue();
        let g = gate.clone();
        let in_flight = tokio::spawn(async move {
            g.run(first, async move {
                let _ = release_rx.await;
                "stale"
            })
            .await
        });

        tokio::task::yield_now().await;
        let second = gate.issue();
        let _ = release_tx.send(());

        assert_eq!(in_flight.await.unwrap(), None);
        assert_eq!(gate.run(second, async { "fresh" }).await, Some("fresh"));
    }
}
