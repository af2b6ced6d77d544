use std::collections::VecDeque;

use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardDecision<T> {
    Forward(T),
    Drop,
}

#[derive(Debug)]
pub enum Queued<T> {
    /// Queue disabled; pass the value straight through.
    Forward(T),
    Held {
        id: Uuid,
        receiver: oneshot::Receiver<ForwardDecision<T>>,
    },
}

#[derive(Debug)]
struct Pending<T> {
    id: Uuid,
    value: T,
    sender: oneshot::Sender<ForwardDecision<T>>,
}

/// Intercepted requests waiting for the operator, oldest first.
#[derive(Debug)]
pub struct ForwardQueue<T> {
    enabled: bool,
    pending: VecDeque<Pending<T>>,
}

impl<T> Default for ForwardQueue<T> {
    fn default() -> Self {
        Self {
            enabled: false,
            pending: VecDeque::new(),
        }
    }
}

impl<T> ForwardQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disabling releases everything still held, in arrival order.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.enabled {
            self.forward_all();
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn hold(&mut self, value: T) -> Queued<T> {
        if !self.enabled {
            return Queued::Forward(value);
        }
        let id = Uuid::new_v4();
        let (sender, receiver) = oneshot::channel();
        self.pending.push_back(Pending { id, value, sender });
        debug!(%id, queued = self.pending.len(), "request held");
        Queued::Held { id, receiver }
    }

    pub fn forward_one(&mut self) -> Option<Uuid> {
        let pending = self.pending.pop_front()?;
        let id = pending.id;
        let _ = pending.sender.send(ForwardDecision::Forward(pending.value));
        Some(id)
    }

    pub fn forward_all(&mut self) -> usize {
        let mut released = 0;
        while self.forward_one().is_some() {
            released += 1;
        }
        released
    }

    pub fn drop_one(&mut self) -> Option<Uuid> {
        let pending = self.pending.pop_front()?;
        let _ = pending.sender.send(ForwardDecision::Drop);
        Some(pending.id)
    }

    /// Resolves one held value by id; `Forward` may carry an edited value.
    pub fn resolve(&mut self, id: Uuid, decision: ForwardDecision<T>) -> bool {
        let Some(index) = self.pending.iter().position(|pending| pending.id == id) else {
            return false;
        };
        let Some(pending) = self.pending.remove(index) else {
            return false;
        };
        let _ = pending.sender.send(decision);
        true
    }

    pub fn peek(&self) -> Option<(Uuid, &T)> {
        self.pending.front().map(|pending| (pending.id, &pending.value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Uuid, &T)> {
        self.pending.iter().map(|pending| (pending.id, &pending.value))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
