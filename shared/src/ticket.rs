//! Ordering of in-flight requests.
//!
//! Responses may arrive in any order. A page takes a [`Ticket`] when it starts a
//! request and applies the result only while that ticket is still the newest one.
//! [`InFlight`] keeps one key from being submitted twice.

/// Handle for one started request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSeq {
    issued: u64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request. Every earlier ticket becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Marks every outstanding ticket stale without starting a new request.
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }
}

/// Keys with a request in flight. A key cannot be started twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight<K> {
    keys: Vec<K>,
}

impl<K> Default for InFlight<K> {
    fn default() -> Self {
        Self { keys: Vec::new() }
    }
}

impl<K: PartialEq> InFlight<K> {
    /// `false` when `key` is already in flight.
    pub fn start(&mut self, key: K) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    pub fn finish(&mut self, key: &K) {
        self.keys.retain(|k| k != key);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }
}
