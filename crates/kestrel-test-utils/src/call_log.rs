//! Ordered record of calls made into the mocks.

use std::sync::Arc;

use kestrel_platform::Message;
use parking_lot::Mutex;

/// A call observed by one of the mocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    RegisterClass(String),
    CreateWindow(String),
    ProbeBackend(&'static str),
    CreateBackend {
        backend: &'static str,
        validation: bool,
    },
    Present(&'static str),
    Dispose(&'static str),
    Poll,
    Wait,
    Translate(Message),
    Dispatch(Message),
    PostQuit(i32),
    DefaultProcedure(Message),
    /// Pushed by test hooks when the application is activated.
    Activated,
    /// Pushed by test hooks when the application is deactivated.
    Deactivated,
}

/// Shared call log.
///
/// # Borrow Checking Pattern: Interior Mutability
///
/// Mocks are owned by different parts of the application (the pump, the
/// device, the window) but all record into the same log. The log is an
/// `Arc<Mutex<..>>` so each mock holds a cheap clone and records through `&self`.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.calls.lock().push(call);
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        let calls = self.calls.lock();
        calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn count_presents(&self) -> usize {
        self.count(|call| matches!(call, Call::Present(_)))
    }

    pub fn count_polls(&self) -> usize {
        self.count(|call| matches!(call, Call::Poll))
    }

    pub fn count_waits(&self) -> usize {
        self.count(|call| matches!(call, Call::Wait))
    }

    pub fn count_dispatches(&self) -> usize {
        self.count(|call| matches!(call, Call::Dispatch(_)))
    }

    /// Index of the first call matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.lock().iter().position(predicate)
    }

    /// Calls recorded after the first call matching `predicate`.
    pub fn calls_after(&self, predicate: impl Fn(&Call) -> bool) -> Vec<Call> {
        let calls = self.calls.lock();
        match calls.iter().position(predicate) {
            Some(index) => calls[index + 1..].to_vec(),
            None => Vec::new(),
        }
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_storage() {
        let log = CallLog::new();
        let clone = log.clone();

        clone.push(Call::Poll);
        clone.push(Call::Present("Mock"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.count_presents(), 1);
    }

    #[test]
    fn test_calls_after() {
        let log = CallLog::new();
        log.push(Call::Present("A"));
        log.push(Call::Deactivated);
        log.push(Call::Wait);

        let after = log.calls_after(|call| *call == Call::Deactivated);
        assert_eq!(after, vec![Call::Wait]);
        assert!(log.calls_after(|call| *call == Call::Activated).is_empty());
    }
}
