//! Mock graphics backends.

use std::cell::{Cell, RefCell};

use kestrel_render::{Backend, DeviceInitializationError, PresentError, ProbedBackend};

use crate::{
    call_log::{Call, CallLog},
    mock_platform::MockWindow,
};

thread_local! {
    static PRIMARY_SUPPORTED: Cell<bool> = const { Cell::new(true) };
    static PROBE_LOG: RefCell<Option<CallLog>> = const { RefCell::new(None) };
}

/// Set the result of [`MockPrimary::is_supported`] for the current thread.
///
/// The probe is static, so the answer lives in thread-local storage; each
/// test runs on its own thread.
pub fn set_primary_supported(supported: bool, log: Option<CallLog>) {
    PRIMARY_SUPPORTED.with(|cell| cell.set(supported));
    PROBE_LOG.with(|cell| *cell.borrow_mut() = log);
}

/// Failure injection for mock backends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockBehavior {
    pub fail_primary_init: bool,
    pub fail_fallback_init: bool,
    /// The n-th present (1-based, counted per device) fails.
    pub fail_present_at: Option<usize>,
}

/// Backend that records its calls. `PRIMARY` picks which variant it plays.
pub struct MockBackend<const PRIMARY: bool> {
    log: CallLog,
    fail_present_at: Option<usize>,
    validation: bool,
    presents: usize,
    disposed: bool,
}

pub type MockPrimary = MockBackend<true>;
pub type MockFallback = MockBackend<false>;

impl<const PRIMARY: bool> MockBackend<PRIMARY> {
    pub fn validation(&self) -> bool {
        self.validation
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<const PRIMARY: bool> Backend for MockBackend<PRIMARY> {
    type Window = MockWindow;
    const NAME: &'static str = if PRIMARY {
        "MockPrimary"
    } else {
        "MockFallback"
    };

    fn create(window: &MockWindow, validation: bool) -> Result<Self, DeviceInitializationError> {
        window.log.push(Call::CreateBackend {
            backend: Self::NAME,
            validation,
        });

        let fail = if PRIMARY {
            window.behavior.fail_primary_init
        } else {
            window.behavior.fail_fallback_init
        };
        if fail {
            return Err(DeviceInitializationError::Device {
                backend: Self::NAME,
                message: "injected failure".to_string(),
            });
        }

        Ok(Self {
            log: window.log.clone(),
            fail_present_at: window.behavior.fail_present_at,
            validation,
            presents: 0,
            disposed: false,
        })
    }

    fn present(&mut self) -> Result<(), PresentError> {
        if self.disposed {
            return Err(PresentError::Disposed {
                backend: Self::NAME,
            });
        }

        self.presents += 1;
        self.log.push(Call::Present(Self::NAME));

        if self.fail_present_at == Some(self.presents) {
            return Err(PresentError::Surface {
                backend: Self::NAME,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.log.push(Call::Dispose(Self::NAME));
        }
    }
}

impl ProbedBackend for MockPrimary {
    fn is_supported() -> bool {
        PROBE_LOG.with(|cell| {
            if let Some(log) = cell.borrow().as_ref() {
                log.push(Call::ProbeBackend(Self::NAME));
            }
        });
        PRIMARY_SUPPORTED.with(Cell::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::geometry::Size;

    fn window(behavior: MockBehavior) -> MockWindow {
        MockWindow {
            title: "Test".into(),
            size: Size::new(800, 600),
            log: CallLog::new(),
            behavior,
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(MockPrimary::NAME, "MockPrimary");
        assert_eq!(MockFallback::NAME, "MockFallback");
    }

    #[test]
    fn test_present_failure_injection() {
        let window = window(MockBehavior {
            fail_present_at: Some(2),
            ..Default::default()
        });
        let mut backend = MockFallback::create(&window, false).unwrap();

        assert!(backend.present().is_ok());
        assert!(backend.present().is_err());
        assert_eq!(window.log.count_presents(), 2);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let window = window(MockBehavior::default());
        let mut backend = MockPrimary::create(&window, true).unwrap();

        backend.dispose();
        backend.dispose();

        assert!(backend.is_disposed());
        assert_eq!(window.log.count(|call| matches!(call, Call::Dispose(_))), 1);
        let result = backend.present();
        assert!(matches!(result, Err(PresentError::Disposed { .. })));
    }

    #[test]
    fn test_support_reads_thread_local() {
        set_primary_supported(false, None);
        assert!(!MockPrimary::is_supported());
        set_primary_supported(true, None);
        assert!(MockPrimary::is_supported());
    }
}
