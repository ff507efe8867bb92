//! The graphics device capability.

use crate::error::{DeviceInitializationError, PresentError};

/// Which backend variant to instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendPreference {
    #[default]
    Primary,
    Fallback,
}

/// One of the interchangeable GPU backends.
pub trait Backend: Sized {
    /// Window type the backend presents into.
    type Window: ?Sized;

    /// Short name used in logs and errors.
    const NAME: &'static str;

    /// Create the backend for `window`.
    ///
    /// `validation` enables the API's debug and validation layers.
    fn create(window: &Self::Window, validation: bool) -> Result<Self, DeviceInitializationError>;

    /// Present the next frame.
    fn present(&mut self) -> Result<(), PresentError>;

    /// Release GPU resources. Calling this more than once is a no-op.
    fn dispose(&mut self);
}

/// A backend that can be probed before construction and downgraded from.
pub trait ProbedBackend: Backend {
    fn is_supported() -> bool;
}
