//! Errors surfaced by [`Application`](crate::Application).

use std::fmt;

use kestrel_platform::{RegistrationError, WindowError};
use kestrel_render::{DeviceInitializationError, PresentError};

/// Anything that stops the application from starting or keeps it from running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The window class could not be registered.
    Registration(RegistrationError),
    /// The host refused to create the main window.
    Window(WindowError),
    /// The selected graphics backend failed to initialize.
    Device(DeviceInitializationError),
    /// A frame could not be presented.
    Present(PresentError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Registration(e) => write!(f, "Startup failed: {}", e),
            AppError::Window(e) => write!(f, "Startup failed: {}", e),
            AppError::Device(e) => write!(f, "Startup failed: {}", e),
            AppError::Present(e) => write!(f, "Frame failed: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Registration(e) => Some(e),
            AppError::Window(e) => Some(e),
            AppError::Device(e) => Some(e),
            AppError::Present(e) => Some(e),
        }
    }
}

impl From<RegistrationError> for AppError {
    fn from(e: RegistrationError) -> Self {
        AppError::Registration(e)
    }
}

impl From<WindowError> for AppError {
    fn from(e: WindowError) -> Self {
        AppError::Window(e)
    }
}

impl From<DeviceInitializationError> for AppError {
    fn from(e: DeviceInitializationError) -> Self {
        AppError::Device(e)
    }
}

impl From<PresentError> for AppError {
    fn from(e: PresentError) -> Self {
        AppError::Present(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_source_is_inner_error() {
        let inner = PresentError::Disposed { backend: "Modern" };
        let err = AppError::from(inner.clone());

        assert_eq!(err, AppError::Present(inner.clone()));
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source, Some(inner.to_string()));
    }

    #[test]
    fn test_display_wraps_inner_message() {
        let inner = DeviceInitializationError::UnsupportedSurface { backend: "Compat" };
        let err = AppError::from(inner.clone());

        assert!(err.to_string().contains(&inner.to_string()));
    }
}
