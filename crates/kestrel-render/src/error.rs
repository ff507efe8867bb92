use std::fmt;

/// A backend could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceInitializationError {
    /// The window could not be turned into a presentation surface.
    Surface {
        backend: &'static str,
        message: String,
    },
    /// No adapter on this backend can drive the surface.
    NoAdapter {
        backend: &'static str,
        message: String,
    },
    /// The adapter refused to create a logical device.
    Device {
        backend: &'static str,
        message: String,
    },
    /// The surface has no usable configuration on the chosen adapter.
    UnsupportedSurface { backend: &'static str },
}

impl DeviceInitializationError {
    pub fn backend(&self) -> &'static str {
        match self {
            DeviceInitializationError::Surface { backend, .. }
            | DeviceInitializationError::NoAdapter { backend, .. }
            | DeviceInitializationError::Device { backend, .. }
            | DeviceInitializationError::UnsupportedSurface { backend } => backend,
        }
    }
}

impl fmt::Display for DeviceInitializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceInitializationError::Surface { backend, message } => {
                write!(f, "[{}] Failed to create surface: {}", backend, message)
            }
            DeviceInitializationError::NoAdapter { backend, message } => {
                write!(f, "[{}] No suitable GPU adapter: {}", backend, message)
            }
            DeviceInitializationError::Device { backend, message } => {
                write!(f, "[{}] Failed to create device: {}", backend, message)
            }
            DeviceInitializationError::UnsupportedSurface { backend } => {
                write!(f, "[{}] Surface is not supported by the adapter", backend)
            }
        }
    }
}

impl std::error::Error for DeviceInitializationError {}

/// Presenting a frame failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentError {
    /// The swapchain could not provide or accept a frame.
    Surface {
        backend: &'static str,
        message: String,
    },
    /// The device was already disposed.
    Disposed { backend: &'static str },
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::Surface { backend, message } => {
                write!(f, "[{}] Failed to present frame: {}", backend, message)
            }
            PresentError::Disposed { backend } => {
                write!(f, "[{}] Present called on a disposed device", backend)
            }
        }
    }
}

impl std::error::Error for PresentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name_is_reported() {
        let err = DeviceInitializationError::UnsupportedSurface { backend: "Modern" };
        assert_eq!(err.backend(), "Modern");
        assert!(err.to_string().contains("[Modern]"));
    }

    #[test]
    fn test_present_error_display() {
        let err = PresentError::Disposed { backend: "Compat" };
        assert!(err.to_string().contains("disposed"));
    }
}
