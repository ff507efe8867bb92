use kestrel_core::geometry::Size;
use kestrel_platform::{
    WindowClassDescriptor, WindowDescriptor, class::DEFAULT_CLASS_NAME, window::DEFAULT_TITLE,
};
use kestrel_render::BackendPreference;

/// Startup configuration for an [`Application`](crate::Application).
///
/// # Example
///
/// ```
/// use kestrel::{AppConfig, BackendPreference};
///
/// let config = AppConfig::new()
///     .with_title("Demo")
///     .with_size(1280, 720)
///     .with_backend(BackendPreference::Fallback)
///     .with_validation(false);
///
/// assert_eq!(config.title, "Demo");
/// assert_eq!(config.backend, BackendPreference::Fallback);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub title: String,
    pub size: Size<u32>,
    pub backend: BackendPreference,
    /// Enable GPU debug and validation layers.
    ///
    /// Defaults to on in debug builds and off in release builds.
    pub validation: bool,
    pub class_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            size: kestrel_platform::window::DEFAULT_SIZE,
            backend: BackendPreference::Primary,
            validation: cfg!(debug_assertions),
            class_name: DEFAULT_CLASS_NAME.to_string(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_backend(mut self, backend: BackendPreference) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub(crate) fn class_descriptor(&self) -> WindowClassDescriptor {
        WindowClassDescriptor::new(self.class_name.clone())
    }

    pub(crate) fn window_descriptor(&self) -> WindowDescriptor {
        WindowDescriptor::new(self.title.clone(), self.size.width, self.size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Kestrel");
        assert_eq!(config.size, Size::new(800, 600));
        assert_eq!(config.backend, BackendPreference::Primary);
        assert_eq!(config.validation, cfg!(debug_assertions));
        assert_eq!(config.class_name, "KestrelWindow");
    }

    #[test]
    fn test_descriptors_follow_config() {
        let config = AppConfig::new()
            .with_title("T")
            .with_size(320, 240)
            .with_class_name("C");
        let expected = WindowDescriptor::new("T", 320, 240);

        assert_eq!(config.window_descriptor(), expected);
        assert_eq!(config.class_descriptor().class_name, "C");
    }
}
