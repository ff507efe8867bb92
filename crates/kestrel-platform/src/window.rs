use std::fmt;
use std::sync::Arc;

use kestrel_core::geometry::Size;
pub use winit::window::Window as WinitWindow;

pub const DEFAULT_TITLE: &str = "Kestrel";
pub const DEFAULT_SIZE: Size<u32> = Size::new(800, 600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDescriptor {
    pub title: String,
    pub size: Size<u32>,
}

impl WindowDescriptor {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            size: Size::new(width, height),
        }
    }
}

impl Default for WindowDescriptor {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            size: DEFAULT_SIZE,
        }
    }
}

/// The application's single top-level window.
pub struct Window {
    window: Arc<WinitWindow>,
    title: String,
    size: Size<u32>,
}

impl Window {
    pub(crate) fn new(window: Arc<WinitWindow>, descriptor: &WindowDescriptor) -> Self {
        Self {
            window,
            title: descriptor.title.clone(),
            size: descriptor.size,
        }
    }

    pub fn id(&self) -> winit::window::WindowId {
        self.window.id()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Size requested at creation.
    pub fn size(&self) -> Size<u32> {
        self.size
    }

    /// Current client area in physical pixels.
    pub fn inner_size(&self) -> Size<u32> {
        let size = self.window.inner_size();
        Size::new(size.width, size.height)
    }

    /// Shared native handle, usable as a surface target.
    pub fn handle(&self) -> &Arc<WinitWindow> {
        &self.window
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.window.id())
            .field("title", &self.title)
            .field("size", &self.size)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// No class with this name has been registered.
    ClassNotRegistered(String),
    /// The host refused to create the window.
    Os(String),
    /// The host event loop could not be created or has already exited.
    EventLoop(String),
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::ClassNotRegistered(name) => {
                write!(f, "Window class '{}' is not registered", name)
            }
            WindowError::Os(msg) => write!(f, "Failed to create window: {}", msg),
            WindowError::EventLoop(msg) => write!(f, "Event loop error: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

impl From<winit::error::OsError> for WindowError {
    fn from(err: winit::error::OsError) -> Self {
        WindowError::Os(err.to_string())
    }
}

impl From<winit::error::EventLoopError> for WindowError {
    fn from(err: winit::error::EventLoopError) -> Self {
        WindowError::EventLoop(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_descriptor() {
        let descriptor = WindowDescriptor::default();
        assert_eq!(descriptor.title, DEFAULT_TITLE);
        assert_eq!(descriptor.size, Size::new(800, 600));
    }

    #[test]
    fn test_descriptor_new() {
        let descriptor = WindowDescriptor::new("Demo", 1280, 720);
        assert_eq!(descriptor.title, "Demo");
        assert_eq!(descriptor.size, Size::new(1280, 720));
    }

    #[test]
    fn test_error_display() {
        let err = WindowError::ClassNotRegistered("Missing".into());
        assert!(err.to_string().contains("Missing"));
    }
}
