use std::fmt;

use kestrel_core::geometry::Size;
pub use winit::event::WindowEvent as WinitEvent;

/// A window message as seen by the window procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The application gained (nonzero payload) or lost (zero) the foreground.
    ActivateApp(usize),
    /// The user asked to close the window.
    Close,
    /// The window is being destroyed.
    Destroy,
    /// The client area changed size.
    Resized(Size<u32>),
    /// The window needs repainting.
    Paint,
    /// The message loop should end with the given exit code.
    Quit(i32),
}

impl Message {
    /// Translate a winit window event, ignoring the ones the shell has no use for.
    pub fn from_winit(event: WinitEvent) -> Option<Self> {
        match event {
            WinitEvent::Focused(focused) => Some(Message::ActivateApp(usize::from(focused))),
            WinitEvent::CloseRequested => Some(Message::Close),
            WinitEvent::Destroyed => Some(Message::Destroy),
            WinitEvent::Resized(size) => {
                Some(Message::Resized(Size::new(size.width, size.height)))
            }
            WinitEvent::RedrawRequested => Some(Message::Paint),
            other => {
                tracing::trace!("ignoring window event: {:?}", other);
                None
            }
        }
    }
}

/// The blocking wait primitive failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePumpError {
    /// The host event loop has shut down and no further messages will arrive.
    Disconnected,
    /// The host reported an error code.
    Os(u32),
}

impl fmt::Display for MessagePumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessagePumpError::Disconnected => {
                write!(f, "Failed to get message: event loop disconnected")
            }
            MessagePumpError::Os(code) => write!(f, "Failed to get message. Error: {}", code),
        }
    }
}

impl std::error::Error for MessagePumpError {}

/// Why a blocking wait returned without a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitError {
    /// A quit was posted; no more messages will be retrieved.
    Quit(i32),
    /// The wait itself failed.
    Failed(MessagePumpError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn test_focus_maps_to_activation_payload() {
        let gained = Message::from_winit(WinitEvent::Focused(true));
        let lost = Message::from_winit(WinitEvent::Focused(false));

        assert_eq!(gained, Some(Message::ActivateApp(1)));
        assert_eq!(lost, Some(Message::ActivateApp(0)));
    }

    #[test]
    fn test_lifecycle_events() {
        let cases = [
            (WinitEvent::CloseRequested, Message::Close),
            (WinitEvent::Destroyed, Message::Destroy),
            (WinitEvent::RedrawRequested, Message::Paint),
        ];

        for (event, expected) in cases {
            assert_eq!(Message::from_winit(event), Some(expected));
        }
    }

    #[test]
    fn test_resize() {
        let message = Message::from_winit(WinitEvent::Resized(PhysicalSize::new(1024, 768)));
        assert_eq!(message, Some(Message::Resized(Size::new(1024, 768))));
    }

    #[test]
    fn test_unhandled_event_is_dropped() {
        assert_eq!(Message::from_winit(WinitEvent::Occluded(true)), None);
    }

    #[test]
    fn test_pump_error_display() {
        assert!(MessagePumpError::Os(5).to_string().contains('5'));
        let disconnected = MessagePumpError::Disconnected.to_string();
        assert!(disconnected.contains("disconnected"));
    }
}
