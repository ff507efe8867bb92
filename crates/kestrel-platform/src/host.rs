//! winit-backed host platform.
//!
//! winit owns the native event loop; this module drives it one step at a time
//! through the pump-events extension so the application keeps control of its
//! own run loop.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{WindowAttributes, WindowId};

use crate::{
    class::{ClassRegistrar, ClassTable, ClassToken, WindowClassDescriptor},
    message::{Message, MessagePumpError, WaitError},
    platform::Platform,
    pump::{MessagePump, PumpControl, WindowProcedure},
    window::{Window, WindowDescriptor, WindowError, WinitWindow},
};

/// Message queue plus window bookkeeping, fed by winit callbacks.
#[derive(Default)]
struct HostState {
    queue: VecDeque<Message>,
    quit: Option<i32>,
    disconnected: bool,
    window: Option<Arc<WinitWindow>>,
    pending: Option<WindowAttributes>,
    created: Option<Result<WinitWindow, OsError>>,
}

impl HostState {
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attributes) = self.pending.take() {
            self.created = Some(event_loop.create_window(attributes));
        }
    }

    fn next_message(&mut self) -> Option<Message> {
        self.queue
            .pop_front()
            .or_else(|| self.quit.take().map(Message::Quit))
    }

    /// Whether a non-blocking poll has to pump the host for more events.
    fn needs_events(&self) -> bool {
        self.queue.is_empty() && self.quit.is_none()
    }

    /// What a blocking wait returns from the current state.
    ///
    /// Queued messages come first, then a posted quit, then disconnection.
    /// `None` means the host has to be pumped before anything can be returned.
    fn next_wait(&mut self) -> Option<Result<Message, WaitError>> {
        if let Some(message) = self.queue.pop_front() {
            return Some(Ok(message));
        }
        if let Some(code) = self.quit.take() {
            return Some(Err(WaitError::Quit(code)));
        }
        if self.disconnected {
            return Some(Err(WaitError::Failed(MessagePumpError::Disconnected)));
        }

        None
    }
}

impl ApplicationHandler for HostState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let ours = self.window.as_ref();
        if ours.is_some_and(|window| window.id() != window_id) {
            return;
        }

        if let Some(message) = Message::from_winit(event) {
            self.queue.push_back(message);
        }
    }
}

impl PumpControl for HostState {
    fn post_quit(&mut self, exit_code: i32) {
        tracing::debug!("Quit posted with exit code {}", exit_code);
        self.quit = Some(exit_code);
    }

    fn default_procedure(&mut self, message: &Message) {
        // winit has no explicit destroy; hiding the window and delivering
        // Destroy next stands in for it.
        if let Message::Close = message {
            if let Some(window) = &self.window {
                window.set_visible(false);
            }
            self.queue.push_front(Message::Destroy);
        }
    }
}

fn pump_events(event_loop: &mut EventLoop<()>, state: &mut HostState, timeout: Option<Duration>) {
    if state.disconnected {
        return;
    }

    if let PumpStatus::Exit(code) = event_loop.pump_app_events(timeout, state) {
        tracing::info!("Host event loop exited with code {}", code);
        state.disconnected = true;
        if state.quit.is_none() {
            state.quit = Some(code);
        }
    }
}

fn window_attributes(class: &ClassToken, descriptor: &WindowDescriptor) -> WindowAttributes {
    let size = PhysicalSize::new(descriptor.size.width, descriptor.size.height);
    let attributes = WinitWindow::default_attributes()
        .with_title(descriptor.title.clone())
        .with_inner_size(size)
        .with_cursor(class.cursor());

    #[cfg(target_os = "windows")]
    let attributes = {
        use winit::platform::windows::WindowAttributesExtWindows;
        attributes.with_class_name(class.name())
    };

    attributes
}

/// The host platform before the run loop starts.
pub struct WinitHost {
    event_loop: EventLoop<()>,
    state: HostState,
    classes: ClassTable,
}

impl WinitHost {
    pub fn new() -> Result<Self, WindowError> {
        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop,
            state: HostState::default(),
            classes: ClassTable::new(),
        })
    }
}

impl ClassRegistrar for WinitHost {
    fn register_class(&mut self, descriptor: &WindowClassDescriptor) -> u16 {
        self.classes.register_class(descriptor)
    }

    fn last_error(&self) -> u32 {
        self.classes.last_error()
    }
}

impl Platform for WinitHost {
    type Window = Window;
    type Pump = WinitPump;

    fn create_window(
        &mut self,
        class: &ClassToken,
        descriptor: &WindowDescriptor,
    ) -> Result<Window, WindowError> {
        if !self.classes.is_registered(class.name()) {
            return Err(WindowError::ClassNotRegistered(class.name().to_string()));
        }

        self.state.pending = Some(window_attributes(class, descriptor));

        // winit only hands out an active event loop from inside its callbacks.
        loop {
            if let Some(created) = self.state.created.take() {
                let window = Arc::new(created?);
                self.state.window = Some(window.clone());
                tracing::info!(
                    "Created window '{}' ({}x{})",
                    descriptor.title,
                    descriptor.size.width,
                    descriptor.size.height
                );
                return Ok(Window::new(window, descriptor));
            }

            if self.state.disconnected {
                self.state.pending = None;
                return Err(WindowError::EventLoop(
                    "event loop exited before the window was created".to_string(),
                ));
            }

            pump_events(&mut self.event_loop, &mut self.state, Some(Duration::ZERO));
        }
    }

    fn into_message_pump(self, procedure: Box<dyn WindowProcedure>) -> WinitPump {
        WinitPump {
            event_loop: self.event_loop,
            state: self.state,
            procedure,
        }
    }
}

/// The running host, driving one window procedure.
pub struct WinitPump {
    event_loop: EventLoop<()>,
    state: HostState,
    procedure: Box<dyn WindowProcedure>,
}

impl MessagePump for WinitPump {
    fn poll(&mut self) -> Option<Message> {
        if self.state.needs_events() {
            pump_events(&mut self.event_loop, &mut self.state, Some(Duration::ZERO));
        }

        self.state.next_message()
    }

    fn wait(&mut self) -> Result<Message, WaitError> {
        loop {
            if let Some(result) = self.state.next_wait() {
                return result;
            }

            pump_events(&mut self.event_loop, &mut self.state, None);
        }
    }

    fn translate(&mut self, _message: &Message) {
        // winit attaches text to key events itself; there is nothing to derive.
    }

    fn dispatch(&mut self, message: &Message) {
        self.procedure.handle(&mut self.state, message);
    }

    fn post_quit(&mut self, exit_code: i32) {
        self.state.post_quit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_is_delivered_after_pending_messages() {
        let mut state = HostState::default();
        state.queue.push_back(Message::Paint);
        state.post_quit(3);

        assert_eq!(state.next_message(), Some(Message::Paint));
        assert_eq!(state.next_message(), Some(Message::Quit(3)));
        assert_eq!(state.next_message(), None);
    }

    #[test]
    fn test_default_close_destroys_next() {
        let mut state = HostState::default();
        state.queue.push_back(Message::Paint);

        state.default_procedure(&Message::Close);

        assert_eq!(state.next_message(), Some(Message::Destroy));
        assert_eq!(state.next_message(), Some(Message::Paint));
    }

    #[test]
    fn test_default_procedure_ignores_other_messages() {
        let mut state = HostState::default();
        state.default_procedure(&Message::ActivateApp(1));
        state.default_procedure(&Message::Destroy);

        assert!(state.queue.is_empty());
        assert!(state.quit.is_none());
    }

    #[test]
    fn test_wait_holds_quit_until_queue_drains() {
        let mut state = HostState::default();
        state.queue.push_back(Message::Paint);
        state.queue.push_back(Message::ActivateApp(0));
        state.post_quit(4);

        assert_eq!(state.next_wait(), Some(Ok(Message::Paint)));
        assert_eq!(state.next_wait(), Some(Ok(Message::ActivateApp(0))));
        assert_eq!(state.next_wait(), Some(Err(WaitError::Quit(4))));
        assert_eq!(state.next_wait(), None);
    }

    #[test]
    fn test_wait_on_disconnected_host_fails() {
        let mut state = HostState {
            disconnected: true,
            ..Default::default()
        };

        let expected = Err(WaitError::Failed(MessagePumpError::Disconnected));
        assert_eq!(state.next_wait(), Some(expected.clone()));
        // Stays failed; the host never produces another message.
        assert_eq!(state.next_wait(), Some(expected));
    }

    #[test]
    fn test_wait_prefers_quit_over_disconnection() {
        let mut state = HostState {
            disconnected: true,
            ..Default::default()
        };
        state.post_quit(0);

        assert_eq!(state.next_wait(), Some(Err(WaitError::Quit(0))));
    }

    #[test]
    fn test_empty_state_has_nothing_to_wait_for() {
        let mut state = HostState::default();

        assert!(state.needs_events());
        assert_eq!(state.next_wait(), None);
    }

    #[test]
    fn test_poll_skips_pumping_while_quit_is_pending() {
        let mut state = HostState::default();
        state.post_quit(2);

        assert!(!state.needs_events());
        assert_eq!(state.next_message(), Some(Message::Quit(2)));
        assert!(state.needs_events());
    }
}
