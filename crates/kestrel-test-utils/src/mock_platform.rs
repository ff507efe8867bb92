//! Mock platform and message pump.
//!
//! The pump replays a script of [`PumpEntry`]s instead of reading OS input.

use std::collections::VecDeque;

use kestrel_core::geometry::Size;
use kestrel_platform::{
    ClassRegistrar, ClassToken, Message, MessagePump, MessagePumpError, Platform, PumpControl,
    WaitError, WindowClassDescriptor, WindowDescriptor, WindowError, WindowProcedure,
};

use crate::{
    call_log::{Call, CallLog},
    mock_backend::{MockBehavior, set_primary_supported},
};

/// Exit code reported when a script runs out while the loop is still polling.
pub const EXHAUSTED_EXIT_CODE: i32 = -1;

/// One step of scripted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpEntry {
    /// A message arrives.
    Message(Message),
    /// Nothing is pending for one poll. A blocking wait skips over it.
    Idle,
    /// The blocking wait fails. A poll treats it like [`PumpEntry::Idle`].
    Fail(MessagePumpError),
    /// The host itself hands back a quit message, as a real pump does once
    /// the quit reaches the front of its queue.
    Quit(i32),
}

impl From<Message> for PumpEntry {
    fn from(message: Message) -> Self {
        PumpEntry::Message(message)
    }
}

/// Window handed out by [`MockPlatform`].
///
/// Backends created for it share its log and behavior.
#[derive(Debug, Clone)]
pub struct MockWindow {
    pub title: String,
    pub size: Size<u32>,
    pub log: CallLog,
    pub behavior: MockBehavior,
}

/// State the window procedure can reach through [`PumpControl`].
struct MockControl {
    log: CallLog,
    pending: VecDeque<Message>,
    quit: Option<i32>,
}

impl PumpControl for MockControl {
    fn post_quit(&mut self, exit_code: i32) {
        self.log.push(Call::PostQuit(exit_code));
        self.quit = Some(exit_code);
    }

    fn default_procedure(&mut self, message: &Message) {
        self.log.push(Call::DefaultProcedure(message.clone()));
        if let Message::Close = message {
            self.pending.push_front(Message::Destroy);
        }
    }
}

/// Scripted message pump.
///
/// Messages produced by the default procedure come first, then a posted quit,
/// then the remaining script. Scripted input after a quit is treated as having
/// arrived too late to be seen.
///
/// A script that runs out while the loop is running yields
/// `Quit(EXHAUSTED_EXIT_CODE)` from `poll` and `Disconnected` from `wait`, so
/// a badly written test ends instead of spinning.
pub struct MockPump {
    script: VecDeque<PumpEntry>,
    control: MockControl,
    procedure: Box<dyn WindowProcedure>,
}

impl MockPump {
    pub fn new(
        script: impl IntoIterator<Item = PumpEntry>,
        log: CallLog,
        procedure: Box<dyn WindowProcedure>,
    ) -> Self {
        Self {
            script: script.into_iter().collect(),
            control: MockControl {
                log,
                pending: VecDeque::new(),
                quit: None,
            },
            procedure,
        }
    }

    /// Scripted entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl MessagePump for MockPump {
    fn poll(&mut self) -> Option<Message> {
        self.control.log.push(Call::Poll);

        if let Some(message) = self.control.pending.pop_front() {
            return Some(message);
        }
        if let Some(code) = self.control.quit.take() {
            return Some(Message::Quit(code));
        }

        match self.script.pop_front() {
            Some(PumpEntry::Message(message)) => Some(message),
            Some(PumpEntry::Quit(code)) => Some(Message::Quit(code)),
            Some(PumpEntry::Idle | PumpEntry::Fail(_)) => None,
            None => {
                tracing::warn!("mock pump script exhausted while polling");
                Some(Message::Quit(EXHAUSTED_EXIT_CODE))
            }
        }
    }

    fn wait(&mut self) -> Result<Message, WaitError> {
        self.control.log.push(Call::Wait);

        if let Some(message) = self.control.pending.pop_front() {
            return Ok(message);
        }
        if let Some(code) = self.control.quit.take() {
            return Err(WaitError::Quit(code));
        }

        loop {
            match self.script.pop_front() {
                Some(PumpEntry::Message(message)) => return Ok(message),
                Some(PumpEntry::Quit(code)) => return Ok(Message::Quit(code)),
                Some(PumpEntry::Idle) => continue,
                Some(PumpEntry::Fail(err)) => return Err(WaitError::Failed(err)),
                None => return Err(WaitError::Failed(MessagePumpError::Disconnected)),
            }
        }
    }

    fn translate(&mut self, message: &Message) {
        self.control.log.push(Call::Translate(message.clone()));
    }

    fn dispatch(&mut self, message: &Message) {
        self.control.log.push(Call::Dispatch(message.clone()));
        self.procedure.handle(&mut self.control, message);
    }

    fn post_quit(&mut self, exit_code: i32) {
        self.control.post_quit(exit_code);
    }
}

/// Mock host platform.
///
/// # Example
///
/// ```rust
/// use kestrel_platform::{WindowClassDescriptor, WindowClassRegistry};
/// use kestrel_test_utils::MockPlatform;
///
/// let mut platform = MockPlatform::new().with_atom(0).with_last_error(1410);
/// let descriptor = WindowClassDescriptor::default();
/// let err = WindowClassRegistry::register(&mut platform, &descriptor).unwrap_err();
/// assert_eq!(err.code, 1410);
/// ```
pub struct MockPlatform {
    log: CallLog,
    behavior: MockBehavior,
    atom: u16,
    last_error: u32,
    registered: Vec<String>,
    script: Vec<PumpEntry>,
}

impl MockPlatform {
    /// Platform that registers classes, supports the primary backend and has an empty script.
    pub fn new() -> Self {
        let log = CallLog::new();
        set_primary_supported(true, Some(log.clone()));

        Self {
            log,
            behavior: MockBehavior::default(),
            atom: 0xC000,
            last_error: 0,
            registered: Vec::new(),
            script: Vec::new(),
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Atom returned by class registration. Zero makes registration fail.
    pub fn with_atom(mut self, atom: u16) -> Self {
        self.atom = atom;
        self
    }

    pub fn with_last_error(mut self, code: u32) -> Self {
        self.last_error = code;
        self
    }

    /// Result of the primary backend's support probe on this thread.
    pub fn with_primary_supported(self, supported: bool) -> Self {
        set_primary_supported(supported, Some(self.log.clone()));
        self
    }

    pub fn with_behavior(mut self, behavior: MockBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_script(mut self, script: impl IntoIterator<Item = PumpEntry>) -> Self {
        self.script.extend(script);
        self
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistrar for MockPlatform {
    fn register_class(&mut self, descriptor: &WindowClassDescriptor) -> u16 {
        let name = descriptor.class_name.clone();
        self.log.push(Call::RegisterClass(name));
        if self.atom != 0 {
            self.registered.push(descriptor.class_name.clone());
        }
        self.atom
    }

    fn last_error(&self) -> u32 {
        self.last_error
    }
}

impl Platform for MockPlatform {
    type Window = MockWindow;
    type Pump = MockPump;

    fn create_window(
        &mut self,
        class: &ClassToken,
        descriptor: &WindowDescriptor,
    ) -> Result<MockWindow, WindowError> {
        if !self.registered.iter().any(|name| name == class.name()) {
            return Err(WindowError::ClassNotRegistered(class.name().to_string()));
        }

        self.log.push(Call::CreateWindow(descriptor.title.clone()));
        Ok(MockWindow {
            title: descriptor.title.clone(),
            size: descriptor.size,
            log: self.log.clone(),
            behavior: self.behavior.clone(),
        })
    }

    fn into_message_pump(self, procedure: Box<dyn WindowProcedure>) -> MockPump {
        MockPump::new(self.script, self.log, procedure)
    }
}
