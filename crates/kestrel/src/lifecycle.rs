//! The activation state machine and the window procedure that drives it.

use std::cell::Cell;
use std::rc::Rc;

use kestrel_platform::{Message, PumpControl, WindowProcedure};

use crate::hooks::LifecycleHooks;

/// Exit code posted when the window is destroyed.
pub const DESTROY_EXIT_CODE: i32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    /// Foreground: messages are polled and a frame is presented every iteration.
    #[default]
    Running,
    /// Background: the loop blocks on the next message and renders nothing.
    Paused,
    /// Terminal. The run loop has stopped.
    ExitRequested,
}

impl LifecycleState {
    pub const fn is_running(self) -> bool {
        matches!(self, LifecycleState::Running)
    }

    pub const fn is_exit_requested(self) -> bool {
        matches!(self, LifecycleState::ExitRequested)
    }
}

/// State shared between the run loop and the window procedure.
///
/// Both live on the run-loop thread, so `Rc<Cell<_>>` is enough.
pub(crate) type SharedState = Rc<Cell<LifecycleState>>;

/// Window procedure installed in the message pump.
pub(crate) struct LifecycleProcedure<H> {
    state: SharedState,
    hooks: H,
}

impl<H: LifecycleHooks> LifecycleProcedure<H> {
    pub(crate) fn new(state: SharedState, hooks: H) -> Self {
        Self { state, hooks }
    }

    fn activate(&mut self, payload: usize) {
        // The run loop owns the terminal state; a late activation must not revive it.
        if self.state.get().is_exit_requested() {
            return;
        }

        if payload != 0 {
            tracing::debug!("Application activated");
            self.state.set(LifecycleState::Running);
            self.hooks.on_activated();
        } else {
            tracing::debug!("Application deactivated, pausing");
            self.state.set(LifecycleState::Paused);
            self.hooks.on_deactivated();
        }
    }
}

impl<H: LifecycleHooks> WindowProcedure for LifecycleProcedure<H> {
    fn handle(&mut self, pump: &mut dyn PumpControl, message: &Message) {
        match message {
            Message::ActivateApp(payload) => self.activate(*payload),
            Message::Destroy => {
                tracing::debug!("Window destroyed, posting quit");
                pump.post_quit(DESTROY_EXIT_CODE);
            }
            _ => {}
        }

        pump.default_procedure(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingPump {
        quits: Vec<i32>,
        defaults: Vec<Message>,
    }

    impl PumpControl for RecordingPump {
        fn post_quit(&mut self, exit_code: i32) {
            self.quits.push(exit_code);
        }

        fn default_procedure(&mut self, message: &Message) {
            self.defaults.push(message.clone());
        }
    }

    #[derive(Default)]
    struct CountingHooks {
        activated: usize,
        deactivated: usize,
    }

    impl LifecycleHooks for CountingHooks {
        fn on_activated(&mut self) {
            self.activated += 1;
        }

        fn on_deactivated(&mut self) {
            self.deactivated += 1;
        }
    }

    fn procedure() -> (LifecycleProcedure<CountingHooks>, SharedState) {
        let state = SharedState::default();
        let hooks = CountingHooks::default();
        (LifecycleProcedure::new(state.clone(), hooks), state)
    }

    #[test]
    fn test_initial_state_is_running() {
        assert_eq!(LifecycleState::default(), LifecycleState::Running);
    }

    #[test]
    fn test_nonzero_payload_activates() {
        let (mut procedure, state) = procedure();
        let mut pump = RecordingPump::default();
        state.set(LifecycleState::Paused);

        procedure.handle(&mut pump, &Message::ActivateApp(7));

        assert_eq!(state.get(), LifecycleState::Running);
        assert_eq!(procedure.hooks.activated, 1);
        assert_eq!(procedure.hooks.deactivated, 0);
    }

    #[test]
    fn test_zero_payload_pauses() {
        let (mut procedure, state) = procedure();
        let mut pump = RecordingPump::default();

        procedure.handle(&mut pump, &Message::ActivateApp(0));

        assert_eq!(state.get(), LifecycleState::Paused);
        assert_eq!(procedure.hooks.deactivated, 1);
        assert_eq!(procedure.hooks.activated, 0);
    }

    #[test]
    fn test_repeated_events_call_hook_each_time() {
        let (mut procedure, state) = procedure();
        let mut pump = RecordingPump::default();

        procedure.handle(&mut pump, &Message::ActivateApp(0));
        procedure.handle(&mut pump, &Message::ActivateApp(0));

        assert_eq!(state.get(), LifecycleState::Paused);
        assert_eq!(procedure.hooks.deactivated, 2);
    }

    #[test]
    fn test_last_activation_wins() {
        let sequences: [&[usize]; 5] = [&[0], &[1, 0], &[0, 0, 1], &[1, 1, 0, 3], &[0, 2, 0]];

        for sequence in sequences {
            let (mut procedure, state) = procedure();
            let mut pump = RecordingPump::default();

            for &payload in sequence {
                procedure.handle(&mut pump, &Message::ActivateApp(payload));
            }

            let expected = if *sequence.last().unwrap() != 0 {
                LifecycleState::Running
            } else {
                LifecycleState::Paused
            };
            assert_eq!(state.get(), expected, "sequence {:?}", sequence);

            let nonzero = sequence.iter().filter(|&&p| p != 0).count();
            assert_eq!(procedure.hooks.activated, nonzero);
            assert_eq!(procedure.hooks.deactivated, sequence.len() - nonzero);
        }
    }

    #[test]
    fn test_destroy_posts_quit_without_changing_state() {
        let (mut procedure, state) = procedure();
        let mut pump = RecordingPump::default();

        procedure.handle(&mut pump, &Message::Destroy);

        assert_eq!(pump.quits, vec![DESTROY_EXIT_CODE]);
        assert_eq!(state.get(), LifecycleState::Running);
    }

    #[test]
    fn test_every_message_reaches_default_procedure() {
        let (mut procedure, _state) = procedure();
        let mut pump = RecordingPump::default();
        let messages = [
            Message::ActivateApp(1),
            Message::Close,
            Message::Destroy,
            Message::Paint,
        ];

        for message in &messages {
            procedure.handle(&mut pump, message);
        }

        assert_eq!(pump.defaults, messages);
    }

    #[test]
    fn test_activation_after_exit_is_ignored() {
        let (mut procedure, state) = procedure();
        let mut pump = RecordingPump::default();
        state.set(LifecycleState::ExitRequested);

        procedure.handle(&mut pump, &Message::ActivateApp(1));

        assert_eq!(state.get(), LifecycleState::ExitRequested);
        assert_eq!(procedure.hooks.activated, 0);
    }
}
