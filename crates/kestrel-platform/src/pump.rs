//! The message pump abstraction.
//!
//! The pump owns the window procedure it was constructed with; dispatching a
//! message hands it to that procedure together with a [`PumpControl`] the
//! procedure can use to post a quit or fall back to default handling.

use crate::message::{Message, WaitError};

/// Operations a window procedure may perform on the pump that is dispatching to it.
pub trait PumpControl {
    /// Queue a quit. It is retrieved after every message already pending.
    fn post_quit(&mut self, exit_code: i32);

    /// Default handling for a message the procedure does not fully own.
    fn default_procedure(&mut self, message: &Message);
}

/// Receives every dispatched message.
pub trait WindowProcedure {
    fn handle(&mut self, pump: &mut dyn PumpControl, message: &Message);
}

impl<F> WindowProcedure for F
where
    F: FnMut(&mut dyn PumpControl, &Message),
{
    fn handle(&mut self, pump: &mut dyn PumpControl, message: &Message) {
        self(pump, message)
    }
}

pub trait MessagePump {
    /// Retrieve the next pending message without blocking.
    fn poll(&mut self) -> Option<Message>;

    /// Block until a message is available.
    ///
    /// Returns [`WaitError::Quit`] once a posted quit is reached.
    fn wait(&mut self) -> Result<Message, WaitError>;

    /// Produce derived messages (e.g. character input) from `message`.
    fn translate(&mut self, message: &Message);

    /// Deliver `message` to the installed window procedure.
    fn dispatch(&mut self, message: &Message);

    fn post_quit(&mut self, exit_code: i32);
}
