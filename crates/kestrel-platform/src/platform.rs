use crate::{
    class::{ClassRegistrar, ClassToken},
    pump::{MessagePump, WindowProcedure},
    window::{WindowDescriptor, WindowError},
};

/// A host windowing system.
///
/// Setup runs in a fixed order: register the class, create the window, then
/// turn the host into a message pump driving the supplied window procedure.
pub trait Platform: ClassRegistrar {
    type Window;
    type Pump: MessagePump;

    fn create_window(
        &mut self,
        class: &ClassToken,
        descriptor: &WindowDescriptor,
    ) -> Result<Self::Window, WindowError>;

    fn into_message_pump(self, procedure: Box<dyn WindowProcedure>) -> Self::Pump;
}
