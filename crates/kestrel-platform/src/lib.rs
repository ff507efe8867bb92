pub mod class;
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub mod host;
pub mod message;
pub mod platform;
pub mod pump;
pub mod window;

pub use class::{
    ClassRegistrar, ClassToken, RegistrationError, WindowClassDescriptor, WindowClassRegistry,
};
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub use host::{WinitHost, WinitPump};
pub use message::{Message, MessagePumpError, WaitError};
pub use platform::Platform;
pub use pump::{MessagePump, PumpControl, WindowProcedure};
pub use window::{Window, WindowDescriptor, WindowError};
