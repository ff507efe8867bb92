//! Graphics device selection for Kestrel.
//!
//! The application holds exactly one [`GraphicsDevice`], chosen at startup by
//! [`GraphicsDeviceSelector`] from two interchangeable [`Backend`]s.

pub mod backend;
pub mod device;
pub mod error;
pub mod selector;
pub mod wgpu_backend;

pub use backend::{Backend, BackendPreference, ProbedBackend};
pub use device::GraphicsDevice;
pub use error::{DeviceInitializationError, PresentError};
pub use selector::GraphicsDeviceSelector;
pub use wgpu_backend::{CompatBackend, ModernBackend};
