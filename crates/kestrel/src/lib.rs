//! Kestrel - a minimal graphics application shell
//!
//! Kestrel opens one window, picks one GPU device for it and drives a run loop
//! that interleaves message pumping with frame presentation. It provides:
//!
//! - **Window classes**: Registered once before the window is created
//! - **Device selection**: A primary backend with an automatic fallback
//! - **Lifecycle**: Pauses rendering while the application is in the background
//! - **Hooks**: Activation callbacks for the concrete application
//!
//! # Quick Start
//!
//! ```no_run
//! use kestrel::{AppConfig, WinitApplication};
//! use kestrel::platform::WinitHost;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     kestrel::core::logging::init();
//!
//!     let host = WinitHost::new()?;
//!     let mut app = WinitApplication::new(host, &AppConfig::new().with_title("Hello"), ())?;
//!     let reason = app.run()?;
//!
//!     std::process::exit(reason.exit_code());
//! }
//! ```
//!
//! # Architecture
//!
//! [`Application`] is generic over the host [`Platform`](platform::Platform)
//! and the two graphics backends, so the same lifecycle runs against winit and
//! wgpu in production and against the mocks in `kestrel-test-utils` in tests.

pub mod application;
pub mod config;
pub mod error;
pub mod hooks;
pub mod lifecycle;

pub use application::{Application, ExitReason};
pub use config::AppConfig;
pub use error::AppError;
pub use hooks::{CallbackHooks, LifecycleHooks};
pub use kestrel_render::BackendPreference;
pub use lifecycle::LifecycleState;

pub use kestrel_core as core;
pub use kestrel_platform as platform;
pub use kestrel_render as render;

/// The application type used with the winit host and the wgpu backends.
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub type WinitApplication = Application<
    kestrel_platform::WinitHost,
    kestrel_render::ModernBackend,
    kestrel_render::CompatBackend,
>;
