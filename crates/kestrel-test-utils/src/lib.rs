//! Test utilities for Kestrel.
//!
//! This crate provides mocks for everything the application lifecycle talks
//! to, so the state machine can be driven deterministically without a window
//! system or a GPU.
//!
//! # Overview
//!
//! - [`CallLog`] - Shared, ordered record of every call made into the mocks
//! - `MockPlatform` - Class registrar, window factory and pump factory (requires `mock` feature)
//! - `MockPump` - Scripted message pump (requires `mock` feature)
//! - `MockPrimary` / `MockFallback` - Backends that record presents (requires `mock` feature)
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use kestrel_platform::{Message, MessagePump, Platform, PumpControl};
//! use kestrel_test_utils::{MockPlatform, PumpEntry};
//!
//! let platform = MockPlatform::new().with_script([PumpEntry::Idle, Message::Paint.into()]);
//! let log = platform.log();
//! let procedure = |_: &mut dyn PumpControl, _: &Message| {};
//! let mut pump = platform.into_message_pump(Box::new(procedure));
//!
//! assert_eq!(pump.poll(), None);
//! assert_eq!(pump.poll(), Some(Message::Paint));
//! assert_eq!(log.count_polls(), 2);
//! # }
//! ```
//!
//! # Design
//!
//! All mocks share one [`CallLog`] (an `Arc<Mutex<Vec<Call>>>`), so a test can
//! assert the relative order of pump, procedure and device calls.

pub mod call_log;
#[cfg(feature = "mock")]
pub mod mock_backend;
#[cfg(feature = "mock")]
pub mod mock_platform;

pub use call_log::*;
#[cfg(feature = "mock")]
pub use mock_backend::*;
#[cfg(feature = "mock")]
pub use mock_platform::*;
