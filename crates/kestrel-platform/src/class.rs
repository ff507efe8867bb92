//! Window class registration.
//!
//! A window class is the reusable behaviour template every window is created
//! from. It must be registered with the host exactly once per process before
//! any window of that class exists; registration is never undone.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU16;

pub use winit::window::CursorIcon;

/// Default class name used by the application shell.
pub const DEFAULT_CLASS_NAME: &str = "KestrelWindow";

/// First atom handed out for registered classes.
pub const FIRST_CLASS_ATOM: u16 = 0xC000;

/// Last-error code reported for malformed descriptors.
pub const ERROR_INVALID_PARAMETER: u32 = 87;

/// Last-error code reported when the atom range is exhausted.
pub const ERROR_NOT_ENOUGH_MEMORY: u32 = 8;

bitflags::bitflags! {
    /// Class style flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassStyle: u32 {
        /// Redraw the whole client area when the height changes.
        const VREDRAW = 0x0001;
        /// Redraw the whole client area when the width changes.
        const HREDRAW = 0x0002;
        /// Each window gets its own device context.
        const OWNDC = 0x0020;
    }
}

/// Handle of the process that owns a window class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleHandle(pub u32);

impl ModuleHandle {
    /// Handle of the running process.
    pub fn current() -> Self {
        ModuleHandle(std::process::id())
    }
}

/// Everything the host needs to register a window class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClassDescriptor {
    pub style: ClassStyle,
    pub instance: ModuleHandle,
    pub cursor: CursorIcon,
    pub class_name: String,
}

impl WindowClassDescriptor {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }
}

impl Default for WindowClassDescriptor {
    fn default() -> Self {
        Self {
            style: ClassStyle::HREDRAW | ClassStyle::VREDRAW | ClassStyle::OWNDC,
            instance: ModuleHandle::current(),
            cursor: CursorIcon::Default,
            class_name: DEFAULT_CLASS_NAME.to_string(),
        }
    }
}

/// Proof that a class was registered. Windows can only be created from one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassToken {
    atom: NonZeroU16,
    name: String,
    cursor: CursorIcon,
}

impl ClassToken {
    pub fn atom(&self) -> u16 {
        self.atom.get()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }
}

/// The host-side class table.
///
/// Mirrors the OS contract: a zero atom means failure, and the reason is
/// available from [`ClassRegistrar::last_error`].
pub trait ClassRegistrar {
    fn register_class(&mut self, descriptor: &WindowClassDescriptor) -> u16;

    fn last_error(&self) -> u32;
}

/// Window class registration failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationError {
    pub class_name: String,
    pub code: u32,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to register window class '{}'. Error: {}",
            self.class_name, self.code
        )
    }
}

impl std::error::Error for RegistrationError {}

pub struct WindowClassRegistry;

impl WindowClassRegistry {
    /// Register `descriptor` with the host.
    ///
    /// A zero atom is turned into a [`RegistrationError`] carrying the host's
    /// last-error code. Retrying with the same descriptor cannot succeed.
    pub fn register<R>(
        registrar: &mut R,
        descriptor: &WindowClassDescriptor,
    ) -> Result<ClassToken, RegistrationError>
    where
        R: ClassRegistrar + ?Sized,
    {
        let atom = registrar.register_class(descriptor);

        match NonZeroU16::new(atom) {
            Some(atom) => {
                tracing::debug!(
                    "Registered window class '{}' (atom {:#06x})",
                    descriptor.class_name,
                    atom
                );
                Ok(ClassToken {
                    atom,
                    name: descriptor.class_name.clone(),
                    cursor: descriptor.cursor,
                })
            }
            None => {
                let code = registrar.last_error();
                tracing::error!(
                    "Window class '{}' was rejected by the host (error {})",
                    descriptor.class_name,
                    code
                );
                Err(RegistrationError {
                    class_name: descriptor.class_name.clone(),
                    code,
                })
            }
        }
    }
}

/// In-process class table used by the winit host.
#[derive(Debug)]
pub struct ClassTable {
    classes: HashMap<String, u16>,
    next_atom: Option<u16>,
    last_error: u32,
}

impl ClassTable {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
            next_atom: Some(FIRST_CLASS_ATOM),
            last_error: 0,
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for ClassTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistrar for ClassTable {
    fn register_class(&mut self, descriptor: &WindowClassDescriptor) -> u16 {
        if descriptor.class_name.is_empty() {
            self.last_error = ERROR_INVALID_PARAMETER;
            return 0;
        }

        if let Some(&atom) = self.classes.get(&descriptor.class_name) {
            return atom;
        }

        let Some(atom) = self.next_atom else {
            self.last_error = ERROR_NOT_ENOUGH_MEMORY;
            return 0;
        };

        self.next_atom = atom.checked_add(1);
        self.classes.insert(descriptor.class_name.clone(), atom);
        atom
    }

    fn last_error(&self) -> u32 {
        self.last_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectingRegistrar(u32);

    impl ClassRegistrar for RejectingRegistrar {
        fn register_class(&mut self, _descriptor: &WindowClassDescriptor) -> u16 {
            0
        }

        fn last_error(&self) -> u32 {
            self.0
        }
    }

    fn named(name: &str) -> WindowClassDescriptor {
        WindowClassDescriptor::new(name)
    }

    #[test]
    fn test_default_descriptor() {
        let descriptor = WindowClassDescriptor::default();
        let style = ClassStyle::HREDRAW | ClassStyle::VREDRAW | ClassStyle::OWNDC;

        assert_eq!(descriptor.class_name, DEFAULT_CLASS_NAME);
        assert_eq!(descriptor.style, style);
        assert_eq!(descriptor.cursor, CursorIcon::Default);
        assert_eq!(descriptor.instance, ModuleHandle::current());
    }

    #[test]
    fn test_register_returns_token() {
        let mut table = ClassTable::new();
        let descriptor = WindowClassDescriptor::default();
        let token = WindowClassRegistry::register(&mut table, &descriptor).unwrap();

        assert_eq!(token.atom(), FIRST_CLASS_ATOM);
        assert_eq!(token.name(), DEFAULT_CLASS_NAME);
        assert!(table.is_registered(DEFAULT_CLASS_NAME));
    }

    #[test]
    fn test_same_name_reuses_atom() {
        let mut table = ClassTable::new();
        let descriptor = WindowClassDescriptor::new("Main");

        let first = WindowClassRegistry::register(&mut table, &descriptor).unwrap();
        let second = WindowClassRegistry::register(&mut table, &descriptor).unwrap();

        assert_eq!(first.atom(), second.atom());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_distinct_names_get_distinct_atoms() {
        let mut table = ClassTable::new();
        let a = WindowClassRegistry::register(&mut table, &named("A")).unwrap();
        let b = WindowClassRegistry::register(&mut table, &named("B")).unwrap();

        assert_ne!(a.atom(), b.atom());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut table = ClassTable::new();
        let err = WindowClassRegistry::register(&mut table, &named("")).unwrap_err();

        assert_eq!(err.code, ERROR_INVALID_PARAMETER);
        assert!(table.is_empty());
    }

    #[test]
    fn test_zero_atom_surfaces_last_error() {
        let mut registrar = RejectingRegistrar(1410);
        let descriptor = WindowClassDescriptor::default();
        let err = WindowClassRegistry::register(&mut registrar, &descriptor).unwrap_err();

        assert_eq!(err.code, 1410);
        assert_eq!(err.class_name, DEFAULT_CLASS_NAME);
        assert!(err.to_string().contains("1410"));
    }

    #[test]
    fn test_atom_range_exhaustion() {
        let mut table = ClassTable::new();
        table.next_atom = Some(u16::MAX);

        assert_eq!(table.register_class(&named("Last")), u16::MAX);
        assert_eq!(table.register_class(&named("Overflow")), 0);
        assert_eq!(table.last_error(), ERROR_NOT_ENOUGH_MEMORY);
    }

    #[test]
    fn test_redraw_styles_use_host_values() {
        // VREDRAW follows height changes, HREDRAW follows width changes.
        assert_eq!(ClassStyle::VREDRAW.bits(), 0x0001);
        assert_eq!(ClassStyle::HREDRAW.bits(), 0x0002);
        assert_eq!(ClassStyle::OWNDC.bits(), 0x0020);
    }
}
