//! Extension points for a concrete application.

/// Called synchronously from the window procedure when the application
/// gains or loses the foreground. Both default to no-ops.
pub trait LifecycleHooks {
    fn on_activated(&mut self) {}

    fn on_deactivated(&mut self) {}
}

impl LifecycleHooks for () {}

impl<H: LifecycleHooks + ?Sized> LifecycleHooks for Box<H> {
    fn on_activated(&mut self) {
        (**self).on_activated();
    }

    fn on_deactivated(&mut self) {
        (**self).on_deactivated();
    }
}

/// Hooks built from optional closures.
///
/// # Example
///
/// ```
/// use kestrel::{CallbackHooks, LifecycleHooks};
///
/// let mut hooks = CallbackHooks::new().with_deactivated(|| println!("paused"));
/// hooks.on_activated(); // no callback set, nothing happens
/// ```
#[derive(Default)]
pub struct CallbackHooks {
    activated: Option<Box<dyn FnMut()>>,
    deactivated: Option<Box<dyn FnMut()>>,
}

impl CallbackHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activated(mut self, callback: impl FnMut() + 'static) -> Self {
        self.activated = Some(Box::new(callback));
        self
    }

    pub fn with_deactivated(mut self, callback: impl FnMut() + 'static) -> Self {
        self.deactivated = Some(Box::new(callback));
        self
    }
}

impl LifecycleHooks for CallbackHooks {
    fn on_activated(&mut self) {
        if let Some(callback) = &mut self.activated {
            callback();
        }
    }

    fn on_deactivated(&mut self) {
        if let Some(callback) = &mut self.deactivated {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_callbacks_fire() {
        let activated = Rc::new(Cell::new(0));
        let deactivated = Rc::new(Cell::new(0));

        let mut hooks = CallbackHooks::new()
            .with_activated({
                let activated = activated.clone();
                move || activated.set(activated.get() + 1)
            })
            .with_deactivated({
                let deactivated = deactivated.clone();
                move || deactivated.set(deactivated.get() + 1)
            });

        hooks.on_activated();
        hooks.on_activated();
        hooks.on_deactivated();

        assert_eq!(activated.get(), 2);
        assert_eq!(deactivated.get(), 1);
    }

    #[test]
    fn test_missing_callbacks_are_noops() {
        let mut hooks = CallbackHooks::new();
        hooks.on_activated();
        hooks.on_deactivated();
    }
}
