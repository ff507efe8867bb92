use kestrel_core::profiling::profile_function;

use crate::{
    backend::{Backend, BackendPreference},
    error::PresentError,
};

/// The active GPU device: exactly one of the two backend variants.
pub enum GraphicsDevice<P, F> {
    Primary(P),
    Fallback(F),
}

impl<P, F> GraphicsDevice<P, F>
where
    P: Backend,
    F: Backend,
{
    /// The variant in use, expressed as the preference that selects it directly.
    pub fn variant(&self) -> BackendPreference {
        match self {
            GraphicsDevice::Primary(_) => BackendPreference::Primary,
            GraphicsDevice::Fallback(_) => BackendPreference::Fallback,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            GraphicsDevice::Primary(_) => P::NAME,
            GraphicsDevice::Fallback(_) => F::NAME,
        }
    }

    pub fn present(&mut self) -> Result<(), PresentError> {
        profile_function!();
        match self {
            GraphicsDevice::Primary(backend) => backend.present(),
            GraphicsDevice::Fallback(backend) => backend.present(),
        }
    }

    pub fn dispose(&mut self) {
        match self {
            GraphicsDevice::Primary(backend) => backend.dispose(),
            GraphicsDevice::Fallback(backend) => backend.dispose(),
        }
    }

    pub fn as_primary(&self) -> Option<&P> {
        match self {
            GraphicsDevice::Primary(backend) => Some(backend),
            GraphicsDevice::Fallback(_) => None,
        }
    }

    pub fn as_fallback(&self) -> Option<&F> {
        match self {
            GraphicsDevice::Primary(_) => None,
            GraphicsDevice::Fallback(backend) => Some(backend),
        }
    }
}

impl<P, F> std::fmt::Debug for GraphicsDevice<P, F>
where
    P: Backend,
    F: Backend,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("GraphicsDevice")
            .field(&self.backend_name())
            .finish()
    }
}
