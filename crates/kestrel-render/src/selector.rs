use crate::{
    backend::{Backend, BackendPreference, ProbedBackend},
    device::GraphicsDevice,
    error::DeviceInitializationError,
};

pub struct GraphicsDeviceSelector;

impl GraphicsDeviceSelector {
    /// Instantiate the backend for `preference`.
    ///
    /// A primary preference on a machine where `P` is unsupported is quietly
    /// downgraded to the fallback. Construction errors are returned as-is;
    /// there is no second fallback.
    pub fn select<P, F>(
        preference: BackendPreference,
        window: &P::Window,
        validation: bool,
    ) -> Result<GraphicsDevice<P, F>, DeviceInitializationError>
    where
        P: ProbedBackend,
        F: Backend<Window = P::Window>,
    {
        let resolved = match preference {
            BackendPreference::Primary if !P::is_supported() => {
                tracing::info!(
                    "{} backend is not supported on this system, falling back to {}",
                    P::NAME,
                    F::NAME
                );
                BackendPreference::Fallback
            }
            other => other,
        };

        let device = match resolved {
            BackendPreference::Primary => GraphicsDevice::Primary(P::create(window, validation)?),
            BackendPreference::Fallback => GraphicsDevice::Fallback(F::create(window, validation)?),
        };

        tracing::info!(
            "Selected {} graphics device (validation: {})",
            device.backend_name(),
            validation
        );

        Ok(device)
    }
}
