//! The application shell: one window, one graphics device, one run loop.
//!
//! [`Application::new`] performs the whole startup sequence (class
//! registration, window creation, device selection) and hands the window
//! procedure to the host's message pump. [`Application::run`] then alternates
//! between draining messages and presenting frames until a quit arrives.
//!
//! # Run loop
//!
//! While [`LifecycleState::Running`], each iteration polls for at most one
//! message without blocking, dispatches it, and presents exactly one frame.
//! While [`LifecycleState::Paused`], the loop blocks on the next message and
//! presents nothing, so a backgrounded application stays idle.
//!
//! The frame is presented only if the state is still Running after dispatch.
//! A loop that presents unconditionally after dispatch would render one more
//! frame after a deactivation; here the message that pauses the application
//! also cancels that iteration's frame, and a quit skips it as well.

use kestrel_core::profiling::{self, profile_function};
use kestrel_platform::{
    ClassToken, Message, MessagePump, MessagePumpError, Platform, WaitError, WindowClassRegistry,
};
use kestrel_render::{Backend, GraphicsDevice, GraphicsDeviceSelector, PresentError, ProbedBackend};

use crate::{
    config::AppConfig,
    error::AppError,
    hooks::LifecycleHooks,
    lifecycle::{LifecycleProcedure, LifecycleState, SharedState},
};

/// Why [`Application::run`] returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// A quit message arrived with this exit code.
    Quit(i32),
    /// Blocking on the next message failed. The loop stops as if a quit arrived.
    PumpFailed(MessagePumpError),
}

impl ExitReason {
    /// Process exit code for this reason.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExitReason::Quit(code) => *code,
            ExitReason::PumpFailed(_) => 1,
        }
    }
}

pub struct Application<P, Pr, Fb>
where
    P: Platform,
    Pr: ProbedBackend<Window = P::Window>,
    Fb: Backend<Window = P::Window>,
{
    class: ClassToken,
    window: P::Window,
    device: GraphicsDevice<Pr, Fb>,
    pump: P::Pump,
    state: SharedState,
    exit_reason: Option<ExitReason>,
    disposed: bool,
}

impl<P, Pr, Fb> Application<P, Pr, Fb>
where
    P: Platform,
    Pr: ProbedBackend<Window = P::Window>,
    Fb: Backend<Window = P::Window>,
{
    /// Register the window class, create the main window and select a device.
    ///
    /// Any failure aborts startup; nothing created before it is kept.
    pub fn new(
        mut platform: P,
        config: &AppConfig,
        hooks: impl LifecycleHooks + 'static,
    ) -> Result<Self, AppError> {
        profile_function!();

        let class = WindowClassRegistry::register(&mut platform, &config.class_descriptor())?;
        let window = platform.create_window(&class, &config.window_descriptor())?;
        let (backend, validation) = (config.backend, config.validation);
        let device = GraphicsDeviceSelector::select::<Pr, Fb>(backend, &window, validation)?;

        let state = SharedState::default();
        let procedure = LifecycleProcedure::new(state.clone(), hooks);
        let pump = platform.into_message_pump(Box::new(procedure));

        tracing::info!(
            "Application '{}' started on the {} device",
            config.title,
            device.backend_name()
        );

        Ok(Self {
            class,
            window,
            device,
            pump,
            state,
            exit_reason: None,
            disposed: false,
        })
    }

    /// Run until a quit arrives or the pump fails.
    ///
    /// Once the loop has exited, further calls return the same reason without
    /// touching the pump. A failed present is returned as
    /// [`AppError::Present`] and leaves the state as it was.
    pub fn run(&mut self) -> Result<ExitReason, AppError> {
        profile_function!();

        if let Some(reason) = &self.exit_reason {
            return Ok(reason.clone());
        }

        loop {
            match self.state.get() {
                LifecycleState::Running => {
                    if let Some(message) = self.pump.poll() {
                        self.pump.translate(&message);
                        self.pump.dispatch(&message);

                        if let Message::Quit(code) = message {
                            return Ok(self.exit(ExitReason::Quit(code)));
                        }
                    }

                    // A deactivation dispatched above pauses rendering immediately.
                    if self.state.get().is_running() {
                        self.tick()?;
                    }
                }
                LifecycleState::Paused => match self.pump.wait() {
                    Ok(Message::Quit(code)) | Err(WaitError::Quit(code)) => {
                        return Ok(self.exit(ExitReason::Quit(code)));
                    }
                    Ok(message) => {
                        self.pump.translate(&message);
                        self.pump.dispatch(&message);
                    }
                    Err(WaitError::Failed(err)) => {
                        tracing::error!("Message pump failed: {}", err);
                        return Ok(self.exit(ExitReason::PumpFailed(err)));
                    }
                },
                LifecycleState::ExitRequested => {
                    // The procedure never enters this state; treat it as a clean quit.
                    return Ok(self.exit(ExitReason::Quit(0)));
                }
            }
        }
    }

    /// Present one frame.
    pub fn tick(&mut self) -> Result<(), PresentError> {
        profile_function!();
        profiling::new_frame();
        self.device.present()
    }

    /// Release the graphics device. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        self.disposed = true;
        self.device.dispose();
        tracing::debug!("Application disposed");
    }

    fn exit(&mut self, reason: ExitReason) -> ExitReason {
        self.state.set(LifecycleState::ExitRequested);
        tracing::info!("Exiting: {:?}", reason);
        self.exit_reason = Some(reason.clone());
        reason
    }

    pub fn state(&self) -> LifecycleState {
        self.state.get()
    }

    pub fn exit_reason(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    pub fn class(&self) -> &ClassToken {
        &self.class
    }

    pub fn window(&self) -> &P::Window {
        &self.window
    }

    pub fn device(&self) -> &GraphicsDevice<Pr, Fb> {
        &self.device
    }
}

impl<P, Pr, Fb> Drop for Application<P, Pr, Fb>
where
    P: Platform,
    Pr: ProbedBackend<Window = P::Window>,
    Fb: Backend<Window = P::Window>,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
