//! wgpu implementations of the two backend variants.
//!
//! [`ModernBackend`] targets the explicit APIs (Vulkan, Metal, DX12) and is the
//! primary choice; [`CompatBackend`] targets GL and is used when no modern
//! adapter exists.

use std::sync::Arc;

use kestrel_core::{geometry::Size, profiling::profile_function};
use kestrel_platform::window::{Window, WinitWindow};

use crate::{
    backend::{Backend, ProbedBackend},
    error::{DeviceInitializationError, PresentError},
};

/// Color every frame is cleared to.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.15,
    a: 1.0,
};

fn instance_flags(validation: bool) -> wgpu::InstanceFlags {
    if validation {
        wgpu::InstanceFlags::debugging()
    } else {
        wgpu::InstanceFlags::empty()
    }
}

/// Surface, device and queue for one window.
struct SurfaceDevice {
    name: &'static str,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    window: Arc<WinitWindow>,
}

impl SurfaceDevice {
    fn new(
        name: &'static str,
        backends: wgpu::Backends,
        window: &Window,
        validation: bool,
    ) -> Result<Self, DeviceInitializationError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            flags: instance_flags(validation),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.handle().clone())
            .map_err(|e| DeviceInitializationError::Surface {
                backend: name,
                message: e.to_string(),
            })?;

        let options = wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        };
        let adapter = pollster::block_on(instance.request_adapter(&options));
        let adapter = adapter.map_err(|e| DeviceInitializationError::NoAdapter {
            backend: name,
            message: e.to_string(),
        })?;

        let info = adapter.get_info();
        tracing::info!("[{name}] Adapter '{}' ({:?})", info.name, info.backend);

        let descriptor = wgpu::DeviceDescriptor {
            label: Some(name),
            ..Default::default()
        };
        let requested = pollster::block_on(adapter.request_device(&descriptor));
        let (device, queue) = requested.map_err(|e| DeviceInitializationError::Device {
            backend: name,
            message: e.to_string(),
        })?;

        let Size { width, height } = window.inner_size().at_least_one();
        let config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(DeviceInitializationError::UnsupportedSurface { backend: name })?;
        surface.configure(&device, &config);

        Ok(Self {
            name,
            surface,
            device,
            queue,
            config,
            window: window.handle().clone(),
        })
    }

    fn reconfigure(&mut self) {
        let size = self.window.inner_size();
        let size = Size::new(size.width, size.height);
        // A minimized window has no area; the next outdated frame retries.
        if size.is_empty() {
            return;
        }

        let Size { width, height } = size.at_least_one();
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn present(&mut self) -> Result<(), PresentError> {
        profile_function!();

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                tracing::debug!("[{}] Surface outdated, reconfiguring", self.name);
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::warn!("[{}] Timed out acquiring the next frame", self.name);
                return Ok(());
            }
            Err(e) => {
                return Err(PresentError::Surface {
                    backend: self.name,
                    message: e.to_string(),
                });
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Primary backend: Vulkan, Metal or DX12.
pub struct ModernBackend {
    inner: Option<SurfaceDevice>,
}

impl ModernBackend {
    pub const BACKENDS: wgpu::Backends = wgpu::Backends::PRIMARY;
}

impl Backend for ModernBackend {
    type Window = Window;
    const NAME: &'static str = "Modern";

    fn create(window: &Window, validation: bool) -> Result<Self, DeviceInitializationError> {
        let inner = SurfaceDevice::new(Self::NAME, Self::BACKENDS, window, validation)?;
        Ok(Self { inner: Some(inner) })
    }

    fn present(&mut self) -> Result<(), PresentError> {
        match &mut self.inner {
            Some(inner) => inner.present(),
            None => Err(PresentError::Disposed {
                backend: Self::NAME,
            }),
        }
    }

    fn dispose(&mut self) {
        if self.inner.take().is_some() {
            tracing::debug!("[{}] Device disposed", Self::NAME);
        }
    }
}

impl ProbedBackend for ModernBackend {
    fn is_supported() -> bool {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: Self::BACKENDS,
            ..Default::default()
        });

        let options = wgpu::RequestAdapterOptions::default();
        let supported = pollster::block_on(instance.request_adapter(&options)).is_ok();
        tracing::debug!("[{}] Supported: {}", Self::NAME, supported);
        supported
    }
}

/// Fallback backend: OpenGL / GLES.
pub struct CompatBackend {
    inner: Option<SurfaceDevice>,
}

impl CompatBackend {
    pub const BACKENDS: wgpu::Backends = wgpu::Backends::SECONDARY;
}

impl Backend for CompatBackend {
    type Window = Window;
    const NAME: &'static str = "Compat";

    fn create(window: &Window, validation: bool) -> Result<Self, DeviceInitializationError> {
        let inner = SurfaceDevice::new(Self::NAME, Self::BACKENDS, window, validation)?;
        Ok(Self { inner: Some(inner) })
    }

    fn present(&mut self) -> Result<(), PresentError> {
        match &mut self.inner {
            Some(inner) => inner.present(),
            None => Err(PresentError::Disposed {
                backend: Self::NAME,
            }),
        }
    }

    fn dispose(&mut self) {
        if self.inner.take().is_some() {
            tracing::debug!("[{}] Device disposed", Self::NAME);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_flags() {
        let debugging = instance_flags(true);
        assert!(debugging.contains(wgpu::InstanceFlags::VALIDATION));
        assert!(debugging.contains(wgpu::InstanceFlags::DEBUG));
        assert!(instance_flags(false).is_empty());
    }

    #[test]
    fn test_backend_sets_do_not_overlap() {
        assert!(!ModernBackend::BACKENDS.intersects(CompatBackend::BACKENDS));
    }

    #[test]
    #[ignore] // Requires GPU - run with: cargo test -p kestrel-render -- --ignored
    fn test_modern_probe_does_not_panic() {
        let _ = ModernBackend::is_supported();
    }
}
