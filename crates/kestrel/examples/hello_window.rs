//! Opens a window and clears it every frame until it is closed.
//!
//! Rendering pauses while the window is in the background.
//!
//! Run with: `cargo run -p kestrel --example hello_window`
//!
//! Options:
//!   `--fallback`   force the compatibility (GL) backend
//!   `--profile`    start the puffin HTTP server on port 8585
//!   `--verbose`    log lifecycle transitions at debug level

use kestrel::core::logging;
use kestrel::core::profiling::{ProfilingBackend, init_profiling};
use kestrel::platform::WinitHost;
use kestrel::{AppConfig, BackendPreference, CallbackHooks, ExitReason, WinitApplication};

const VERBOSE_FILTER: &str = "debug,wgpu_core=warn,wgpu_hal=warn,naga=warn";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--verbose") {
        logging::init_with_filter(VERBOSE_FILTER);
    } else {
        logging::init();
    }

    if args.iter().any(|arg| arg == "--profile") {
        init_profiling(ProfilingBackend::PuffinHttp);
    }

    let backend = if args.iter().any(|arg| arg == "--fallback") {
        BackendPreference::Fallback
    } else {
        BackendPreference::Primary
    };

    let config = AppConfig::new()
        .with_title("Hello Kestrel")
        .with_size(1024, 768)
        .with_backend(backend);

    let hooks = CallbackHooks::new()
        .with_activated(|| tracing::info!("Resumed rendering"))
        .with_deactivated(|| tracing::info!("Paused rendering"));

    let host = match WinitHost::new() {
        Ok(host) => host,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut app = match WinitApplication::new(host, &config, hooks) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Rendering with the {} backend", app.device().backend_name());

    let code = match app.run() {
        Ok(ExitReason::Quit(code)) => {
            tracing::info!("Window closed (exit code {})", code);
            code
        }
        Ok(reason @ ExitReason::PumpFailed(_)) => {
            tracing::error!("Message pump failed: {:?}", reason);
            reason.exit_code()
        }
        Err(e) => {
            tracing::error!("{}", e);
            1
        }
    };

    drop(app);
    std::process::exit(code);
}
