//! Render backend seam and runtime initialization
//!
//! The host never renders anything itself. A real rendering engine plugs in
//! through [`RenderBackend`]; when none is registered, mutation calls are
//! logged and dropped.

use std::sync::{Mutex, OnceLock};

use crate::model::ModelHandle;

/// Capabilities a rendering engine must provide to receive model mutations
pub trait RenderBackend: Send {
    /// Apply the expression preset at `index` to the model
    fn apply_expression(&mut self, model: &ModelHandle, index: usize);

    /// Apply a single named parameter value to the model
    fn apply_parameter(&mut self, model: &ModelHandle, id: &str, value: f32);

    /// Advance the model's animation state by `delta_time` seconds
    fn advance(&mut self, model: &ModelHandle, delta_time: f32);
}

/// Holds at most one registered backend plus the cached probe result
pub struct BackendRegistry {
    slot: Mutex<Option<Box<dyn RenderBackend>>>,
    probed: OnceLock<bool>,
}

impl BackendRegistry {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            probed: OnceLock::new(),
        }
    }

    /// Install a backend, replacing any previous one
    pub fn register(&self, backend: Box<dyn RenderBackend>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(backend);
            log::info!("render backend registered");
        }
    }

    /// Probe for a registered backend
    ///
    /// Returns `true` with an info log when a backend is present, `false`
    /// with an error log when absent. The first result is cached; repeated
    /// calls return it unchanged.
    pub fn initialize(&self) -> bool {
        *self.probed.get_or_init(|| {
            let present = self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false);
            if present {
                log::info!("render runtime initialized");
            } else {
                log::error!(
                    "no render backend registered; model mutations will be logged and dropped"
                );
            }
            present
        })
    }

    /// Run `f` against the registered backend, if any
    pub fn with_backend<R>(&self, f: impl FnOnce(&mut dyn RenderBackend) -> R) -> Option<R> {
        let mut slot = self.slot.lock().ok()?;
        let backend = slot.as_mut()?;
        Some(f(backend.as_mut()))
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: BackendRegistry = BackendRegistry::new();

/// The process-wide registry used by the module-level mutation functions
pub fn global() -> &'static BackendRegistry {
    &GLOBAL
}

/// Register a backend with the process-wide registry
pub fn register_backend(backend: Box<dyn RenderBackend>) {
    GLOBAL.register(backend);
}

/// Probe the process-wide registry; call once during host startup
pub fn initialize() -> bool {
    GLOBAL.initialize()
}
