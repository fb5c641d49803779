//! Model controller facade
//!
//! [`ModelController`] wraps the module-level load and mutation operations
//! behind a single stateful object: Unloaded until a load succeeds, Loaded
//! after. Load failures are reported as a boolean; the underlying error is
//! logged, not returned.

use std::collections::HashMap;

use crate::core::Result;
use crate::model::{self, ModelDict, ModelHandle};

/// Ticket for one load request, issued by [`ModelController::begin_load`]
///
/// Tickets are ordered by issue time. Only the completion of the highest
/// issued ticket may mutate the controller, so a slow early load can never
/// clobber the result of a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
}

/// Stateful facade over model loading, updates, expressions and parameters
pub struct ModelController {
    model: Option<ModelHandle>,
    is_loaded: bool,
    current_expression: usize,
    parameters: HashMap<String, f32>,
    issued_seq: u64,
}

impl ModelController {
    /// Create an unloaded controller
    pub fn new() -> Self {
        Self {
            model: None,
            is_loaded: false,
            current_expression: 0,
            parameters: HashMap::new(),
            issued_seq: 0,
        }
    }

    /// Load a model configuration from `url`
    ///
    /// Returns `true` when the controller now holds the fetched model.
    /// Any failure is logged and reported as `false`; the previous state
    /// is left untouched.
    pub async fn load_from_url(&mut self, url: &str) -> bool {
        let ticket = self.begin_load();
        let result = model::load_model(url).await;
        self.finish_load(ticket, result)
    }

    /// Resolve `name` through the dictionary, then load its URL
    pub async fn load_by_name(&mut self, dict: &ModelDict, name: &str) -> bool {
        let url = match dict.lookup(name) {
            Ok(info) => info.url.clone(),
            Err(e) => {
                log::error!("failed to resolve model '{name}': {e}");
                return false;
            }
        };
        self.load_from_url(&url).await
    }

    /// Issue a ticket for a load request
    ///
    /// Use together with [`finish_load`](Self::finish_load) when the fetch
    /// runs outside the controller (e.g. on a spawned task).
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued_seq += 1;
        LoadTicket {
            seq: self.issued_seq,
        }
    }

    /// Complete a load request
    ///
    /// Applies the result only if `ticket` is the highest issued so far;
    /// superseded completions are discarded. Returns `true` when the
    /// controller state changed to hold the new model.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<ModelHandle>) -> bool {
        if ticket.seq != self.issued_seq {
            log::debug!(
                "discarding superseded load result (ticket {} of {})",
                ticket.seq,
                self.issued_seq
            );
            return false;
        }

        match result {
            Ok(handle) => {
                log::info!("model loaded successfully, id={}", handle.id);
                // Replaces any previously held handle, never merges
                self.model = Some(handle);
                self.is_loaded = true;
                true
            }
            Err(e) => {
                log::error!("failed to load model: {e}");
                false
            }
        }
    }

    /// Select the expression preset at `index`
    ///
    /// A warn-logged no-op until a model is loaded.
    pub fn set_expression(&mut self, index: usize) {
        if !self.is_loaded {
            log::warn!("model not loaded yet");
            return;
        }

        self.current_expression = index;
        if let Some(model) = &self.model {
            model::set_expression(model, index);
        }
        log::info!("expression set to: {index}");
    }

    /// Advance the model by `delta_time` seconds; no-op until loaded
    pub fn update(&mut self, delta_time: f32) {
        if !self.is_loaded {
            return;
        }

        if let Some(model) = &self.model {
            model::update_model(model, delta_time);
        }
    }

    /// Record and forward a parameter value
    ///
    /// Unlike [`set_expression`](Self::set_expression), this has no load
    /// guard: values set before a load are recorded anyway.
    pub fn set_parameter(&mut self, parameter_id: &str, value: f32) {
        self.parameters.insert(parameter_id.to_string(), value);
        match &self.model {
            Some(model) => model::set_model_parameter(model, parameter_id, value),
            None => log::debug!("parameter {parameter_id} staged before model load"),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Index set by the most recent accepted `set_expression`
    pub fn current_expression(&self) -> usize {
        self.current_expression
    }

    /// The held model, if any
    pub fn model(&self) -> Option<&ModelHandle> {
        self.model.as_ref()
    }

    /// Last recorded value for a parameter
    pub fn parameter(&self, parameter_id: &str) -> Option<f32> {
        self.parameters.get(parameter_id).copied()
    }

    /// All recorded parameter values
    pub fn parameters(&self) -> &HashMap<String, f32> {
        &self.parameters
    }
}

impl Default for ModelController {
    fn default() -> Self {
        Self::new()
    }
}
