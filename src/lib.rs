//! Live2D host - async model loading and a control facade for 2D avatars

pub mod controller;
pub mod core;
pub mod model;
pub mod runtime;
pub mod texture;
