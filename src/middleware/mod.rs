//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS del servidor del panel.

pub mod cors;

pub use cors::*;
