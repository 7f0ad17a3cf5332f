//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! a los recursos JSON de la API de estacionamiento.

pub mod stay;
pub mod vehicle;

pub use stay::{Stay, StayId};
pub use vehicle::Vehicle;
