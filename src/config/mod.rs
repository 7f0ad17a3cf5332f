//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de variables de entorno del panel
//! y del cliente de la API de estacionamiento.

pub mod environment;

pub use environment::*;
