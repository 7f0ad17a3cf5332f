//! Panel del estacionamiento
//!
//! Servidor web que muestra los vehículos estacionados y el historial de
//! estadias de la API de estacionamiento, y registra entradas, salidas,
//! ediciones y bajas de vehículos contra ella.

pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;
