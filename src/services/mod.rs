//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. El ciclo de
//! vida de las estadias no depende de la API remota ni del servidor web.

pub mod stay_lifecycle;
