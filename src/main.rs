use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use parking_dashboard::config::environment::EnvironmentConfig;
use parking_dashboard::routes::create_app;
use parking_dashboard::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🅿️ Parking Dashboard - Panel del estacionamiento");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS permisivo en producción, configure CORS_ORIGINS");
    }
    info!("💰 Valor por hora: R$ {}", config.default_hourly_rate);

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::from_config(config)?;
    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  / - Panel");
    info!("   POST /veiculos - Registrar entrada");
    info!("   GET  /veiculos/:placa/editar - Editar vehículo");
    info!("   POST /veiculos/:placa - Actualizar vehículo");
    info!("   POST /veiculos/:placa/excluir - Eliminar vehículo");
    info!("   POST /veiculos/:placa/saida - Registrar salida");
    info!("   GET  /api/estacionados - Vehículos estacionados (JSON)");
    info!("   GET  /api/historico - Historial de estadias (JSON)");
    info!("   GET  /health - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
