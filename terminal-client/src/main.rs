use anyhow::Result;
use colored::*;
use std::io::{self, Write};

use parking_dashboard::config::environment::EnvironmentConfig;
use parking_dashboard::controllers::ParkingController;
use parking_dashboard::dto::VehicleForm;
use parking_dashboard::services::stay_lifecycle;
use parking_dashboard::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    println!("{}", "🅿️ Estacionamento - Terminal".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!("🔗 API: {}", config.parking_api_url);

    let controller = AppState::from_config(config)?.controller();

    loop {
        println!();
        println!("{}", "📋 MENU PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚗 Veículos estacionados");
        println!("2. 📜 Histórico de estadias");
        println!("3. ➡️  Registrar entrada");
        println!("4. ⬅️  Registrar saída");
        println!("5. ✏️  Editar veículo");
        println!("6. 🗑️  Deletar veículo");
        println!("7. 🚪 Sair");

        let choice = prompt("Selecione uma opção (1-7): ")?;

        let outcome = match choice.as_str() {
            "1" => show_parked(&controller).await,
            "2" => show_history(&controller).await,
            "3" => register_entry(&controller).await,
            "4" => register_exit(&controller).await,
            "5" => edit_vehicle(&controller).await,
            "6" => delete_vehicle(&controller).await,
            "7" => {
                println!("{}", "👋 Até logo!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opção inválida. Tente de novo.".bright_red());
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{}", format!("❌ {}", e).bright_red());
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Valor nuevo o el actual si se deja en blanco
fn prompt_or_keep(label: &str, current: &str) -> Result<String> {
    let value = prompt(&format!("{} [{}]: ", label, current))?;
    Ok(if value.is_empty() { current.to_string() } else { value })
}

// Los errores del controlador ya traen el mensaje para el operador
fn user_error(e: parking_dashboard::utils::AppError) -> anyhow::Error {
    anyhow::anyhow!(e.user_message())
}

async fn show_parked(controller: &ParkingController) -> Result<()> {
    let rows = controller.parked_vehicles().await.map_err(user_error)?;

    println!();
    println!("{}", format!("🚗 ESTACIONADOS: {}", rows.len()).bright_cyan().bold());
    for row in rows {
        println!(
            "  {:<10} {:<15} {:<10} {:<8} {}",
            row.plate.bold(),
            row.model,
            row.color,
            row.vehicle_type,
            row.entry
        );
    }
    Ok(())
}

async fn show_history(controller: &ParkingController) -> Result<()> {
    let rows = controller.stay_history().await.map_err(user_error)?;

    println!();
    println!("{}", format!("📜 ESTADIAS: {}", rows.len()).bright_cyan().bold());
    for row in rows {
        let total = format!("R$ {}", row.total);
        println!(
            "  {:<10} {:<22} {:<22} {:<8} {}",
            row.plate.bold(),
            row.entry,
            row.exit,
            row.duration,
            if row.open { total.yellow() } else { total.normal() }
        );
    }
    Ok(())
}

async fn register_entry(controller: &ParkingController) -> Result<()> {
    let form = VehicleForm {
        plate: prompt("Placa: ")?,
        model: prompt("Modelo: ")?,
        color: prompt("Cor: ")?,
        vehicle_type: prompt("Tipo: ")?,
    };

    let stay = controller.register_entry(&form).await.map_err(user_error)?;
    println!(
        "{}",
        format!("✅ Veículo {} registrado com sucesso!", stay.plate).bright_green()
    );
    Ok(())
}

async fn register_exit(controller: &ParkingController) -> Result<()> {
    let plate = prompt("Placa: ")?;
    let closed = controller
        .register_exit(&plate, chrono::Utc::now())
        .await
        .map_err(user_error)?;

    println!(
        "{}",
        format!(
            "✅ Saída registrada. Duração: {}. Valor total: R$ {}",
            stay_lifecycle::format_duration(closed.entry_time, closed.exit_time),
            stay_lifecycle::format_money(closed.total_fee)
        )
        .bright_green()
    );
    Ok(())
}

async fn edit_vehicle(controller: &ParkingController) -> Result<()> {
    let plate = prompt("Placa: ")?;
    let current = controller.edit_form(&plate).await.map_err(user_error)?;

    println!("{}", "Deixe em branco para manter o valor atual.".dimmed());
    let form = VehicleForm {
        plate: current.plate.clone(),
        model: prompt_or_keep("Modelo", &current.model)?,
        color: prompt_or_keep("Cor", &current.color)?,
        vehicle_type: prompt_or_keep("Tipo", &current.vehicle_type)?,
    };

    controller
        .update_vehicle(&current.plate, &form)
        .await
        .map_err(user_error)?;
    println!("{}", "✅ Veículo atualizado com sucesso!".bright_green());
    Ok(())
}

async fn delete_vehicle(controller: &ParkingController) -> Result<()> {
    let plate = prompt("Placa: ")?;
    let answer = prompt(&format!("Confirma a exclusão do veículo {}? (s/N): ", plate))?;
    if !answer.eq_ignore_ascii_case("s") {
        println!("{}", "↩️ Exclusão cancelada.".bright_yellow());
        return Ok(());
    }

    controller.delete_vehicle(&plate).await.map_err(user_error)?;
    println!("{}", "✅ Veículo deletado com sucesso!".bright_green());
    Ok(())
}
