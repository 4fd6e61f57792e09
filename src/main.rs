//! `shipflow`: ejecuta los flujos de envío y cotización contra respuestas
//! pregrabadas e imprime el resultado en JSON.
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ship_adapters::{Carrier, CarrierSettings, Gateway};
use ship_core::{EventStore, InMemoryEventStore, RunState};
use shipflow_rust::demo::{self, Scenario};
use shipflow_rust::{AppConfig, CoreError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Carrier a usar (canadapost, eshipper). Por defecto SHIPFLOW_CARRIER.
    #[arg(long, global = true)]
    carrier: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crea un envío (creación + etiqueta).
    Ship {
        /// La respuesta de creación no trae etiqueta: resultado parcial.
        #[arg(long, default_value_t = false)]
        fail_label: bool,
        /// La creación falla en el transporte: no hay resultado.
        #[arg(long, default_value_t = false, conflicts_with = "fail_label")]
        fail_create: bool,
        /// Imprime también el estado reconstruido desde los eventos.
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Cotiza un envío.
    Rate {
        /// El carrier responde 503.
        #[arg(long, default_value_t = false)]
        fail: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
                             .with_writer(std::io::stderr)
                             .init();

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args, config: &AppConfig) -> Result<(), CoreError> {
    let carrier = match args.carrier {
        Some(name) => name.parse::<Carrier>()?,
        None => config.default_carrier,
    };
    let settings = match &config.settings_prefix {
        Some(prefix) => CarrierSettings::from_env(prefix)?,
        None => demo::settings(carrier),
    };
    info!("carrier {carrier} (test_mode: {})", settings.test_mode);

    match args.command {
        Command::Ship { fail_label,
                        fail_create,
                        trace, } => {
            let scenario = if fail_create {
                Scenario::CreateFails
            } else if fail_label {
                Scenario::LabelMissing
            } else {
                Scenario::Complete
            };
            let gateway = Gateway::with_defaults(Arc::new(demo::shipment_transport(&settings, scenario)));
            let mut events = InMemoryEventStore::default();
            let result = gateway.create_shipment_with_events(carrier, &settings, &demo::shipment_request(), &mut events);

            if trace {
                for run_id in events.run_ids() {
                    let state = RunState::replay(&events.list(run_id));
                    println!("run {run_id}: {:?}", state.status);
                    for (step_id, status) in &state.steps {
                        println!("  {step_id}: {status:?}");
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&result?)?);
        }
        Command::Rate { fail } => {
            let gateway = Gateway::with_defaults(Arc::new(demo::rate_transport(&settings, fail)));
            let outcome = gateway.fetch_rates(carrier, &settings, &demo::rate_request())?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}
