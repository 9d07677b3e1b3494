/***************************************/
/*        3rd party libraries          */
/***************************************/
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use env_logger::Env;
use log::{error, info};
use std::thread::Builder;

/***************************************/
/*           Local modules             */
/***************************************/
use sim::{forward_quit, Simulation, TraceWriter};

/***************************************/
/*               Modules               */
/***************************************/
mod config;
mod door;
mod elevator;
mod error;
mod physics;
mod shared;
mod sim;
mod transport;

/***************************************/
/*                Main                 */
/***************************************/
fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = Command::new("auto-elev-door")
        .about("Automatic elevator door controllers on a kinematic simulation")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration"),
        )
        .arg(
            Arg::new("ticks")
                .long("ticks")
                .takes_value(true)
                .help("Number of ticks to run, overrides [simulation] ticks"),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .takes_value(true)
                .help("Write one JSON line per door and tick to this file"),
        )
        .get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let config = unwrap_or_exit!(config::load_config(config_path));
    info!("Loaded configuration from {}", config_path);

    // Build the world and every controller
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();
    let mut simulation = unwrap_or_exit!(Simulation::new(&config, terminate_rx));

    if let Some(path) = matches.value_of("trace") {
        simulation = simulation.with_trace(unwrap_or_exit!(TraceWriter::create(path)));
        info!("Writing trace to {}", path);
    }
    if let Some(ticks) = matches.value_of("ticks") {
        match ticks.parse::<u64>() {
            Ok(ticks) => simulation = simulation.with_ticks(ticks),
            Err(e) => {
                error!("Invalid --ticks '{}': {}", ticks, e);
                std::process::exit(2);
            }
        }
    }

    // Type `q` to stop early
    let stdin_thread = Builder::new().name("stdin".into());
    unwrap_or_exit!(stdin_thread.spawn(move || forward_quit(std::io::stdin().lock(), terminate_tx)));

    // Start the simulation
    let simulation_thread = Builder::new().name("simulation".into());
    let handle = unwrap_or_exit!(simulation_thread.spawn(move || simulation.run()));

    match handle.join() {
        Ok(ticks) => info!("Done after {} ticks", ticks),
        Err(_) => {
            error!("Simulation thread panicked");
            std::process::exit(1);
        }
    }
}
