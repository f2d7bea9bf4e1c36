mod campaign;
mod cli;
mod config;
mod deals;
mod generate;
mod hub;
mod logging;
mod merge;
mod model;
mod storage;

use std::process;

use config::Config;
use storage::Storage;

fn main() {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    logging::init(config.log_level());

    let root = config
        .data_dir
        .clone()
        .or_else(Storage::default_root)
        .unwrap_or_else(|| {
            eprintln!("Could not determine home directory.");
            process::exit(1);
        });

    let storage = match Storage::new(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config, &storage) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
