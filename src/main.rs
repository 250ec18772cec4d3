use cidrmate::cli::{execute, init_logging, Cli};
use cidrmate::config::Config;
use clap::Parser;
use colored::Colorize;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_logging(&config.log_config)?;
    config.log_warnings();
    log::info!("#Start main()");

    match execute(&cli, &config) {
        Ok(out) => {
            print!("{out}");
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {e}", "ERROR".on_red());
            std::process::exit(1);
        }
    }
}
