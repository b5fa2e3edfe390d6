mod app;
mod cli;
mod command;
mod config;
mod consts;
mod error;
mod ledger;
mod output;
mod resolve;
mod schedule;
mod service;
mod transport;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();
    let config = Config::load();

    if let Err(e) = app::run(cli, config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
