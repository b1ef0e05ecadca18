use cactascan::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{detect, insert, simulate, tir_info},
    utils::{handle_error_and_exit, Result},
};
use clap::Parser;

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Detect(_) => "detect",
        Command::Simulate(_) => "simulate",
        Command::Insert(_) => "insert",
        Command::TirInfo(_) => "tir-info",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Detect(args) => detect::detect(args)?,
        Command::Simulate(args) => simulate::simulate(args)?,
        Command::Insert(args) => insert::insert(args)?,
        Command::TirInfo(args) => tir_info::tir_info(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
