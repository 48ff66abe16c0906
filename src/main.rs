use clap::Parser;
use trview::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::{compare, inspect, regions},
    utils::{handle_error_and_exit, Result},
};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    let subcommand_name = match cli.command {
        Command::Inspect(_) => "inspect",
        Command::Compare(_) => "compare",
        Command::Regions(_) => "regions",
    };

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        *FULL_VERSION,
        subcommand_name
    );
    match cli.command {
        Command::Inspect(args) => inspect::inspect(args)?,
        Command::Compare(args) => compare::compare(args)?,
        Command::Regions(args) => regions::regions(args)?,
    }
    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
