use anyhow::Result;
use clap::Parser;

use pulse_cli::{Cli, logging, run};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref())?;

    let output = run(&cli)?;
    println!("{output}");
    Ok(())
}
