//! WXA CLI - summarize a weather anomaly dataset and chart it.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "wxa-cli",
    version,
    about = "Weather anomaly dataset explorer"
)]
struct Cli {
    #[command(flatten)]
    options: wxa_cmd::Options,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Options: {:?}", cli.options);
    wxa_cmd::run(&cli.options)?;
    Ok(())
}
