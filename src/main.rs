use clap::Parser;
use desksnow::cli::Args;
use desksnow::{config, overlay};

fn main() -> Result<(), desksnow::Error> {
    env_logger::init();

    let args = Args::parse();
    let mut config = config::load_config();
    config::apply_cli_overrides(&mut config, &args);

    overlay::run(config, None)
}
