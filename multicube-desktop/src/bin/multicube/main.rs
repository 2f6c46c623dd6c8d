//! Binary for running multicube without graphics.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

use anyhow::Context as _;
use clap::Parser as _;

use multicube::game::Game;
use multicube_desktop::{headless, logging};

mod command_options;
use command_options::MulticubeArgs;

fn main() -> Result<(), anyhow::Error> {
    let options = MulticubeArgs::parse();
    // Destructure as a check that we're using all the args
    let MulticubeArgs {
        ticks,
        seed,
        script,
        config: config_args,
        logging: logging_args,
    } = options;

    logging::install(&logging_args)?;

    let mut config = config_args.build_config()?;
    if seed.is_some() {
        config.seed = seed;
    }
    let seed = *config.seed.get_or_insert_with(rand::random);
    log::info!("seed: {seed}");

    let mut game = Game::with_seed(config, seed).context("failed to start game")?;
    let summary = headless::run(&mut game, &script, ticks);
    print!("{summary}");
    Ok(())
}
