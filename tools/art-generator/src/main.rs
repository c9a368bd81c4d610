//! Renders a glyph into the ten nice!view pattern assets.

use anyhow::Result;
use art_generator::{
    cli, font,
    input::Environment,
    pipeline::{self, Stage},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    pipeline::enter(Stage::ParseInputs);
    let config = cli::get_config();
    let environment = Environment::from_process();
    let home = std::env::var_os("HOME").map(std::path::PathBuf::from);

    let providers = font::providers(config.font.clone(), config.font_dir.clone(), home.as_deref());

    let written = pipeline::run(&config, &environment, &providers)?;
    for path in written {
        println!("{} located at \"{}\"", config.mode.as_str(), path.display());
    }

    Ok(())
}
