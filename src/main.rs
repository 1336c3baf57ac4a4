use anyhow::{Context, Result};
use dungeon::{BrainKind, style};

use rogue_sim::{EntityFactory, Game, SimConfig, input, logging};

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(&path)
            .map_err(|e| anyhow::anyhow!(error::describe(&e)))
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => SimConfig::default(),
    };
    logging::init(&config.log_filter);

    let mut game = EntityFactory::new()
        .create_game(&config)
        .context("Failed to create game")?;

    let script = match config.input_script.as_deref() {
        Some(keys) => input::parse_script(keys),
        None => {
            autoplay(&mut game);
            Vec::new()
        }
    };
    let outcome = game.run(script, config.turn_limit);

    if let Some(level) = game.shown_level() {
        println!("{}", level.id());
        for row in style::render_rows(level) {
            println!("{}", row);
        }
    }
    for line in game.messages() {
        println!("{}", line);
    }
    println!("{:?} at time {}", outcome, game.current_time());
    Ok(())
}

/// 没有输入脚本时让玩家自己探索
fn autoplay(game: &mut Game) {
    let Some(player) = game.player() else {
        return;
    };
    let world = game.world_mut();
    if let Some(actor) = world
        .find_actor(player)
        .and_then(|level| world.level_mut(level))
        .and_then(|level| level.actor_mut(player))
    {
        actor.set_brain(BrainKind::Rogue.build());
        tracing::info!(player = %player, "no input script, player explores on its own");
    }
}
