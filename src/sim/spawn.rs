//! Tick-gated spawning of coins, doors and monsters

use super::events::GameEvent;
use super::state::{Coin, GameState, Monster, random_x};

/// Run all three spawn gates for the current tick
pub fn run_spawners(state: &mut GameState, events: &mut Vec<GameEvent>) {
    spawn_coin(state, events);
    replace_door(state, events);
    spawn_monster(state, events);
}

/// Drop a new coin every coin interval
pub fn spawn_coin(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let interval = state.config.seconds_to_ticks(state.config.coin_interval_secs);
    if state.time_ticks.saturating_sub(state.last_coin_tick) < interval {
        return false;
    }

    let x = random_x(&mut state.rng, &state.config);
    let coin = Coin::new(x, &state.config);
    log::debug!("Coin spawned at x={}", coin.pos.x);
    events.push(GameEvent::CoinSpawned { x: coin.pos.x });
    state.coins.push(coin);
    state.last_coin_tick = state.time_ticks;
    true
}

/// Swap in a new door once the current one has been around long enough
pub fn replace_door(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let interval = state.config.seconds_to_ticks(state.config.door_interval_secs);
    if state.time_ticks.saturating_sub(state.door.created_tick) < interval {
        return false;
    }

    state.door = state.new_door();
    log::debug!("Door moved to x={}", state.door.pos.x);
    events.push(GameEvent::DoorReplaced { x: state.door.pos.x });
    true
}

/// Let the current door release its single monster
pub fn spawn_monster(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let delay = state.config.seconds_to_ticks(state.config.monster_delay_secs);
    let door = &state.door;
    if state.time_ticks.saturating_sub(door.created_tick) < delay
        || door.spawned
        || !door.is_opaque()
    {
        return false;
    }

    let monster = Monster::new(door.pos.x, &state.config);
    log::debug!(
        "Monster spawned at x={} ({} total)",
        monster.pos.x,
        state.monsters.len() + 1
    );
    events.push(GameEvent::MonsterSpawned { x: monster.pos.x });
    state.monsters.push(monster);
    state.door.spawned = true;
    true
}
