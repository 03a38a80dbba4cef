//! Cross-entity interactions: coin pickup/eviction and monster damage
//!
//! Runs once per tick after physics and spawning. Entities whose hitbox has
//! not been computed yet (spawned this tick) simply never collide.

use super::events::GameEvent;
use super::state::GameState;

/// Resolve all player interactions for this tick
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    resolve_coins(state, events);
    resolve_monsters(state, events);
}

/// Pick up touched coins, evict grounded ones while over the cap
pub fn resolve_coins(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_hitbox = state.player.hitbox;
    let mut i = 0;
    while i < state.coins.len() {
        let coin = &state.coins[i];
        if coin.hitbox.collides(&player_hitbox) {
            state.coins.remove(i);
            state.points += 1;
            log::debug!("Coin collected ({} points)", state.points);
            events.push(GameEvent::CoinCollected {
                points: state.points,
            });
        } else if coin.on_ground(&state.config) && state.coins.len() > state.config.max_coins {
            let x = coin.pos.x;
            state.coins.remove(i);
            events.push(GameEvent::CoinEvicted { x });
        } else {
            i += 1;
        }
    }
}

/// Apply monster contact damage and tick down invulnerability
///
/// The countdown moves once per monster checked, so with no monsters around
/// it holds still and with several it drains faster.
pub fn resolve_monsters(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    for monster in &state.monsters {
        if monster.hitbox.collides(&player.hitbox) && player.invulnerable <= 0 {
            state.lives -= 1;
            player.invulnerable = state.config.invulnerability_ticks;
            log::debug!("Player hit, {} lives left", state.lives);
            events.push(GameEvent::PlayerHit { lives: state.lives });
        } else {
            player.invulnerable -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::rect::{Hitbox, Rect};
    use crate::sim::state::{Coin, Monster};

    fn state_with_player_at(x: f32) -> GameState {
        let mut state = GameState::new(GameConfig::default(), 5);
        state.player.pos.x = x;
        state.player.update(&state.config);
        state
    }

    fn grounded_coin(x: f32, state: &GameState) -> Coin {
        let mut coin = Coin::new(x, &state.config);
        coin.pos.y = state.config.floor_for(coin.size.y);
        coin.update(&state.config);
        coin
    }

    #[test]
    fn test_pickup_scores_and_removes() {
        let mut state = state_with_player_at(300.0);
        let coin = grounded_coin(310.0, &state);
        state.coins.push(coin);

        let mut events = Vec::new();
        resolve_coins(&mut state, &mut events);
        assert_eq!(state.points, 1);
        assert!(state.coins.is_empty());
        assert_eq!(events, vec![GameEvent::CoinCollected { points: 1 }]);
    }

    #[test]
    fn test_unupdated_coin_is_ignored() {
        let mut state = state_with_player_at(300.0);
        let mut coin = Coin::new(310.0, &state.config);
        coin.pos.y = 430.0;
        assert_eq!(coin.hitbox, Hitbox::NotComputed);
        state.coins.push(coin);

        let mut events = Vec::new();
        resolve_coins(&mut state, &mut events);
        assert_eq!(state.points, 0);
        assert_eq!(state.coins.len(), 1);
    }

    #[test]
    fn test_player_without_hitbox_collides_with_nothing() {
        let mut state = GameState::new(GameConfig::default(), 5);
        let coin = grounded_coin(state.player.pos.x, &state);
        state.coins.push(coin);
        let mut monster = Monster::new(state.player.pos.x, &state.config);
        monster.hitbox = Hitbox::Rect(monster.bounds());
        state.monsters.push(monster);

        let mut events = Vec::new();
        resolve_collisions(&mut state, &mut events);
        assert_eq!(state.points, 0);
        assert_eq!(state.lives, 3);
        assert!(events.is_empty());
    }

    #[test]
    fn test_overflow_evicts_grounded_coins() {
        let mut state = state_with_player_at(0.0);
        for i in 0..6 {
            let coin = grounded_coin(100.0 + i as f32 * 80.0, &state);
            state.coins.push(coin);
        }

        let mut events = Vec::new();
        resolve_coins(&mut state, &mut events);
        assert_eq!(state.coins.len(), 5);
        assert_eq!(state.points, 0);
        assert_eq!(events, vec![GameEvent::CoinEvicted { x: 100.0 }]);
    }

    #[test]
    fn test_falling_coins_are_not_evicted() {
        let mut state = state_with_player_at(0.0);
        for i in 0..8 {
            let mut coin = Coin::new(100.0 + i as f32 * 60.0, &state.config);
            coin.update(&state.config);
            state.coins.push(coin);
        }

        let mut events = Vec::new();
        resolve_coins(&mut state, &mut events);
        assert_eq!(state.coins.len(), 8);
    }

    #[test]
    fn test_pickup_wins_over_eviction() {
        let mut state = state_with_player_at(300.0);
        state.coins.push(grounded_coin(310.0, &state));
        for i in 0..5 {
            let coin = grounded_coin(400.0 + i as f32 * 40.0, &state);
            state.coins.push(coin);
        }

        let mut events = Vec::new();
        resolve_coins(&mut state, &mut events);
        assert_eq!(state.points, 1);
        assert_eq!(state.coins.len(), 5);
        assert_eq!(events, vec![GameEvent::CoinCollected { points: 1 }]);
    }

    #[test]
    fn test_monster_hit_grants_invulnerability() {
        let mut state = state_with_player_at(300.0);
        let mut monster = Monster::new(300.0, &state.config);
        monster.hitbox = Hitbox::Rect(monster.bounds());
        state.monsters.push(monster);

        let mut events = Vec::new();
        resolve_monsters(&mut state, &mut events);
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.invulnerable, 120);

        resolve_monsters(&mut state, &mut events);
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.invulnerable, 119);
        assert_eq!(events, vec![GameEvent::PlayerHit { lives: 2 }]);
    }

    #[test]
    fn test_invulnerability_drains_per_monster() {
        let mut state = state_with_player_at(0.0);
        state.player.invulnerable = 10;
        for x in [300.0, 400.0, 500.0] {
            let mut monster = Monster::new(x, &state.config);
            monster.hitbox = Hitbox::Rect(monster.bounds());
            state.monsters.push(monster);
        }

        let mut events = Vec::new();
        resolve_monsters(&mut state, &mut events);
        assert_eq!(state.player.invulnerable, 7);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_edge_contact_is_not_a_hit() {
        let mut state = state_with_player_at(300.0);
        let player_rect = *state.player.hitbox.rect().unwrap();
        let mut monster = Monster::new(0.0, &state.config);
        monster.hitbox = Hitbox::Rect(Rect::from_pos_size(
            Vec2::new(player_rect.right(), player_rect.top()),
            Vec2::splat(20.0),
        ));
        state.monsters.push(monster);

        let mut events = Vec::new();
        resolve_monsters(&mut state, &mut events);
        assert_eq!(state.lives, 3);
    }
}
