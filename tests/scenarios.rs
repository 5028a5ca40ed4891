use glam::Vec2;
use tank_duel::consts::*;
use tank_duel::sim::*;
use tank_duel::{Game, Settings};

/// Match with no obstacles; Blue at (200,300) facing right, Red at (600,300) facing left
fn open_arena(seed: u64) -> MatchState {
    let mut state = MatchState::new(seed);
    state.obstacles.clear();
    state.tanks[0].pos = Vec2::new(200.0, 300.0);
    state.tanks[1].pos = Vec2::new(600.0, 300.0);
    state.tanks[1].angle = -std::f32::consts::PI;
    state
}

fn fire_bullet(state: &mut MatchState, pos: Vec2, angle: f32, owner: Team) {
    let id = state.next_entity_id();
    let now = state.clock_ms;
    state
        .bullets
        .push(Bullet::from_spawn(id, BulletSpawn { pos, angle, owner }, now));
}

fn idle(state: &mut MatchState) {
    tick(state, &TickInput::default(), SIM_DT);
}

fn bursts(events: &TickEvents) -> Vec<Vec2> {
    events
        .effects
        .iter()
        .filter_map(|e| match e {
            EffectRequest::ExplosionBurst { center } => Some(*center),
            _ => None,
        })
        .collect()
}

#[test]
fn hit_costs_a_life_and_scores_for_shooter() {
    let mut state = open_arena(1);
    // One tick short of Blue's box, travelling left
    fire_bullet(&mut state, Vec2::new(235.0, 315.0), std::f32::consts::PI, Team::Red);
    idle(&mut state);

    let blue = state.tank(Team::Blue);
    assert_eq!(blue.lives, 2);
    assert!(blue.invulnerable);
    assert_eq!(state.tank(Team::Red).score, 10);
    assert!(state.bullets.is_empty());

    let events = state.take_events();
    assert_eq!(bursts(&events), vec![Vec2::new(215.0, 315.0)]);
    assert!(events.cues.contains(&SoundCue::Respawn));
    assert!(events.cues.contains(&SoundCue::Explosion));
    assert!(
        state
            .effects
            .visuals()
            .iter()
            .any(|v| v.tag == EffectTag::Explosion && v.pos == Vec2::new(215.0, 315.0))
    );
}

#[test]
fn no_damage_during_invulnerability() {
    let mut state = open_arena(2);
    fire_bullet(&mut state, Vec2::new(235.0, 315.0), std::f32::consts::PI, Team::Red);
    idle(&mut state);
    assert_eq!(state.tank(Team::Blue).lives, 2);

    fire_bullet(&mut state, Vec2::new(235.0, 315.0), std::f32::consts::PI, Team::Red);
    idle(&mut state);
    assert_eq!(state.tank(Team::Blue).lives, 2);
    assert_eq!(state.tank(Team::Red).score, 10);
    assert!(state.bullets.is_empty(), "deflected bullet is consumed");
    assert!(
        state
            .take_events()
            .game
            .contains(&GameEvent::Deflected { target: Team::Blue })
    );
}

#[test]
fn bush_breaks_on_second_hit() {
    let mut state = open_arena(3);
    let bush_id = state.next_entity_id();
    state
        .obstacles
        .push(Obstacle::new(bush_id, ObstacleKind::Bush, Vec2::new(400.0, 300.0)));

    fire_bullet(&mut state, Vec2::new(392.0, 320.0), 0.0, Team::Blue);
    idle(&mut state);
    assert_eq!(state.obstacles.len(), 1);
    assert_eq!(state.obstacles[0].health, 1);
    assert!(state.bullets.is_empty());
    assert!(bursts(&state.take_events()).is_empty());

    fire_bullet(&mut state, Vec2::new(392.0, 320.0), 0.0, Team::Blue);
    idle(&mut state);
    assert!(state.obstacles.is_empty());
    assert_eq!(bursts(&state.take_events()), vec![Vec2::new(420.0, 320.0)]);
}

#[test]
fn rock_never_breaks() {
    let mut state = open_arena(4);
    let rock_id = state.next_entity_id();
    state
        .obstacles
        .push(Obstacle::new(rock_id, ObstacleKind::Rock, Vec2::new(400.0, 300.0)));
    for _ in 0..20 {
        fire_bullet(&mut state, Vec2::new(392.0, 320.0), 0.0, Team::Blue);
        idle(&mut state);
    }
    assert_eq!(state.obstacles.len(), 1);
    let events = state.take_events();
    assert!(bursts(&events).is_empty());
    assert_eq!(
        events.cues.iter().filter(|c| **c == SoundCue::Ricochet).count(),
        20
    );
}

#[test]
fn simultaneous_kills_are_a_draw() {
    let mut state = open_arena(5);
    state.tanks[0].lives = 1;
    state.tanks[1].lives = 1;
    fire_bullet(&mut state, Vec2::new(595.0, 315.0), 0.0, Team::Blue);
    fire_bullet(&mut state, Vec2::new(235.0, 315.0), std::f32::consts::PI, Team::Red);
    idle(&mut state);

    assert_eq!(state.phase, GamePhase::MatchOver);
    assert_eq!(state.result, Some(MatchResult::Draw));
    assert_eq!(state.snapshot().banner().as_deref(), Some("Draw!"));
}

#[test]
fn restart_after_match_over() {
    let mut state = open_arena(6);
    state.tanks[1].lives = 1;
    state.tanks[0].score = 20;
    fire_bullet(&mut state, Vec2::new(595.0, 315.0), 0.0, Team::Blue);
    idle(&mut state);
    assert_eq!(state.result, Some(MatchResult::Winner(Team::Blue)));
    // Leftovers that restart must clear
    fire_bullet(&mut state, Vec2::new(500.0, 500.0), 0.0, Team::Blue);
    assert!(!state.effects.is_empty());

    tick(
        &mut state,
        &TickInput {
            restart: true,
            ..Default::default()
        },
        SIM_DT,
    );
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.result, None);
    for team in Team::ALL {
        let tank = state.tank(team);
        assert_eq!(tank.lives, 3);
        assert_eq!(tank.score, 0);
        assert_eq!(tank.pos, team.spawn_point());
    }
    assert!(state.bullets.is_empty());
    assert!(state.effects.is_empty());
    assert_eq!(
        state.obstacles.len(),
        ROCK_COUNT + BUSH_COUNT + WALL_COUNT + CRATE_COUNT
    );
}

#[test]
fn try_fire_within_cooldown_yields_one_bullet() {
    let mut tank = Tank::new(Team::Red);
    let mut events = TickEvents::new();
    let shots: Vec<_> = [0.0, 100.0, 499.0]
        .into_iter()
        .filter_map(|now| tank.try_fire(now, &mut events))
        .collect();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].owner, Team::Red);
}

#[test]
fn bullet_leaves_screen_and_expires() {
    let mut state = open_arena(7);
    // Near the top edge heading up; gone once past the margin
    fire_bullet(&mut state, Vec2::new(500.0, 5.0), -std::f32::consts::FRAC_PI_2, Team::Blue);
    idle(&mut state);
    idle(&mut state);
    assert!(state.bullets.is_empty());

    // A stationary bullet in open space only dies of old age
    fire_bullet(&mut state, Vec2::new(500.0, 600.0), 0.0, Team::Blue);
    state.bullets[0].speed = 0.0;
    let mut ticks = 0;
    while !state.bullets.is_empty() {
        idle(&mut state);
        ticks += 1;
        assert!(ticks <= 181, "bullet outlived its lifetime");
    }
    assert!(ticks >= 179);
}

#[test]
fn expired_bullet_never_collides() {
    let mut state = open_arena(8);
    let bush_id = state.next_entity_id();
    state
        .obstacles
        .push(Obstacle::new(bush_id, ObstacleKind::Bush, Vec2::new(400.0, 300.0)));

    // Both bullets already past their lifetime, parked inside a target
    let born = state.clock_ms - BULLET_LIFETIME_MS;
    for pos in [Vec2::new(615.0, 315.0), Vec2::new(410.0, 320.0)] {
        let id = state.next_entity_id();
        let mut bullet = Bullet::from_spawn(
            id,
            BulletSpawn {
                pos,
                angle: 0.0,
                owner: Team::Blue,
            },
            born,
        );
        bullet.speed = 0.0;
        state.bullets.push(bullet);
    }
    idle(&mut state);

    assert!(state.bullets.is_empty());
    assert_eq!(state.tank(Team::Red).lives, TANK_LIVES);
    assert!(!state.tank(Team::Red).invulnerable);
    assert_eq!(state.tank(Team::Blue).score, 0);
    assert_eq!(state.obstacles[0].health, 2);
    let events = state.take_events();
    assert_eq!(
        events
            .game
            .iter()
            .filter(|e| matches!(e, GameEvent::BulletExpired { .. }))
            .count(),
        2
    );
    assert!(bursts(&events).is_empty());
}

#[test]
fn offscreen_bullet_never_collides() {
    let mut state = open_arena(9);
    // Red parked against the right edge, its box poking past the margin
    state.tanks[1].pos = Vec2::new(990.0, 300.0);
    // One tick carries the bullet to x=1015, beyond SCREEN_WIDTH + OFFSCREEN_MARGIN
    fire_bullet(&mut state, Vec2::new(1005.0, 315.0), 0.0, Team::Blue);
    assert!(state.bullets[0].rect().intersects(&state.tank(Team::Red).rect()));
    idle(&mut state);

    assert!(state.bullets.is_empty());
    assert_eq!(state.tank(Team::Red).lives, TANK_LIVES);
    assert_eq!(state.tank(Team::Blue).score, 0);
    assert!(
        state
            .take_events()
            .game
            .contains(&GameEvent::BulletExpired { owner: Team::Blue })
    );
}

#[test]
fn same_seed_same_match() {
    let settings = Settings::default();
    let script: [&[&str]; 3] = [&["W", "I", "D"], &["W", "J"], &["I", "A", "D"]];

    let run = || {
        let mut game = Game::new(&settings, 2024);
        for frame in 0..600 {
            game.frame(SIM_DT, script[frame % script.len()]);
        }
        serde_json::to_string(&game.snapshot()).expect("snapshot json")
    };
    assert_eq!(run(), run());
}
