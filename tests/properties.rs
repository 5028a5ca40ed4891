use glam::Vec2;
use proptest::prelude::*;
use tank_duel::consts::*;
use tank_duel::sim::collision::{hud_rect, tank_in_bounds};
use tank_duel::sim::*;

/// Bit mask over the six per-tank controls
fn input_from_mask(mask: u8) -> TickInput {
    let all = [
        Control::Advance(Team::Blue),
        Control::RotateLeft(Team::Blue),
        Control::RotateRight(Team::Blue),
        Control::Advance(Team::Red),
        Control::RotateLeft(Team::Red),
        Control::RotateRight(Team::Red),
    ];
    TickInput::from_held(
        all.into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, c)| c),
    )
}

/// Fresh match with any fallback-placed obstacle on a spawn removed
fn clear_spawns(seed: u64) -> MatchState {
    let mut state = MatchState::new(seed);
    let spawns: Vec<Rect> = state.tanks.iter().map(Tank::rect).collect();
    state
        .obstacles
        .retain(|o| !spawns.iter().any(|s| s.intersects(&o.rect())));
    state
}

fn bullet(id: u32, pos: Vec2, owner: Team) -> Bullet {
    Bullet::from_spawn(
        id,
        BulletSpawn {
            pos,
            angle: 0.0,
            owner,
        },
        0.0,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn tanks_never_overlap_anything(
        seed in any::<u64>(),
        inputs in prop::collection::vec((any::<u8>(), 0.004f32..0.05), 1..240),
    ) {
        let mut state = clear_spawns(seed);
        for (mask, dt) in inputs {
            tick(&mut state, &input_from_mask(mask), dt);
            let live: Vec<&Tank> = state.tanks.iter().filter(|t| t.is_alive()).collect();
            for tank in &live {
                let rect = tank.rect();
                prop_assert!(tank_in_bounds(tank.pos));
                prop_assert!(!rect.intersects(&hud_rect()));
                prop_assert!(!state.obstacles.iter().any(|o| rect.intersects(&o.rect())));
            }
            if live.len() == 2 {
                prop_assert!(!live[0].rect().intersects(&live[1].rect()));
            }
        }
    }

    #[test]
    fn effect_population_stays_within_budget(
        seed in any::<u64>(),
        budget in 0usize..80,
        bursts in prop::collection::vec((0usize..4, 0f32..1000.0, 80f32..700.0, any::<u8>()), 1..120),
    ) {
        let mut state = MatchState::with_effect_budget(seed, budget);
        for (count, x, y, mask) in bursts {
            let at = Vec2::new(x, y);
            let requests: Vec<EffectRequest> = (0..count)
                .map(|i| match i {
                    0 => EffectRequest::ExplosionBurst { center: at },
                    1 => EffectRequest::Sparks { at },
                    2 => EffectRequest::Smoke { at, heading: x },
                    _ => EffectRequest::Trail { at, team: Team::Red },
                })
                .collect();
            state.apply_effects(&requests);
            tick(&mut state, &input_from_mask(mask), SIM_DT);
            prop_assert!(state.effects.len() <= budget);
        }
    }

    #[test]
    fn own_bullets_never_hurt(
        offsets in prop::collection::vec((-5f32..35.0, -5f32..35.0), 1..20),
        team_is_blue in any::<bool>(),
    ) {
        let team = if team_is_blue { Team::Blue } else { Team::Red };
        let mut tanks = [Tank::new(Team::Blue), Tank::new(Team::Red)];
        let origin = tanks[team.index()].pos;
        let mut bullets: Vec<Bullet> = offsets
            .iter()
            .enumerate()
            .map(|(i, (dx, dy))| bullet(i as u32, origin + Vec2::new(*dx, *dy), team))
            .collect();
        let mut events = TickEvents::new();

        resolve_bullets(&mut bullets, &mut Vec::new(), &mut tanks, 0.0, &mut events);
        for tank in &tanks {
            prop_assert_eq!(tank.lives, TANK_LIVES);
            prop_assert_eq!(tank.score, 0);
            prop_assert!(!tank.invulnerable);
        }
        prop_assert_eq!(bullets.len(), offsets.len());
    }

    #[test]
    fn each_bullet_resolves_at_most_once(
        seed in any::<u64>(),
        shots in prop::collection::vec((0f32..1000.0, 80f32..700.0, any::<bool>()), 1..60),
    ) {
        let mut state = MatchState::new(seed);
        let mut bullets: Vec<Bullet> = shots
            .iter()
            .enumerate()
            .map(|(i, (x, y, blue))| {
                let owner = if *blue { Team::Blue } else { Team::Red };
                bullet(i as u32, Vec2::new(*x, *y), owner)
            })
            .collect();
        let mut events = TickEvents::new();

        let impacts = resolve_bullets(
            &mut bullets,
            &mut state.obstacles,
            &mut state.tanks,
            0.0,
            &mut events,
        );
        prop_assert_eq!(impacts.len() + bullets.len(), shots.len());

        let resolutions = events
            .game
            .iter()
            .filter(|e| !matches!(e, GameEvent::BulletExpired { .. } | GameEvent::MatchOver { .. }))
            .count();
        prop_assert_eq!(resolutions, impacts.len());

        let lives_lost: u32 = state.tanks.iter().map(|t| u32::from(TANK_LIVES - t.lives)).sum();
        let hits = impacts.iter().filter(|i| **i == Impact::TankHit).count() as u32;
        prop_assert_eq!(lives_lost, hits);
    }

    #[test]
    fn no_life_lost_while_invulnerable(
        seed in any::<u64>(),
        waves in prop::collection::vec((any::<u8>(), -5f32..35.0, -5f32..35.0), 1..200),
    ) {
        let mut state = clear_spawns(seed);
        for (mask, dx, dy) in waves {
            // Red keeps shooting straight into Blue's box
            let target = state.tanks[0].pos + Vec2::new(dx, dy);
            let id = state.next_entity_id();
            let now = state.clock_ms;
            state.bullets.push(Bullet::from_spawn(
                id,
                BulletSpawn { pos: target, angle: 0.0, owner: Team::Red },
                now,
            ));

            let was_invulnerable = state.tanks[0].invulnerable;
            let lives_before = state.tanks[0].lives;
            tick(&mut state, &input_from_mask(mask & 0b111), SIM_DT);
            if was_invulnerable {
                prop_assert_eq!(state.tanks[0].lives, lives_before);
            }
            if state.tanks[0].invulnerable {
                prop_assert!(state.clock_ms - state.tanks[0].invulnerable_since_ms < INVULNERABILITY_MS);
            }
            if state.phase == GamePhase::MatchOver {
                break;
            }
        }
    }

    #[test]
    fn accepted_shots_respect_cooldown(
        mut times in prop::collection::vec(0f64..10_000.0, 1..100),
    ) {
        times.sort_by(f64::total_cmp);
        let mut tank = Tank::new(Team::Blue);
        let mut events = TickEvents::new();
        let accepted: Vec<f64> = times
            .iter()
            .copied()
            .filter(|now| tank.try_fire(*now, &mut events).is_some())
            .collect();
        prop_assert!(!accepted.is_empty());
        for pair in accepted.windows(2) {
            prop_assert!(pair[1] - pair[0] >= FIRE_COOLDOWN_MS);
        }
    }
}
