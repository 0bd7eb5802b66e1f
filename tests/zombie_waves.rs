//! Zombie hops, target seeking and wave progression.

mod common;

use bevy::prelude::*;
use bevy_rapier3d::prelude::ExternalImpulse;
use common::*;
use moonkey_beat::core::WaveEvent;
use moonkey_beat::moonkey::MoonkeyStateMachine;
use moonkey_beat::waves::WaveState;
use moonkey_beat::zombie::{Zombie, ZombieStateMachine};

fn impulse(app: &App, zombie: Entity) -> Vec3 {
    app.world()
        .get::<ExternalImpulse>(zombie)
        .expect("has impulse")
        .impulse
}

fn target(app: &App, zombie: Entity) -> Option<Entity> {
    app.world()
        .get::<ZombieStateMachine>(zombie)
        .expect("zombie has a state machine")
        .target()
}

#[test]
fn zombies_hop_toward_their_target_on_even_beats() {
    let mut app = headless_app(test_config());
    let moonkey = spawn_moonkey(&mut app, Vec2::ZERO);
    let zombie = spawn_zombie(&mut app, Vec2::new(5.0, 0.0));
    start_session(&mut app);

    advance_to_beat(&mut app, 1);
    assert_eq!(impulse(&app, zombie), Vec3::ZERO);

    advance_to_beat(&mut app, 2);
    let tuning = config(&app).zombie;
    assert_eq!(impulse(&app, zombie), Vec3::new(-tuning.hop_impulse, tuning.hop_lift, 0.0));
    assert_eq!(target(&app, zombie), Some(moonkey));
}

#[test]
fn attacking_moonkeys_are_passed_over() {
    let mut app = headless_app(test_config());
    let busy = spawn_moonkey(&mut app, Vec2::new(4.0, 0.0));
    let free = spawn_moonkey(&mut app, Vec2::new(10.0, 0.0));
    let zombie = spawn_zombie(&mut app, Vec2::new(5.0, 0.0));
    start_session(&mut app);

    app.world_mut()
        .get_mut::<MoonkeyStateMachine>(busy)
        .expect("moonkey has a state machine")
        .begin_attack();

    advance_to_beat(&mut app, 2);
    assert_eq!(target(&app, zombie), Some(free));
    assert!(impulse(&app, zombie).x > 0.0);
}

#[test]
fn clearing_a_wave_starts_a_bigger_one() {
    let mut config = test_config();
    config.waves.auto_start = true;
    config.waves.first_wave_size = 1;
    config.waves.wave_growth = 1;
    config.waves.spawn_points = vec![(1.5, 0.0)];
    config.zombie.hits_to_launch = 1;

    let mut app = headless_app(config);
    capture::<WaveEvent>(&mut app);
    let moonkey = spawn_moonkey(&mut app, Vec2::ZERO);
    start_session(&mut app);

    assert_eq!(
        captured::<WaveEvent>(&app),
        vec![WaveEvent::Started {
            wave: 1,
            enemies: 1
        }]
    );
    assert_eq!(
        *app.world().resource::<WaveState>(),
        WaveState {
            wave: 1,
            remaining: 1
        }
    );

    advance_to_beat(&mut app, 2);
    attack(&mut app, moonkey);
    app.update();

    assert_eq!(
        captured::<WaveEvent>(&app),
        vec![
            WaveEvent::Started {
                wave: 1,
                enemies: 1
            },
            WaveEvent::Cleared { wave: 1 },
            WaveEvent::Started {
                wave: 2,
                enemies: 2
            },
        ]
    );
    assert_eq!(
        *app.world().resource::<WaveState>(),
        WaveState {
            wave: 2,
            remaining: 2
        }
    );

    let mut zombies = app.world_mut().query_filtered::<Entity, With<Zombie>>();
    // The launched zombie is still flying off alongside the two new ones.
    assert_eq!(zombies.iter(app.world()).count(), 3);
}
