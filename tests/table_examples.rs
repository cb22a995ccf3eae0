use eight_ball::sim::{
    Ball, CUE_BALL, EIGHT_BALL, Foul, GamePhase, GameState, Shooter, Table, TurnState,
    evaluate_turn_end, run_until_rest, step,
};
use eight_ball::{GameController, Settings, consts::FRICTION};
use glam::Vec2;

/// Head-on hit: the cue ball hands its whole velocity to the 8 and stops.
#[test]
fn head_on_hit_exchanges_velocity() {
    let table = Table::default();
    let mut balls = vec![
        Ball::new(CUE_BALL, Vec2::new(100.0, 100.0)).with_vel(Vec2::new(5.0, 0.0)),
        Ball::new(EIGHT_BALL, Vec2::new(140.0, 100.0)),
    ];

    let mut contact_tick = None;
    for tick in 1..=50u32 {
        let report = step(&table, &mut balls);
        if report.first_hit.is_some() {
            assert_eq!(report.first_hit, Some(EIGHT_BALL));
            contact_tick = Some(tick);
            break;
        }
    }
    let Some(tick) = contact_tick else {
        panic!("cue ball never reached the 8");
    };

    // Momentum the cue ball carried into the contact tick
    let incoming = 5.0 * FRICTION.powi(tick as i32);
    assert!(balls[0].vel.length() < 1e-4, "cue ball kept {:?}", balls[0].vel);
    assert!((balls[1].vel.x - incoming).abs() < 1e-3);
    assert!(balls[1].vel.y.abs() < 1e-4);
    assert!(balls[1].pos.x - balls[0].pos.x >= table.contact_distance() - 1e-3);

    let (_, ticks) = run_until_rest(&table, &mut balls, 10_000);
    assert!(ticks < 10_000);
    assert_eq!(balls.len(), 2);
    assert!(balls[0].pos.x < 130.0);
    assert!(balls[1].pos.x > 300.0);
    assert!(balls.iter().all(|b| !b.is_moving()));
}

/// Cue ball rolls to a stop without touching anything: foul, ball in hand.
#[test]
fn shot_without_contact_is_a_foul() {
    let table = Table::default();
    let mut balls = vec![
        Ball::new(CUE_BALL, Vec2::new(200.0, 240.0)).with_vel(Vec2::new(0.0, 2.0)),
        Ball::new(4, Vec2::new(600.0, 240.0)),
        Ball::new(13, Vec2::new(700.0, 300.0)),
    ];

    let (shot, ticks) = run_until_rest(&table, &mut balls, 10_000);

    assert!(ticks < 10_000);
    assert_eq!(shot.first_hit, None);
    assert!(!shot.scratch);
    assert!(shot.potted.is_empty());

    let outcome = evaluate_turn_end(&TurnState::default(), &shot, &balls);
    assert_eq!(outcome.foul, Some(Foul::NoContact));
    assert_eq!(outcome.next_phase, GamePhase::Placing);
    assert_eq!(outcome.next_shooter, Shooter::Opponent);
}

/// A ball resting inside a corner pocket's capture radius is removed on
/// the next tick and stays gone.
#[test]
fn ball_in_corner_pocket_is_captured_once() {
    let table = Table::default();
    let mut balls = vec![
        Ball::new(5, Vec2::new(45.0, 42.0)),
        Ball::new(12, Vec2::new(400.0, 240.0)),
    ];

    let first = step(&table, &mut balls);
    assert_eq!(first.potted, vec![5]);
    assert!(balls.iter().all(|b| b.id != 5));

    let second = step(&table, &mut balls);
    assert!(second.potted.is_empty());
    assert_eq!(balls.len(), 1);
}

/// Scratch with an object ball also dropping: ball in hand for the other
/// shooter no matter what went down.
#[test]
fn scratch_hands_ball_in_hand_to_opponent() {
    let table = Table::default();
    let mut balls = vec![
        Ball::new(CUE_BALL, Vec2::new(830.0, 430.0)).with_vel(Vec2::new(1.0, 1.0)),
        Ball::new(3, Vec2::new(825.0, 55.0)).with_vel(Vec2::new(1.0, -1.0)),
        Ball::new(11, Vec2::new(400.0, 240.0)),
    ];

    let (shot, _) = run_until_rest(&table, &mut balls, 1_000);

    assert!(shot.scratch);
    assert_eq!(shot.potted, vec![3]);
    assert!(balls.iter().all(|b| !b.is_cue()));

    let outcome = evaluate_turn_end(&TurnState::default(), &shot, &balls);
    assert!(outcome.is_foul());
    assert_eq!(outcome.next_shooter, Shooter::Opponent);
    assert_eq!(outcome.next_phase, GamePhase::Placing);
    assert!(outcome.next_groups.is_open());
}

/// Same scratch driven through the controller, then the human places the
/// cue ball back after the opponent's turn is handed over.
#[test]
fn controller_scratch_then_placement() {
    let mut state = GameState::new();
    state.balls = vec![
        Ball::new(CUE_BALL, Vec2::new(830.0, 430.0)).with_vel(Vec2::new(1.0, 1.0)),
        Ball::new(11, Vec2::new(400.0, 240.0)),
    ];
    state.turn.phase = GamePhase::Moving;

    // Opponent is human here so it can place by hand
    let settings = Settings {
        opponent_is_ai: false,
        ..Settings::default()
    };
    let mut game = GameController::with_state(state, settings);

    for _ in 0..100 {
        game.frame();
    }

    assert_eq!(game.phase(), GamePhase::Placing);
    assert_eq!(game.state().turn.shooter, Shooter::Opponent);
    assert!(game.state().cue_ball().is_none());
    assert!(game.snapshot().message.contains("Scratch"));

    assert!(game.place_cue_ball(Vec2::new(20.0, 240.0)).is_err());
    assert!(game.place_cue_ball(Vec2::new(240.0, 240.0)).is_ok());
    assert_eq!(game.phase(), GamePhase::Aiming);
    assert!(game.state().cue_ball().is_some());
}
