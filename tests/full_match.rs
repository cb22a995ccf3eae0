use eight_ball::sim::{GamePhase, Group};
use eight_ball::{GameController, Settings, Snapshot};

const FRAME_CAP: u64 = 300_000;

fn play(seed: u64) -> (GameController, Vec<Snapshot>) {
    let mut game = GameController::new(Settings::ai_vs_ai(seed));
    let mut turn_ends = Vec::new();
    let mut last_phase = game.phase();

    while game.phase() != GamePhase::GameOver && game.frame_count() < FRAME_CAP {
        game.frame();
        if game.phase() != last_phase {
            last_phase = game.phase();
            turn_ends.push(game.snapshot());
        }
    }
    (game, turn_ends)
}

#[test]
fn computer_match_runs_to_completion() {
    for seed in [1, 2, 3] {
        let (game, history) = play(seed);
        let end = game.snapshot();

        assert!(end.balls.len() <= 16);
        if end.phase == GamePhase::GameOver {
            assert!(end.winner.is_some(), "seed {seed}: game over without a winner");
        }

        // Groups are assigned once and stay complementary
        let mut assigned: Option<Group> = None;
        for snap in &history {
            match (assigned, snap.player_group) {
                (None, Some(g)) => assigned = Some(g),
                (Some(a), g) => assert_eq!(g, Some(a), "seed {seed}: group changed"),
                (None, None) => {}
            }
            assert_eq!(snap.opponent_group, snap.player_group.map(Group::opposite));
        }
    }
}

#[test]
fn computer_match_is_deterministic() {
    let (a, _) = play(42);
    let (b, _) = play(42);
    assert_eq!(a.snapshot(), b.snapshot());
}
