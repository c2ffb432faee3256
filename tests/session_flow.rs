//! Session Flow Tests
//!
//! Full play-throughs driven frame by frame against the headless platform:
//! clearing levels, running out of lives, running out of time.
//!
//! # Running tests
//! ```bash
//! cargo test --test session_flow
//! ```

use brickfall::consts::*;
use brickfall::platform::{HeadlessPlatform, ModalKind, PanelId, PlatformCall};
use brickfall::sim::{Game, GamePhase, PauseReason, TIME_UP_MESSAGE};
use brickfall::{Difficulty, Settings, Theme, Tuning};

// ==================== HELPER FUNCTIONS ====================

fn new_game(theme: Theme, difficulty: Difficulty, level: usize) -> (Game, HeadlessPlatform) {
    let mut game = Game::new(Tuning::default(), Settings::default(), 2024).unwrap();
    let mut platform = HeadlessPlatform::new();
    game.select_theme(theme, &mut platform);
    game.start_game(difficulty, level, 0.0, &mut platform).unwrap();
    (game, platform)
}

/// Aim the ball at every live brick in scan order, one frame per hit, until
/// the grid is empty. Returns the number of hits.
fn hit_every_brick(game: &mut Game, platform: &mut HeadlessPlatform, now: &mut f64) -> u32 {
    let mut hits = 0;
    let (columns, rows) = (game.state.grid.columns(), game.state.grid.rows());
    for col in 0..columns {
        for row in 0..rows {
            while game.phase() == GamePhase::Playing
                && game.state.grid.get(col, row).is_some_and(|b| b.is_live())
            {
                let center = game.state.grid.cell_rect(col, row).center();
                game.state.ball.pos = center - game.state.ball.vel.as_vec2();
                *now += FRAME_MS;
                game.update(*now, platform);
                hits += 1;
            }
        }
    }
    hits
}

// ==================== LEVEL PROGRESSION ====================

#[test]
fn easy_level_one_clears_into_level_two() {
    let (mut game, mut platform) = new_game(Theme::NightSky, Difficulty::Easy, 0);
    assert_eq!(game.state.grid.remaining(), 15);
    assert_eq!(game.state.ball.vel, glam::IVec2::new(2, -2));

    let mut now = 0.0;
    let hits = hit_every_brick(&mut game, &mut platform, &mut now);

    assert_eq!(hits, 15);
    // 1 + 3 + 5 + ... + 29
    assert_eq!(game.state.score, 225);
    // Score landed exactly on 100 at the tenth hit
    assert_eq!(game.state.lives, STARTING_LIVES + 1);
    assert_eq!(platform.count(&PlatformCall::HitSound), 15);
    assert_eq!(game.state.total_score, 225);

    let resume_at = now + LEVEL_COMPLETE_OVERLAY_MS;
    assert_eq!(
        game.phase(),
        GamePhase::Paused(PauseReason::LevelTransition { resume_at })
    );
    assert!(!game.countdown_running());
    assert!(platform.calls.contains(&PlatformCall::Show(PanelId::LevelComplete)));

    game.update(resume_at - 1.0, &mut platform);
    assert!(game.state.is_paused());
    platform.clear_calls();

    game.update(resume_at, &mut platform);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.state.level, 1);
    assert_eq!((game.state.grid.columns(), game.state.grid.rows()), (6, 4));
    assert_eq!(game.state.grid.cell_count(), 24);
    // Each level starts from a clean slate; the cleared level is banked
    assert_eq!(game.state.score, 0);
    assert_eq!(game.state.lives, STARTING_LIVES);
    assert_eq!(game.state.total_score, 225);
    assert!(platform.calls.contains(&PlatformCall::Score(0)));
    assert!(platform.calls.contains(&PlatformCall::Lives(STARTING_LIVES)));
    assert_eq!(game.state.time_remaining, LEVEL_TIME_SECS);
    assert_eq!(game.state.combo.count, 0);
    assert!(game.countdown_running());
    assert!(platform.calls.contains(&PlatformCall::Hide(PanelId::LevelComplete)));
}

#[test]
fn final_level_shows_completion_and_returns_to_menu() {
    let (mut game, mut platform) = new_game(Theme::Forest, Difficulty::Medium, 2);
    let mut now = 0.0;
    hit_every_brick(&mut game, &mut platform, &mut now);
    assert!(game.state.grid.all_cleared());

    game.update(now + LEVEL_COMPLETE_OVERLAY_MS, &mut platform);
    assert_eq!(game.phase(), GamePhase::LevelComplete);
    let modal = platform.last_modal().unwrap();
    assert_eq!(modal.title, "Congratulations!");
    assert_eq!(modal.kind, ModalKind::Success);
    assert!(modal.message.contains("medium"));

    game.acknowledge(&mut platform);
    assert_eq!(game.phase(), GamePhase::Menu);
    assert_eq!(game.state.score, 0);
    assert_eq!(game.state.level, 0);
}

#[test]
fn completing_every_level_reports_banked_total() {
    let (mut game, mut platform) = new_game(Theme::NightSky, Difficulty::Easy, 0);
    let mut now = 0.0;
    let mut expected = 0;
    for level in 0..LEVELS_PER_DIFFICULTY {
        assert_eq!(game.state.level, level);
        assert_eq!(game.state.score, 0);
        hit_every_brick(&mut game, &mut platform, &mut now);
        assert!(game.state.grid.all_cleared());
        expected += game.state.score;
        assert_eq!(game.state.total_score, expected);
        now += LEVEL_COMPLETE_OVERLAY_MS;
        game.update(now, &mut platform);
    }

    assert_eq!(game.phase(), GamePhase::LevelComplete);
    assert!(expected > 225);
    let modal = platform.last_modal().unwrap();
    assert!(modal.message.ends_with(&format!("Total score: {expected}")));

    game.acknowledge(&mut platform);
    assert_eq!(game.state.total_score, 0);
}

#[test]
fn hard_bricks_take_several_hits() {
    let (mut game, mut platform) = new_game(Theme::NightSky, Difficulty::Hard, 0);
    let bricks = game.state.grid.remaining() as u32;
    let mut now = 0.0;
    let hits = hit_every_brick(&mut game, &mut platform, &mut now);
    assert!(hits >= bricks);
    assert!(hits <= bricks * MAX_DURABILITY as u32);
    assert!(game.state.grid.all_cleared());
}

// ==================== GAME OVER ====================

#[test]
fn dropping_the_last_ball_ends_the_game() {
    let (mut game, mut platform) = new_game(Theme::NightSky, Difficulty::Easy, 0);
    game.state.lives = 1;
    game.state.ball.pos = glam::Vec2::new(40.0, 587.0);
    game.state.ball.vel = glam::IVec2::new(2, 2);
    game.update(FRAME_MS, &mut platform);

    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(!platform.music_playing);
    assert_eq!(platform.count(&PlatformCall::MusicPause), 1);
    let modal = platform.last_modal().unwrap();
    assert_eq!(modal.title, "Game Over");
    assert_eq!(modal.kind, ModalKind::Error);
}

#[test]
fn countdown_expiry_forces_game_over() {
    let (mut game, mut platform) = new_game(Theme::NightSky, Difficulty::Easy, 0);
    let bricks = game.state.grid.remaining();

    // Halfway: time reported every second
    game.update(90_000.0, &mut platform);
    assert_eq!(game.state.time_remaining, 90);
    assert!(platform.calls.contains(&PlatformCall::Time(91)));

    game.update(180_000.0, &mut platform);
    assert_eq!(game.state.time_remaining, 0);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.state.lives, STARTING_LIVES);
    assert_eq!(game.state.grid.remaining(), bricks);
    assert_eq!(platform.last_modal().unwrap().message, TIME_UP_MESSAGE);
    assert!(!platform.music_playing);

    // Nothing else happens after the fact
    game.update(200_000.0, &mut platform);
    assert_eq!(game.state.time_remaining, 0);
}

#[test]
fn autopilot_keeps_ball_in_play() {
    let (mut game, mut platform) = new_game(Theme::Forest, Difficulty::Easy, 0);
    let mut now = 0.0;
    for _ in 0..3_000 {
        game.set_input(brickfall::sim::autopilot(&game.state));
        now += FRAME_MS;
        game.update(now, &mut platform);
        if game.phase() != GamePhase::Playing {
            break;
        }
    }
    assert_ne!(game.phase(), GamePhase::Paused(PauseReason::LifeLost));
    assert_ne!(game.phase(), GamePhase::GameOver);
    assert!(game.state.score > 0);
}
