//! Game controller
//!
//! Single owner of the simulation state. Driven one frame at a time by the
//! host: steps physics while balls move, judges the shot when they stop,
//! and runs the computer shooter's think/placement delays as tasks bound to
//! the phase they were scheduled in.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::sim::{
    AimPreview, Ball, GamePhase, GameState, Group, Shooter, aim_preview, choose_ai_placement,
    evaluate_turn_end, group_remaining, place_cue_ball, plan_shot, step,
};

/// Deferred AI action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    AiShot,
    AiPlacement,
}

/// A delayed action tied to one phase entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub kind: TaskKind,
    /// Frame on which the task fires
    pub due_frame: u64,
    /// Phase entry the task belongs to
    epoch: u64,
}

/// Read-only view of the game for the renderer/HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub balls: Vec<Ball>,
    pub shooter: Shooter,
    pub phase: GamePhase,
    pub player_group: Option<Group>,
    pub opponent_group: Option<Group>,
    pub message: String,
    pub winner: Option<Shooter>,
    pub solids_remaining: usize,
    pub stripes_remaining: usize,
    /// An AI delay is running
    pub ai_thinking: bool,
}

pub struct GameController {
    state: GameState,
    settings: Settings,
    rng: Pcg32,
    /// Frames processed so far
    frame: u64,
    /// Bumped on every phase entry; tasks from older entries are stale
    epoch: u64,
    pending: Option<ScheduledTask>,
    active: bool,
}

impl GameController {
    /// Racked game on the standard table
    pub fn new(settings: Settings) -> Self {
        Self::with_state(GameState::new(), settings)
    }

    pub fn with_state(state: GameState, settings: Settings) -> Self {
        log::info!(
            "New game (seed {}, player ai: {}, opponent ai: {})",
            settings.seed,
            settings.player_is_ai,
            settings.opponent_is_ai
        );
        Self {
            state,
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            frame: 0,
            epoch: 0,
            pending: None,
            active: true,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.state.turn.phase
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn pending_task(&self) -> Option<ScheduledTask> {
        self.pending
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance one frame
    pub fn frame(&mut self) {
        if !self.active {
            return;
        }
        self.frame += 1;

        match self.state.turn.phase {
            GamePhase::Moving => self.advance_physics(),
            GamePhase::TurnEnd => self.finish_turn(),
            GamePhase::Aiming | GamePhase::Placing => self.drive_ai(),
            GamePhase::GameOver => {}
        }
    }

    /// Release a shot for the human shooter. `drag` runs from the pointer to
    /// the cue ball and is scaled by the power multiplier.
    pub fn shoot(&mut self, drag: Vec2) -> Result<()> {
        self.expect_phase(GamePhase::Aiming)?;
        self.expect_human()?;
        if drag == Vec2::ZERO || !drag.is_finite() {
            return Err(Error::ZeroShot);
        }
        self.release(drag * self.settings.power_multiplier)
    }

    /// Shot from a pointer position rather than a drag vector
    pub fn shoot_from_pointer(&mut self, pointer: Vec2) -> Result<()> {
        let cue = self.state.cue_ball().ok_or(Error::NoCueBall)?.pos;
        self.shoot(cue - pointer)
    }

    /// Aim-line preview for a pointer position while aiming
    pub fn aim(&self, pointer: Vec2) -> Option<AimPreview> {
        if self.state.turn.phase != GamePhase::Aiming {
            return None;
        }
        let cue = self.state.cue_ball()?;
        aim_preview(&self.state.table, &self.state.balls, cue.pos - pointer)
    }

    /// Ball-in-hand placement by the human shooter. A rejected position
    /// leaves the game untouched.
    pub fn place_cue_ball(&mut self, pos: Vec2) -> Result<()> {
        self.expect_phase(GamePhase::Placing)?;
        self.expect_human()?;
        self.apply_placement(pos)
    }

    /// Stop the session; pending AI work is dropped
    pub fn end_session(&mut self) {
        if let Some(task) = self.pending.take() {
            log::debug!("Session ended, canceled {:?}", task.kind);
        }
        self.active = false;
        log::info!("Session ended at frame {}", self.frame);
    }

    /// Re-rack on the same table
    pub fn reset(&mut self) {
        self.state = GameState::with_table(self.state.table.clone());
        self.pending = None;
        self.epoch += 1;
        self.active = true;
        log::info!("Game reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        let turn = &self.state.turn;
        Snapshot {
            frame: self.frame,
            balls: self.state.balls.clone(),
            shooter: turn.shooter,
            phase: turn.phase,
            player_group: turn.groups.for_shooter(Shooter::Player),
            opponent_group: turn.groups.for_shooter(Shooter::Opponent),
            message: turn.message.clone(),
            winner: turn.winner,
            solids_remaining: group_remaining(&self.state.balls, Group::Solids),
            stripes_remaining: group_remaining(&self.state.balls, Group::Stripes),
            ai_thinking: self.pending.is_some(),
        }
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<()> {
        let actual = self.state.turn.phase;
        if actual != expected {
            return Err(Error::WrongPhase { expected, actual });
        }
        Ok(())
    }

    fn expect_human(&self) -> Result<()> {
        if self.settings.is_ai(self.state.turn.shooter) {
            return Err(Error::NotHumanTurn);
        }
        Ok(())
    }

    /// Switch phase. Any pending task belongs to the phase being left and
    /// is dropped.
    fn enter_phase(&mut self, phase: GamePhase) {
        if let Some(task) = self.pending.take() {
            log::debug!("Canceled {:?} on entering {}", task.kind, phase);
        }
        self.epoch += 1;
        if self.state.turn.phase != phase {
            log::debug!("Phase {} -> {}", self.state.turn.phase, phase);
        }
        self.state.turn.phase = phase;
    }

    fn release(&mut self, velocity: Vec2) -> Result<()> {
        let cue = self.state.cue_ball_mut().ok_or(Error::NoCueBall)?;
        cue.vel = velocity;
        self.state.turn.shot.reset();
        log::info!(
            "{} shoots ({:.2}, {:.2})",
            self.state.turn.shooter.as_str(),
            velocity.x,
            velocity.y
        );
        self.enter_phase(GamePhase::Moving);
        Ok(())
    }

    fn advance_physics(&mut self) {
        let report = step(&self.state.table, &mut self.state.balls);
        report.merge_into(&mut self.state.turn.shot);
        self.state.time_ticks += 1;

        if !report.still_moving {
            self.enter_phase(GamePhase::TurnEnd);
            self.finish_turn();
        }
    }

    fn finish_turn(&mut self) {
        let outcome = evaluate_turn_end(&self.state.turn, &self.state.turn.shot, &self.state.balls);
        log::debug!(
            "Turn end after {} ticks: {:?}",
            self.state.time_ticks,
            self.state.turn.shot
        );
        self.state.turn.apply(&outcome);
        self.enter_phase(outcome.next_phase);
    }

    fn drive_ai(&mut self) {
        let shooter = self.state.turn.shooter;
        if !self.settings.is_ai(shooter) {
            return;
        }

        let task = match self.pending {
            Some(task) if task.epoch == self.epoch => task,
            _ => self.schedule(),
        };
        if self.frame < task.due_frame {
            return;
        }

        self.pending = None;
        match task.kind {
            TaskKind::AiShot => self.ai_shot(shooter),
            TaskKind::AiPlacement => self.ai_placement(),
        }
    }

    fn schedule(&mut self) -> ScheduledTask {
        let (kind, delay_ms) = match self.state.turn.phase {
            GamePhase::Placing => (TaskKind::AiPlacement, self.settings.ai_place_ms),
            _ => {
                let (lo, hi) = (self.settings.ai_think_min_ms, self.settings.ai_think_max_ms);
                (TaskKind::AiShot, self.rng.random_range(lo..=hi.max(lo)))
            }
        };
        let task = ScheduledTask {
            kind,
            due_frame: self.frame + self.settings.ms_to_frames(delay_ms),
            epoch: self.epoch,
        };
        log::debug!("Scheduled {:?} for frame {}", kind, task.due_frame);
        self.pending = Some(task);
        task
    }

    fn ai_shot(&mut self, shooter: Shooter) {
        let group = self.state.turn.groups.for_shooter(shooter);
        match plan_shot(&self.state.table, &self.state.balls, group) {
            Some(velocity) => {
                if let Err(e) = self.release(velocity) {
                    log::warn!("AI shot not released: {}", e);
                    self.pass_turn();
                }
            }
            None => self.pass_turn(),
        }
    }

    fn ai_placement(&mut self) {
        match choose_ai_placement(&self.state.table, &self.state.balls) {
            Some(pos) => {
                if let Err(e) = self.apply_placement(pos) {
                    log::warn!("AI placement rejected: {}", e);
                }
            }
            None => log::warn!("No legal cue-ball placement found"),
        }
    }

    fn pass_turn(&mut self) {
        let shooter = self.state.turn.shooter;
        let next = shooter.other();
        self.state.turn.shooter = next;
        self.state.turn.message = format!("{} has no shot. {}'s turn.", shooter.as_str(), next.as_str());
        log::info!("{}", self.state.turn.message);
        self.enter_phase(GamePhase::Aiming);
    }

    fn apply_placement(&mut self, pos: Vec2) -> Result<()> {
        place_cue_ball(&self.state.table, &mut self.state.balls, pos)?;
        self.state.normalize_order();
        self.state.turn.message = format!("{}'s Turn", self.state.turn.shooter.as_str());
        log::info!(
            "{} placed the cue ball at ({:.1}, {:.1})",
            self.state.turn.shooter.as_str(),
            pos.x,
            pos.y
        );
        self.enter_phase(GamePhase::Aiming);
        Ok(())
    }
}
