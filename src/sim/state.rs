//! Game state and level generation
//!
//! Everything random comes from one seeded `Pcg32`, so a seed and a settings
//! file fully determine a run.

use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::block::Block;
use super::collision::{Collidable, CollidableId, CollisionRegistry, RegistryHandle};
use super::color::Color;
use super::listeners::{
    BallRemover, BlockRemover, Counter, HitListener, HitNotifier, ScoreTrackingListener,
};
use super::paddle::Paddle;
use crate::consts::{DEATH_BLOCK_DROP, PADDLE_BOTTOM_MARGIN};
use crate::geometry::{Point, Rectangle, Velocity};
use crate::settings::{BottomEdge, Settings, SettingsError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Every block destroyed
    Won,
    /// Every ball lost
    Lost,
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// A running game
pub struct GameState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub registry: RegistryHandle,
    pub paddle: Rc<Paddle>,
    /// Balls in play, in spawn order
    pub balls: Vec<Ball>,
    pub remaining_blocks: Counter,
    pub remaining_balls: Counter,
    pub score: Counter,
    score_tracker: Rc<ScoreTrackingListener>,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    next_id: u32,
}

impl GameState {
    /// Build a fresh level from `settings`, rejecting settings that fail
    /// [`Settings::validate`]
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let seed = settings.seed;
        let registry = CollisionRegistry::new().into_handle();
        let score = Counter::default();
        let paddle = Rc::new(Paddle::new(
            CollidableId(0),
            Rectangle::new(Point::new(0.0, 0.0), settings.paddle_width, settings.paddle_height),
            Color::ORANGE,
            settings.paddle_step,
            0.0,
            settings.gui_width,
        ));

        let mut state = Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            registry,
            paddle,
            balls: Vec::new(),
            remaining_blocks: Counter::default(),
            remaining_balls: Counter::default(),
            score: score.clone(),
            score_tracker: Rc::new(ScoreTrackingListener::new(score)),
            phase: GamePhase::Playing,
            time_ticks: 0,
            next_id: 1,
        };
        state.generate_level();
        Ok(state)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn score(&self) -> i64 {
        self.score.value()
    }

    fn register(&self, collidable: Rc<dyn Collidable>) {
        self.registry.borrow_mut().register(collidable);
    }

    fn generate_level(&mut self) {
        self.create_bounds();
        self.create_blocks();
        self.create_paddle();
        self.create_balls();
        log::info!(
            "Level ready (seed {}): {} blocks, {} balls, {} collidables",
            self.seed,
            self.remaining_blocks.value(),
            self.remaining_balls.value(),
            self.registry.borrow().len()
        );
    }

    /// Walls as blocks: top, left, right, and a death block below the screen
    fn create_bounds(&mut self) {
        let s = self.settings.clone();
        let t = s.bounds_thickness;
        let side_height = s.gui_height - s.score_bar_height;
        let walls = [
            Rectangle::new(Point::new(0.0, s.score_bar_height), s.gui_width, t),
            Rectangle::new(Point::new(0.0, s.score_bar_height), t, side_height),
            Rectangle::new(Point::new(s.gui_width - t, s.score_bar_height), t, side_height),
        ];
        for rect in walls {
            let id = CollidableId(self.next_entity_id());
            self.register(Rc::new(Block::new(id, rect, Color::GRAY)));
        }

        if s.bottom_edge == BottomEdge::Death {
            let id = CollidableId(self.next_entity_id());
            let floor = Rectangle::new(
                Point::new(0.0, s.gui_height + DEATH_BLOCK_DROP),
                s.gui_width,
                t,
            );
            self.register(Rc::new(
                Block::new(id, floor, Color::BACKGROUND).with_death(true),
            ));
        }
    }

    /// A staircase of coloured rows hanging off the right wall.
    /// Row `j` holds `2 * rows - j` blocks, one colour per row.
    fn create_blocks(&mut self) {
        let s = self.settings.clone();
        let remover: Rc<dyn HitListener> = Rc::new(BlockRemover::new(
            &self.registry,
            self.remaining_blocks.clone(),
        ));
        let scorer: Rc<dyn HitListener> = self.score_tracker.clone();

        for row in 0..s.block_rows {
            let color = Color::random(&mut self.rng);
            let y = f64::from(row + 3) * s.block_height + s.bounds_thickness + 1.0;
            for i in 0..(2 * s.block_rows - row) {
                let x = s.gui_width - (f64::from(i + 1) * s.block_width + s.bounds_thickness);
                let id = CollidableId(self.next_entity_id());
                let rect = Rectangle::new(Point::new(x, y), s.block_width, s.block_height);
                let mut block = Block::new(id, rect, color);
                block.add_hit_listener(remover.clone());
                block.add_hit_listener(scorer.clone());
                self.register(Rc::new(block));
                self.remaining_blocks.increase(1);
            }
        }
    }

    /// Centred near the bottom, moving between the side walls
    fn create_paddle(&mut self) {
        let id = CollidableId(self.next_entity_id());
        let s = &self.settings;
        let x = (s.gui_width - s.paddle_width) / 2.0;
        let y = s.gui_height - s.paddle_height - PADDLE_BOTTOM_MARGIN;
        let paddle = Rc::new(Paddle::new(
            id,
            Rectangle::new(Point::new(x, y), s.paddle_width, s.paddle_height),
            Color::ORANGE,
            s.paddle_step,
            s.bounds_thickness,
            s.gui_width - s.bounds_thickness,
        ));
        self.paddle = paddle.clone();
        self.register(paddle);
    }

    /// Balls spawn at random between the lowest block row and the paddle
    fn create_balls(&mut self) {
        let s = self.settings.clone();
        let r = s.ball_radius;
        let interior = s.interior();
        let lowest_row = f64::from(s.block_rows + 3) * s.block_height + s.bounds_thickness + 1.0;

        let x_lo = (interior.upper_left().x + r).ceil() as i32;
        let x_hi = ((interior.upper_right().x - r).floor() as i32).max(x_lo);
        let y_lo = (lowest_row.max(interior.upper_left().y) + r + 1.0).ceil() as i32;
        let y_hi = ((self.paddle.shape().upper_left().y - r - 1.0).floor() as i32).max(y_lo);

        let remover: Rc<dyn HitListener> = Rc::new(BallRemover::new(self.remaining_balls.clone()));
        for _ in 0..s.ball_count {
            let center = Point::random_in(x_lo..=x_hi, y_lo..=y_hi, &mut self.rng);
            let velocity = Velocity::random_with_speed(s.ball_speed, &mut self.rng);
            let color = Color::random(&mut self.rng);
            let id = self.next_entity_id();
            let mut ball = Ball::new(id, center, r, color, velocity);
            ball.set_registry(self.registry.clone());
            ball.add_hit_listener(remover.clone());
            self.balls.push(ball);
            self.remaining_balls.increase(1);
        }
    }

    /// Move to a terminal phase once the blocks or the balls run out
    pub fn update_phase(&mut self) {
        if self.phase.is_over() {
            return;
        }
        if self.remaining_blocks.value() <= 0 {
            self.score_tracker.level_cleared();
            self.phase = GamePhase::Won;
            log::info!(
                "Level cleared after {} ticks, score {}",
                self.time_ticks,
                self.score()
            );
        } else if self.remaining_balls.value() <= 0 {
            self.phase = GamePhase::Lost;
            log::info!(
                "All balls lost after {} ticks, score {}",
                self.time_ticks,
                self.score()
            );
        }
    }

    /// The ball nearest the bottom of the screen
    pub fn lowest_ball(&self) -> Option<&Ball> {
        self.balls
            .iter()
            .filter(|b| !b.is_removed())
            .max_by(|a, b| a.center().y.total_cmp(&b.center().y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_layout() {
        let state = GameState::new(Settings::default()).unwrap();
        // 12 + 11 + ... + 7
        assert_eq!(state.remaining_blocks.value(), 57);
        assert_eq!(state.remaining_balls.value(), 3);
        assert_eq!(state.balls.len(), 3);
        // blocks + 3 walls + death block + paddle
        assert_eq!(state.registry.borrow().len(), 57 + 4 + 1);
        assert_eq!(state.phase, GamePhase::Playing);

        let paddle = state.paddle.shape();
        assert_eq!(paddle.upper_left(), Point::new(360.0, 573.0));
        assert!(state.registry.borrow().contains(state.paddle.id()));
    }

    #[test]
    fn test_reflect_bottom_has_no_death_block() {
        let settings = Settings {
            bottom_edge: BottomEdge::Reflect,
            ..Default::default()
        };
        let state = GameState::new(settings).unwrap();
        assert_eq!(state.registry.borrow().len(), 57 + 3 + 1);
        assert!(!state.registry.borrow().iter().any(|c| c.is_death_surface()));
    }

    #[test]
    fn test_balls_spawn_inside_play_area() {
        let state = GameState::new(Settings::default()).unwrap();
        let interior = state.settings.interior();
        for ball in &state.balls {
            assert!(interior.contains_point(ball.center()));
            assert!(ball.center().y < state.paddle.shape().upper_left().y);
            assert!((ball.velocity().speed() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = GameState::new(Settings::default()).unwrap();
        let b = GameState::new(Settings::default()).unwrap();
        let centers = |s: &GameState| s.balls.iter().map(|b| b.center()).collect::<Vec<_>>();
        assert_eq!(centers(&a), centers(&b));

        let c = GameState::new(Settings {
            seed: 7,
            ..Default::default()
        })
        .unwrap();
        assert_ne!(centers(&a), centers(&c));
    }

    #[test]
    fn test_no_blocks_wins_with_bonus() {
        let mut state = GameState::new(Settings {
            block_rows: 0,
            ..Default::default()
        })
        .unwrap();
        state.update_phase();
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.score(), crate::consts::LEVEL_CLEAR_BONUS);

        // Terminal phases stick
        state.update_phase();
        assert_eq!(state.score(), crate::consts::LEVEL_CLEAR_BONUS);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let result = GameState::new(Settings {
            paddle_width: -5.0,
            ..Default::default()
        });
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_lowest_ball() {
        let mut state = GameState::new(Settings::default()).unwrap();
        state.balls[1].set_center(Point::new(100.0, 569.0));
        assert_eq!(state.lowest_ball().map(|b| b.id()), Some(state.balls[1].id()));
    }
}
