//! Hit notification and the listeners the game hangs off it
//!
//! Notifiers clone their listener list before iterating, so a listener may
//! add or remove listeners (itself included) while being notified.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::ball::Ball;
use super::collision::{Collidable, CollisionRegistry};
use crate::consts::{BLOCK_HIT_SCORE, LEVEL_CLEAR_BONUS};

/// Receives `(struck object, moving body)` events
pub trait HitListener {
    fn hit_event(&self, being_hit: &dyn Collidable, hitter: &mut Ball);
}

/// Something that publishes hit events
pub trait HitNotifier {
    fn add_hit_listener(&mut self, listener: Rc<dyn HitListener>);

    /// Removing a listener that was never added is a no-op
    fn remove_hit_listener(&mut self, listener: &Rc<dyn HitListener>);
}

/// Remove every entry pointing at the same listener
pub(crate) fn remove_listener(
    listeners: &mut Vec<Rc<dyn HitListener>>,
    listener: &Rc<dyn HitListener>,
) {
    listeners.retain(|l| !Rc::ptr_eq(l, listener));
}

/// A shared tally. Clones observe and update the same value.
#[derive(Debug, Clone, Default)]
pub struct Counter(Rc<Cell<i64>>);

impl Counter {
    pub fn new(value: i64) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    pub fn increase(&self, amount: i64) {
        self.0.set(self.0.get() + amount);
    }

    pub fn decrease(&self, amount: i64) {
        self.0.set(self.0.get() - amount);
    }

    pub fn value(&self) -> i64 {
        self.0.get()
    }
}

/// Takes struck blocks out of play and paints the ball in their colour
pub struct BlockRemover {
    registry: Weak<RefCell<CollisionRegistry>>,
    remaining_blocks: Counter,
}

impl BlockRemover {
    pub fn new(registry: &Rc<RefCell<CollisionRegistry>>, remaining_blocks: Counter) -> Self {
        Self {
            registry: Rc::downgrade(registry),
            remaining_blocks,
        }
    }
}

impl HitListener for BlockRemover {
    fn hit_event(&self, being_hit: &dyn Collidable, hitter: &mut Ball) {
        hitter.set_color(being_hit.color());
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().deregister(being_hit.id());
        }
        self.remaining_blocks.decrease(1);
        log::info!(
            "Block {} destroyed by ball {}, {} left",
            being_hit.id(),
            hitter.id(),
            self.remaining_blocks.value()
        );
    }
}

/// Takes balls out of play when they reach a death surface
pub struct BallRemover {
    remaining_balls: Counter,
}

impl BallRemover {
    pub fn new(remaining_balls: Counter) -> Self {
        Self { remaining_balls }
    }
}

impl HitListener for BallRemover {
    fn hit_event(&self, being_hit: &dyn Collidable, hitter: &mut Ball) {
        if being_hit.is_death_surface() {
            hitter.remove_from_game();
            self.remaining_balls.decrease(1);
            log::info!(
                "Ball {} lost, {} left",
                hitter.id(),
                self.remaining_balls.value()
            );
        }
    }
}

/// Scores block hits and the level-clear bonus
pub struct ScoreTrackingListener {
    current_score: Counter,
}

impl ScoreTrackingListener {
    pub fn new(current_score: Counter) -> Self {
        Self { current_score }
    }

    pub fn level_cleared(&self) {
        self.current_score.increase(LEVEL_CLEAR_BONUS);
    }
}

impl HitListener for ScoreTrackingListener {
    fn hit_event(&self, being_hit: &dyn Collidable, _hitter: &mut Ball) {
        if !being_hit.is_death_surface() {
            self.current_score.increase(BLOCK_HIT_SCORE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rectangle, Velocity};
    use crate::sim::block::Block;
    use crate::sim::collision::CollidableId;
    use crate::sim::color::Color;

    fn ball() -> Ball {
        Ball::new(1, Point::new(50.0, 50.0), 5.0, Color::ORANGE, Velocity::new(1.0, 1.0))
    }

    fn block(id: u32, death: bool) -> Block {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0);
        Block::new(CollidableId(id), rect, Color::GRAY).with_death(death)
    }

    #[test]
    fn test_counter_is_shared() {
        let a = Counter::new(3);
        let b = a.clone();
        b.decrease(1);
        a.increase(5);
        assert_eq!(a.value(), 7);
        assert_eq!(b.value(), 7);
    }

    #[test]
    fn test_block_remover_deregisters_and_paints() {
        let registry = CollisionRegistry::new().into_handle();
        let target = Rc::new(block(4, false));
        registry.borrow_mut().register(target.clone());
        let remaining = Counter::new(1);
        let remover = BlockRemover::new(&registry, remaining.clone());

        let mut hitter = ball();
        remover.hit_event(target.as_ref(), &mut hitter);

        assert!(!registry.borrow().contains(CollidableId(4)));
        assert_eq!(remaining.value(), 0);
        assert_eq!(hitter.color(), Color::GRAY);
    }

    #[test]
    fn test_block_remover_outliving_registry() {
        let registry = CollisionRegistry::new().into_handle();
        let remaining = Counter::new(2);
        let remover = BlockRemover::new(&registry, remaining.clone());
        drop(registry);

        remover.hit_event(&block(1, false), &mut ball());
        assert_eq!(remaining.value(), 1);
    }

    #[test]
    fn test_ball_remover_only_on_death() {
        let remaining = Counter::new(2);
        let remover = BallRemover::new(remaining.clone());
        let mut hitter = ball();

        remover.hit_event(&block(1, false), &mut hitter);
        assert!(!hitter.is_removed());
        assert_eq!(remaining.value(), 2);

        remover.hit_event(&block(2, true), &mut hitter);
        assert!(hitter.is_removed());
        assert_eq!(remaining.value(), 1);
    }

    #[test]
    fn test_score_tracking() {
        let score = Counter::default();
        let tracker = ScoreTrackingListener::new(score.clone());
        let mut hitter = ball();

        tracker.hit_event(&block(1, false), &mut hitter);
        tracker.hit_event(&block(2, false), &mut hitter);
        tracker.hit_event(&block(3, true), &mut hitter);
        assert_eq!(score.value(), 2 * BLOCK_HIT_SCORE);

        tracker.level_cleared();
        assert_eq!(score.value(), 2 * BLOCK_HIT_SCORE + LEVEL_CLEAR_BONUS);
    }
}
