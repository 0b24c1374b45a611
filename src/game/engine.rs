use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    direction::Direction,
    error::{ConfigError, InvalidDirection, SimulationError},
    state::{CollisionType, GridPosition, Snake, Snapshot, Status},
};

/// Owns the whole game state and advances it one tick at a time.
///
/// The random source used for apple placement is injectable so a game can be
/// replayed from a seed.
pub struct Simulation<R = StdRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    apple: GridPosition,
    direction: Direction,
    score: u32,
    status: Status,
}

impl Simulation<StdRng> {
    /// Start a game with an entropy-seeded random source
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a reproducible game
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Start a game drawing apple positions from `rng`. The configuration is
    /// validated first so apple placement can never sample an empty grid.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let apple = match config.apple_start {
            Some(apple) => apple,
            None => random_cell(&config, &mut rng),
        };
        let snake = Snake::new(config.initial_head, config.initial_snake_length);
        let direction = config.initial_direction;

        info!(
            "Game started on a {}x{} grid, head at {}, apple at {}",
            config.grid_width, config.grid_height, snake.head(), apple
        );

        Ok(Self {
            config,
            rng,
            snake,
            apple,
            direction,
            score: 0,
            status: Status::Running,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> GridPosition {
        self.apple
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == Status::Running
    }

    /// Overwrite the direction used by the next tick. Reversals are accepted
    /// as-is, even when they steer the head straight into the body.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Steer from a raw offset. Zero or diagonal offsets leave the current
    /// direction untouched.
    pub fn steer(&mut self, dx: i32, dy: i32) -> Result<Direction, InvalidDirection> {
        match Direction::try_from((dx, dy)) {
            Ok(direction) => {
                self.direction = direction;
                Ok(direction)
            }
            Err(err) => {
                debug!("Ignoring {err}");
                Err(err)
            }
        }
    }

    /// Run one tick: growth, movement, apple, then collision.
    ///
    /// Once the snake is dead every further call fails with
    /// [`SimulationError::AlreadyTerminated`] and leaves the state untouched.
    pub fn advance_tick(&mut self) -> Result<Snapshot, SimulationError> {
        if !self.is_alive() {
            return Err(SimulationError::AlreadyTerminated { score: self.score });
        }

        if self.snake.advance_growth() {
            debug!(
                "Spawned segment {} ({} still owed)",
                self.snake.len(),
                self.snake.pending_growth()
            );
        }

        let (dx, dy) = self.direction.offset(self.config.cell_size);
        self.snake.advance_movement(dx, dy);

        let ate_apple = self.check_apple();

        let collision = self.check_collision();
        if let Some(collision_type) = collision {
            self.status = Status::Dead(collision_type);
            info!(
                "Snake died ({:?}) at {} with score {}",
                collision_type,
                self.snake.head(),
                self.score
            );
        }

        Ok(Snapshot {
            ate_apple,
            collision,
            ..self.snapshot()
        })
    }

    /// Current observable state, without advancing
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            head: self.snake.head(),
            body: self.snake.body_positions(),
            apple: self.apple,
            score: self.score,
            alive: self.is_alive(),
            ate_apple: false,
            collision: match self.status {
                Status::Running => None,
                Status::Dead(collision_type) => Some(collision_type),
            },
        }
    }

    /// Whether the head currently sits on a wall or the body
    pub fn is_dead(&self) -> bool {
        self.check_collision().is_some()
    }

    fn check_collision(&self) -> Option<CollisionType> {
        if !self.config.contains(self.snake.head()) {
            return Some(CollisionType::Wall);
        }

        if self.snake.head_hits_body() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Eat the apple if the head is on it, then relocate it anywhere on the
    /// grid. The snake's own cells are not excluded.
    fn check_apple(&mut self) -> bool {
        if self.snake.head() != self.apple {
            return false;
        }

        self.snake.queue_growth();
        self.score += 1;
        self.apple = random_cell(&self.config, &mut self.rng);
        debug!("Apple eaten, score {}, apple moved to {}", self.score, self.apple);
        true
    }
}

/// Pick a uniformly random cell of the grid
fn random_cell<R: Rng>(config: &GameConfig, rng: &mut R) -> GridPosition {
    let column = rng.gen_range(0..config.grid_width) as i32;
    let row = rng.gen_range(0..config.grid_height) as i32;
    GridPosition::new(column * config.cell_size, row * config.cell_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    const RNG_SEED: u64 = 0x5EED;

    fn pos(x: i32, y: i32) -> GridPosition {
        GridPosition::new(x, y)
    }

    /// Default field, snake heading right, apple parked far from the path
    fn right_config() -> GameConfig {
        GameConfig {
            initial_direction: Direction::Right,
            apple_start: Some(pos(300, 270)),
            ..GameConfig::default()
        }
    }

    /// 10x10 field (150 units square), snake heading right near the far wall
    fn small_right_config(head_x: i32) -> GameConfig {
        GameConfig {
            initial_head: pos(head_x, 15),
            initial_direction: Direction::Right,
            apple_start: Some(pos(0, 135)),
            ..GameConfig::small()
        }
    }

    fn seeded(config: GameConfig) -> Simulation<ChaCha8Rng> {
        Simulation::with_rng(config, ChaCha8Rng::seed_from_u64(RNG_SEED)).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let sim = Simulation::seeded(GameConfig::default(), RNG_SEED).unwrap();

        assert!(sim.is_alive());
        assert_eq!(sim.score(), 0);
        assert_eq!(sim.snake().head(), pos(15, 15));
        assert!(sim.snake().is_empty());
        assert_eq!(sim.snake().pending_growth(), 3);
        assert_eq!(sim.direction(), Direction::Down);
        assert!(sim.config().contains(sim.apple()));
        assert!(sim.apple().is_aligned(15));
    }

    #[test]
    fn test_initial_apple_uses_rng() {
        let sim = Simulation::with_rng(GameConfig::default(), StepRng::new(0, 0)).unwrap();
        assert_eq!(sim.apple(), pos(0, 0));
    }

    #[test]
    fn test_first_two_ticks() {
        let mut sim = seeded(right_config());

        let first = sim.advance_tick().unwrap();
        assert_eq!(first.head, pos(30, 15));
        assert_eq!(first.body, vec![pos(15, 15)]);
        assert!(first.alive);

        let second = sim.advance_tick().unwrap();
        assert_eq!(second.head, pos(45, 15));
        assert_eq!(second.body, vec![pos(30, 15), pos(15, 15)]);
        assert_eq!(sim.snake().pending_growth(), 1);
        assert!(second.alive);
    }

    #[test]
    fn test_body_grows_at_most_one_per_tick() {
        let mut sim = seeded(right_config());
        let mut previous = sim.snake().len();

        for _ in 0..10 {
            let snapshot = sim.advance_tick().unwrap();
            assert!(snapshot.body.len() >= previous);
            assert!(snapshot.body.len() <= previous + 1);
            previous = snapshot.body.len();
        }
        assert_eq!(previous, 3);
    }

    #[test]
    fn test_cells_distinct_once_grown() {
        let mut sim = seeded(right_config());
        let turns = [
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];

        for direction in turns {
            sim.set_direction(direction);
            let snapshot = sim.advance_tick().unwrap();
            if sim.snake().pending_growth() == 0 {
                let mut cells: HashSet<GridPosition> = snapshot.body.iter().copied().collect();
                cells.insert(snapshot.head);
                assert_eq!(cells.len(), snapshot.body.len() + 1);
            }
            assert!(sim.snake().segments().iter().all(|s| !s.pending_spawn));
        }
    }

    #[test]
    fn test_eating_apple() {
        let config = GameConfig {
            apple_start: Some(pos(45, 15)),
            initial_snake_length: 0,
            ..right_config()
        };
        let mut sim = Simulation::with_rng(config, StepRng::new(0, 0)).unwrap();

        let snapshot = sim.advance_tick().unwrap();
        assert!(!snapshot.ate_apple);
        assert_eq!(snapshot.score, 0);

        let snapshot = sim.advance_tick().unwrap();
        assert!(snapshot.ate_apple);
        assert_eq!(snapshot.score, 1);
        assert_eq!(sim.snake().pending_growth(), 1);
        // StepRng(0, 0) always lands on the first cell
        assert_eq!(snapshot.apple, pos(0, 0));

        let snapshot = sim.advance_tick().unwrap();
        assert_eq!(snapshot.body, vec![pos(45, 15)]);
        assert_eq!(sim.snake().pending_growth(), 0);
    }

    #[test]
    fn test_apple_may_land_on_snake() {
        // The apple is relocated to (0, 0) which is not excluded even when
        // occupied; drive the head over it to prove it is still edible there.
        let config = GameConfig {
            initial_head: pos(0, 15),
            initial_direction: Direction::Up,
            apple_start: Some(pos(0, 0)),
            initial_snake_length: 0,
            ..GameConfig::default()
        };
        let mut sim = Simulation::with_rng(config, StepRng::new(0, 0)).unwrap();

        let snapshot = sim.advance_tick().unwrap();
        assert!(snapshot.ate_apple);
        assert_eq!(snapshot.head, pos(0, 0));
        assert_eq!(snapshot.apple, snapshot.head);
    }

    #[test]
    fn test_wall_collision_on_far_edge() {
        let mut sim = seeded(small_right_config(120));

        let snapshot = sim.advance_tick().unwrap();
        assert!(snapshot.alive);
        assert_eq!(snapshot.head, pos(135, 15));

        let snapshot = sim.advance_tick().unwrap();
        assert_eq!(snapshot.head, pos(150, 15));
        assert!(!snapshot.alive);
        assert_eq!(snapshot.collision, Some(CollisionType::Wall));
        assert_eq!(sim.status(), Status::Dead(CollisionType::Wall));
    }

    #[test]
    fn test_wall_collision_on_near_edge() {
        let config = GameConfig {
            initial_head: pos(0, 15),
            initial_direction: Direction::Left,
            ..right_config()
        };
        let mut sim = seeded(config);

        let snapshot = sim.advance_tick().unwrap();
        assert_eq!(snapshot.head, pos(-15, 15));
        assert!(!snapshot.alive);
        assert!(sim.is_dead());
    }

    #[test]
    fn test_dead_simulation_rejects_ticks() {
        let mut sim = seeded(small_right_config(135));

        let last = sim.advance_tick().unwrap();
        assert!(!last.alive);

        sim.set_direction(Direction::Left);
        let err = sim.advance_tick().unwrap_err();
        assert_eq!(err, SimulationError::AlreadyTerminated { score: 0 });
        assert_eq!(sim.snapshot().head, last.head);
        assert_eq!(sim.snapshot().body, last.body);
        assert_eq!(sim.snapshot().apple, last.apple);
        assert_eq!(sim.snapshot().score, last.score);
        assert!(!sim.snapshot().alive);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let empty = Simulation::with_rng(GameConfig::new(0, 5), StepRng::new(0, 0));
        assert!(matches!(empty, Err(ConfigError::EmptyGrid { width: 0, height: 5 })));

        assert!(Simulation::seeded(GameConfig::new(5, 0), RNG_SEED).is_err());
        assert!(Simulation::new(GameConfig::new(200_000_000, 5)).is_err());
    }

    #[test]
    fn test_reversal_into_body_is_fatal() {
        let mut sim = seeded(right_config());
        for _ in 0..4 {
            sim.advance_tick().unwrap();
        }

        sim.set_direction(Direction::Left);
        let snapshot = sim.advance_tick().unwrap();
        assert!(!snapshot.alive);
        assert_eq!(snapshot.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_self_collision_loop() {
        let config = GameConfig {
            initial_snake_length: 5,
            ..right_config()
        };
        let mut sim = seeded(config);
        for _ in 0..6 {
            sim.advance_tick().unwrap();
        }

        sim.set_direction(Direction::Down);
        assert!(sim.advance_tick().unwrap().alive);
        sim.set_direction(Direction::Left);
        assert!(sim.advance_tick().unwrap().alive);
        sim.set_direction(Direction::Up);
        let snapshot = sim.advance_tick().unwrap();
        assert!(!snapshot.alive);
        assert_eq!(snapshot.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_steer_ignores_invalid_offsets() {
        let mut sim = seeded(right_config());

        assert!(sim.steer(0, 0).is_err());
        assert!(sim.steer(15, 15).is_err());
        assert_eq!(sim.direction(), Direction::Right);

        assert_eq!(sim.steer(0, -15), Ok(Direction::Up));
        assert_eq!(sim.direction(), Direction::Up);
    }

    #[test]
    fn test_same_seed_same_apples() {
        let config = GameConfig::default();
        let a = Simulation::seeded(config.clone(), 42).unwrap();
        let b = Simulation::seeded(config, 42).unwrap();
        assert_eq!(a.apple(), b.apple());
    }
}
