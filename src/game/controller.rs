//! Top-level game state machine.
//!
//! The controller owns the active [`GameSession`] and turns discrete
//! [`Command`]s plus a periodic [`GameController::tick`] into phase
//! transitions. Turns received between ticks are coalesced into a single
//! pending slot; the last legal one wins.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::{Command, Direction},
    config::GameConfig,
    grid::{Cell, Grid},
    session::{GameSession, TickOutcome},
    snake::CollisionType,
};

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    BoardFull,
}

/// Current screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Instructions,
    Playing,
    GameOver { final_score: u32, reason: EndReason },
}

/// Read-only snapshot handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub phase: Phase,
    /// Snake cells, head first
    pub snake_cells: Vec<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub grid: Grid,
    /// Set once quit was requested; the caller should exit
    pub terminated: bool,
}

pub struct GameController {
    config: GameConfig,
    grid: Grid,
    phase: Phase,
    session: Option<GameSession>,
    pending_direction: Option<Direction>,
    terminated: bool,
    round: u64,
    rng: StdRng,
}

impl GameController {
    /// Build a controller from a full configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configured grid has a zero dimension.
    pub fn new(config: GameConfig) -> Self {
        let grid = config.grid();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut controller = Self {
            grid,
            phase: Phase::Instructions,
            session: None,
            pending_direction: None,
            terminated: false,
            round: 0,
            rng,
            config,
        };

        if !controller.config.show_instructions {
            controller.start_session();
        }

        controller
    }

    /// Controller for a `cols` x `rows` grid with default settings otherwise
    pub fn configure(cols: u32, rows: u32, block_size_px: u32) -> Self {
        Self::new(GameConfig {
            grid_cols: cols,
            grid_rows: rows,
            block_size_px,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Number of rounds started so far
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Dispatch a command to the matching event sink
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => self.on_direction_input(direction),
            Command::Start => self.on_start_command(),
            Command::Restart => self.on_restart_command(),
            Command::Quit => self.on_quit_command(),
            Command::Resize { cols, rows } => self.on_resize(cols, rows),
        }
    }

    pub fn on_direction_input(&mut self, direction: Direction) {
        if self.terminated || self.phase != Phase::Playing {
            return;
        }
        let Some(session) = &self.session else {
            return;
        };
        if session.accepts_turn(direction) {
            self.pending_direction = Some(direction);
        }
    }

    pub fn on_start_command(&mut self) {
        if self.terminated || self.phase != Phase::Instructions {
            return;
        }
        self.start_session();
    }

    pub fn on_restart_command(&mut self) {
        if self.terminated || !matches!(self.phase, Phase::GameOver { .. }) {
            return;
        }
        self.start_session();
    }

    pub fn on_quit_command(&mut self) {
        if !self.terminated {
            debug!("quit requested in {:?}", self.phase);
        }
        self.terminated = true;
    }

    /// Recompute the grid. An active or finished round is replaced by a
    /// fresh one, since old coordinates may not fit the new grid.
    pub fn on_resize(&mut self, cols: u32, rows: u32) {
        if self.terminated {
            return;
        }
        if cols == 0 || rows == 0 {
            warn!("ignoring resize to degenerate grid {}x{}", cols, rows);
            return;
        }

        let grid = Grid::new(cols, rows);
        debug!(
            "grid resized from {}x{} to {}x{}",
            self.grid.cols(),
            self.grid.rows(),
            cols,
            rows
        );
        self.grid = grid;

        if self.phase != Phase::Instructions {
            self.start_session();
        }
    }

    /// Advance one logic step while playing and return the current view
    pub fn tick(&mut self) -> ViewModel {
        if !self.terminated && self.phase == Phase::Playing {
            self.advance_session();
        }
        self.view()
    }

    pub fn view(&self) -> ViewModel {
        let (snake_cells, food, score) = match &self.session {
            Some(session) => (
                session.snake().cells().collect::<Vec<_>>(),
                session.food(),
                session.score(),
            ),
            None => (Vec::new(), None, 0),
        };

        ViewModel {
            phase: self.phase,
            snake_cells,
            food,
            score,
            grid: self.grid,
            terminated: self.terminated,
        }
    }

    fn advance_session(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let queued = self.pending_direction.take();
        let reason = match session.advance(queued, &mut self.rng) {
            TickOutcome::Continue { .. } => return,
            TickOutcome::Collided(collision) => EndReason::Collision(collision),
            TickOutcome::BoardFull => EndReason::BoardFull,
        };

        let final_score = session.score();
        info!("game over ({:?}), final score {}", reason, final_score);
        self.phase = Phase::GameOver {
            final_score,
            reason,
        };
    }

    fn start_session(&mut self) {
        self.session = Some(GameSession::start(
            self.grid,
            self.config.initial_snake_length,
            &mut self.rng,
        ));
        self.pending_direction = None;
        self.phase = Phase::Playing;
        self.round += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Snake;

    fn seeded(config: GameConfig) -> GameController {
        GameController::new(GameConfig {
            seed: Some(1234),
            ..config
        })
    }

    fn playing(cols: u32, rows: u32) -> GameController {
        seeded(GameConfig {
            show_instructions: false,
            ..GameConfig::new(cols, rows)
        })
    }

    fn with_session(controller: &mut GameController, session: GameSession) {
        controller.grid = *session.grid();
        controller.session = Some(session);
        controller.phase = Phase::Playing;
    }

    #[test]
    fn test_starts_on_instructions() {
        let mut controller = seeded(GameConfig::new(10, 10));

        assert_eq!(controller.phase(), Phase::Instructions);
        assert!(controller.session().is_none());

        // Ticks and turns do nothing before start
        controller.on_direction_input(Direction::Up);
        let view = controller.tick();
        assert_eq!(view.phase, Phase::Instructions);
        assert!(view.snake_cells.is_empty());
        assert_eq!(controller.pending_direction(), None);
    }

    #[test]
    fn test_start_command_begins_play() {
        let mut controller = seeded(GameConfig::new(10, 10));

        controller.handle(Command::Start);

        assert_eq!(controller.phase(), Phase::Playing);
        assert_eq!(controller.round(), 1);
        let session = controller.session().unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().head(), Cell::new(5, 5));
    }

    #[test]
    fn test_skip_instructions_starts_playing() {
        let controller = playing(10, 10);
        assert_eq!(controller.phase(), Phase::Playing);
        assert!(controller.session().is_some());
    }

    #[test]
    fn test_configure() {
        let controller = GameController::configure(12, 9, 16);

        assert_eq!(controller.grid(), Grid::new(12, 9));
        assert_eq!(controller.config().block_size_px, 16);
        assert_eq!(controller.phase(), Phase::Instructions);
    }

    #[test]
    fn test_turns_coalesce_last_legal_wins() {
        let mut controller = playing(10, 10);

        controller.on_direction_input(Direction::Up);
        controller.on_direction_input(Direction::Down);
        // Opposite of the current heading is dropped and keeps Down
        controller.on_direction_input(Direction::Left);
        assert_eq!(controller.pending_direction(), Some(Direction::Down));

        let head = controller.session().unwrap().snake().head();
        controller.tick();

        let snake = controller.session().unwrap().snake();
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.head(), head.step(Direction::Down));
        assert_eq!(controller.pending_direction(), None);
    }

    #[test]
    fn test_collision_moves_to_game_over() {
        let mut controller = playing(5, 5);
        let snake = Snake::new(Cell::new(4, 2), Direction::Right, 1);
        with_session(
            &mut controller,
            GameSession::from_parts(Grid::new(5, 5), snake, Some(Cell::new(0, 0))),
        );

        let view = controller.tick();

        assert_eq!(
            view.phase,
            Phase::GameOver {
                final_score: 0,
                reason: EndReason::Collision(CollisionType::Wall),
            }
        );
        assert_eq!(view.score, 0);

        // Further ticks are no-ops
        let again = controller.tick();
        assert_eq!(again, view);
    }

    #[test]
    fn test_board_full_ends_round() {
        let mut controller = playing(3, 1);
        let mut snake = Snake::from_cells([Cell::new(1, 0), Cell::new(0, 0)], Direction::Right);
        snake.grow();
        with_session(
            &mut controller,
            GameSession::from_parts(Grid::new(3, 1), snake, Some(Cell::new(2, 0))),
        );

        let view = controller.tick();

        assert_eq!(
            view.phase,
            Phase::GameOver {
                final_score: 1,
                reason: EndReason::BoardFull,
            }
        );
        assert_eq!(view.food, None);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let mut controller = playing(5, 5);
        controller.on_restart_command();
        controller.tick();
        let steps = controller.session().unwrap().steps();
        assert_eq!(steps, 1);

        let snake = Snake::new(Cell::new(0, 0), Direction::Up, 1);
        with_session(
            &mut controller,
            GameSession::from_parts(Grid::new(5, 5), snake, None),
        );
        controller.tick();
        assert!(matches!(controller.phase(), Phase::GameOver { .. }));

        controller.on_restart_command();

        assert_eq!(controller.phase(), Phase::Playing);
        let session = controller.session().unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.steps(), 0);
        assert_eq!(session.snake().head(), Cell::new(2, 2));
        assert_eq!(session.snake().len(), 3);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let mut instructions = seeded(GameConfig::new(5, 5));
        instructions.on_quit_command();
        assert!(instructions.is_terminated());
        assert!(instructions.view().terminated);

        let mut controller = playing(5, 5);
        let before = controller.session().unwrap().clone();
        controller.handle(Command::Quit);
        let view = controller.tick();

        assert!(view.terminated);
        assert_eq!(controller.session().unwrap(), &before);

        // Nothing revives a terminated controller
        controller.on_restart_command();
        controller.on_start_command();
        assert!(controller.is_terminated());
    }

    #[test]
    fn test_resize_restarts_round() {
        let mut controller = playing(20, 20);
        controller.tick();
        controller.tick();

        controller.handle(Command::Resize { cols: 8, rows: 6 });

        assert_eq!(controller.grid(), Grid::new(8, 6));
        assert_eq!(controller.phase(), Phase::Playing);
        let session = controller.session().unwrap();
        assert_eq!(session.steps(), 0);
        assert_eq!(session.snake().head(), Cell::new(4, 3));
        assert!(session.snake().cells().all(|cell| controller.grid().in_bounds(cell)));
    }

    #[test]
    fn test_resize_from_game_over_restarts() {
        let mut controller = playing(5, 5);
        let snake = Snake::new(Cell::new(0, 0), Direction::Left, 1);
        with_session(
            &mut controller,
            GameSession::from_parts(Grid::new(5, 5), snake, None),
        );
        controller.tick();

        controller.on_resize(9, 9);

        assert_eq!(controller.phase(), Phase::Playing);
        assert_eq!(controller.session().unwrap().score(), 0);
    }

    #[test]
    fn test_resize_during_instructions_keeps_screen() {
        let mut controller = seeded(GameConfig::new(10, 10));

        controller.on_resize(6, 4);

        assert_eq!(controller.phase(), Phase::Instructions);
        controller.on_start_command();
        assert_eq!(*controller.session().unwrap().grid(), Grid::new(6, 4));
    }

    #[test]
    fn test_degenerate_resize_ignored() {
        let mut controller = playing(10, 10);

        controller.on_resize(0, 10);

        assert_eq!(controller.grid(), Grid::new(10, 10));
    }

    #[test]
    fn test_view_mirrors_session() {
        let mut controller = playing(10, 10);

        let view = controller.tick();
        let session = controller.session().unwrap();

        assert_eq!(view.snake_cells, session.snake().cells().collect::<Vec<_>>());
        assert_eq!(view.food, session.food());
        assert_eq!(view.score, session.score());
        assert_eq!(view.grid, Grid::new(10, 10));
        assert!(!view.terminated);
    }
}
