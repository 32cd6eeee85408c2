use log::{debug, info};
use rand::Rng;

use super::{
    action::Direction,
    food,
    grid::{Cell, Grid},
    snake::{CollisionType, Snake},
};

/// Result of advancing a session by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Round goes on
    Continue { ate_food: bool },
    /// Snake hit a wall or itself; the score is final
    Collided(CollisionType),
    /// Food could not be placed because the snake covers the board
    BoardFull,
}

/// One round of play
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    snake: Snake,
    food: Option<Cell>,
    grid: Grid,
    score: u32,
    steps: u32,
}

impl GameSession {
    /// Start a round with the snake in its canonical position: head at the
    /// centre facing right, body trailing to the left and kept on the grid.
    pub fn start<R: Rng + ?Sized>(grid: Grid, initial_length: usize, rng: &mut R) -> Self {
        let head = grid.center();
        let length = initial_length.clamp(1, head.col as usize + 1);
        let snake = Snake::new(head, Direction::Right, length);
        let food = food::place_avoiding(&snake.occupied_cells(), &grid, rng);

        info!(
            "session started on {}x{} grid, snake length {}",
            grid.cols(),
            grid.rows(),
            length
        );

        Self::from_parts(grid, snake, food)
    }

    /// Assemble a session from an explicit layout
    pub fn from_parts(grid: Grid, snake: Snake, food: Option<Cell>) -> Self {
        Self {
            snake,
            food,
            grid,
            score: 0,
            steps: 0,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Whether a queued turn would be accepted by the snake right now
    pub fn accepts_turn(&self, direction: Direction) -> bool {
        self.snake.can_turn(direction)
    }

    /// Execute one tick: apply the queued turn, move, then resolve
    /// collisions and food.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        queued: Option<Direction>,
        rng: &mut R,
    ) -> TickOutcome {
        if let Some(direction) = queued {
            self.snake.change_direction(direction);
        }

        self.snake.move_forward();
        self.steps += 1;

        if let Some(collision) = self.snake.collision(&self.grid) {
            info!(
                "snake collided ({:?}) after {} steps, score {}",
                collision, self.steps, self.score
            );
            return TickOutcome::Collided(collision);
        }

        if self.food != Some(self.snake.head()) {
            return TickOutcome::Continue { ate_food: false };
        }

        self.snake.grow();
        self.score += 1;
        self.food = food::place_avoiding(&self.snake.occupied_cells(), &self.grid, rng);

        match self.food {
            Some(cell) => {
                debug!("food eaten, score {}, next food at {:?}", self.score, cell);
                TickOutcome::Continue { ate_food: true }
            }
            None => {
                info!("board filled, score {}", self.score);
                TickOutcome::BoardFull
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn scenario_session() -> GameSession {
        let snake = Snake::from_cells(
            [Cell::new(2, 2), Cell::new(1, 2), Cell::new(0, 2)],
            Direction::Right,
        );
        GameSession::from_parts(Grid::new(5, 5), snake, Some(Cell::new(3, 2)))
    }

    #[test]
    fn test_start_position() {
        let session = GameSession::start(Grid::new(32, 24), 3, &mut rng());
        let cells: Vec<Cell> = session.snake().cells().collect();

        assert_eq!(
            cells,
            vec![Cell::new(16, 12), Cell::new(15, 12), Cell::new(14, 12)]
        );
        assert_eq!(session.snake().direction(), Direction::Right);
        assert_eq!(session.score(), 0);
        assert_eq!(session.steps(), 0);

        let food = session.food().unwrap();
        assert!(!session.snake().occupied_cells().contains(&food));
    }

    #[test]
    fn test_start_length_clamped_to_grid() {
        let session = GameSession::start(Grid::new(2, 2), 5, &mut rng());

        assert_eq!(session.snake().len(), 2);
        assert!(session
            .snake()
            .cells()
            .all(|cell| session.grid().in_bounds(cell)));
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut session = scenario_session();
        session.food = Some(Cell::new(0, 0));

        let outcome = session.advance(None, &mut rng());

        assert_eq!(outcome, TickOutcome::Continue { ate_food: false });
        assert_eq!(session.snake().len(), 3);
        assert_eq!(session.snake().head(), Cell::new(3, 2));
        assert_eq!(session.steps(), 1);
    }

    #[test]
    fn test_eating_grows_on_following_tick() {
        let mut session = scenario_session();
        let mut rng = rng();

        let outcome = session.advance(None, &mut rng);
        assert_eq!(outcome, TickOutcome::Continue { ate_food: true });
        assert_eq!(session.score(), 1);
        assert_eq!(session.snake().head(), Cell::new(3, 2));
        assert_eq!(session.snake().len(), 3);

        let food = session.food().unwrap();
        assert!(!session.snake().occupied_cells().contains(&food));

        // Keep the new food out of the way of the next step
        session.food = Some(Cell::new(0, 0));
        let outcome = session.advance(None, &mut rng);
        assert_eq!(outcome, TickOutcome::Continue { ate_food: false });
        assert_eq!(session.snake().head(), Cell::new(4, 2));
        assert_eq!(session.snake().len(), 4);
    }

    #[test]
    fn test_wall_collision() {
        let snake = Snake::new(Cell::new(4, 2), Direction::Right, 1);
        let mut session = GameSession::from_parts(Grid::new(5, 5), snake, Some(Cell::new(0, 0)));

        let outcome = session.advance(None, &mut rng());

        assert_eq!(outcome, TickOutcome::Collided(CollisionType::Wall));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_queued_turn_applied_before_move() {
        let mut session = scenario_session();

        session.advance(Some(Direction::Down), &mut rng());

        assert_eq!(session.snake().head(), Cell::new(2, 3));
        assert_eq!(session.snake().direction(), Direction::Down);
    }

    #[test]
    fn test_queued_reversal_ignored() {
        let mut session = scenario_session();
        session.food = None;

        assert!(!session.accepts_turn(Direction::Left));
        session.advance(Some(Direction::Left), &mut rng());

        assert_eq!(session.snake().direction(), Direction::Right);
        assert_eq!(session.snake().head(), Cell::new(3, 2));
    }

    #[test]
    fn test_food_respawns_on_vacated_tail_cell() {
        // 3x1 board: the tail leaves (0,0) as the head eats at (2,0)
        let snake = Snake::from_cells([Cell::new(1, 0), Cell::new(0, 0)], Direction::Right);
        let mut session = GameSession::from_parts(Grid::new(3, 1), snake, Some(Cell::new(2, 0)));

        let outcome = session.advance(None, &mut rng());

        assert_eq!(outcome, TickOutcome::Continue { ate_food: true });
        assert_eq!(session.food(), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_board_full_when_last_cell_eaten() {
        let snake = Snake::from_cells([Cell::new(1, 0), Cell::new(0, 0)], Direction::Right);
        let mut session = GameSession::from_parts(Grid::new(3, 1), snake, Some(Cell::new(2, 0)));
        session.snake.grow();

        let outcome = session.advance(None, &mut rng());

        assert_eq!(outcome, TickOutcome::BoardFull);
        assert_eq!(session.score(), 1);
        assert_eq!(session.food(), None);
    }
}
