//! Game state, legal-move enforcement and window-relative win detection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Coord, Direction, Window, LINE_DIRECTIONS};
use crate::config::{ConfigError, GameConfig};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player symbol. X moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(format!("unknown player: {}", other)),
        }
    }
}

/// Pieces placed so far by each player, board-wide
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementCounts {
    pub x: u8,
    pub o: u8,
}

impl PlacementCounts {
    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    fn increment(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }
}

/// One turn's worth of play
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Place { to: Coord },
    Relocate { from: Coord, to: Coord },
    ShiftWindow { direction: Direction },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place { to } => write!(f, "place {} {}", to.x, to.y),
            Action::Relocate { from, to } => {
                write!(f, "move {} {} -> {} {}", from.x, from.y, to.x, to.y)
            }
            Action::ShiftWindow { direction } => write!(f, "shift {}", direction),
        }
    }
}

/// Why a mutating call was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,

    #[error("{0} is off the board")]
    OffBoard(Coord),

    #[error("{0} is outside the active window")]
    OutOfWindow(Coord),

    #[error("{0} is occupied")]
    OccupiedCell(Coord),

    #[error("player {0} has no placements left")]
    PlacementExhausted(Player),

    #[error("no piece selected")]
    NoSelection,

    #[error("{0} does not hold a piece of the player to move")]
    InvalidSelection(Coord),

    #[error("shifting {0} would move the window off the board")]
    IllegalShift(Direction),
}

/// Read-only view of a position, as consumed by the agent
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub window: Window,
    pub placed: PlacementCounts,
    pub max_pieces: u8,
    pub board_size: usize,
    pub line_length: usize,
}

// ============================================================================
// WIN DETECTION
// ============================================================================

/// Scan the window row-major and return the owner of the first cell that
/// starts a full line kept entirely inside the window.
pub fn detect_winner(board: &Board, window: Window, line_length: usize) -> Option<Player> {
    for start in window.cells() {
        let Some(player) = board.get(start) else {
            continue;
        };
        if LINE_DIRECTIONS
            .iter()
            .any(|&dir| line_from(board, window, start, dir, line_length))
        {
            return Some(player);
        }
    }
    None
}

fn line_from(
    board: &Board,
    window: Window,
    start: Coord,
    dir: (isize, isize),
    length: usize,
) -> bool {
    let piece = board.get(start);
    if piece.is_none() {
        return false;
    }
    (1..length as isize).all(|i| match start.offset(dir, i) {
        Some(c) => window.contains(c) && board.get(c) == piece,
        None => false,
    })
}

/// Whether `player` standing on `at` would sit on a full in-window line.
/// The current contents of `at` are ignored.
pub fn completes_line(
    board: &Board,
    window: Window,
    at: Coord,
    player: Player,
    line_length: usize,
) -> bool {
    if !window.contains(at) {
        return false;
    }
    let run = |dir: (isize, isize), sign: isize| {
        (1..)
            .map_while(|i| at.offset(dir, i * sign))
            .take_while(|&c| window.contains(c) && board.get(c) == Some(player))
            .count()
    };
    LINE_DIRECTIONS
        .iter()
        .any(|&dir| 1 + run(dir, 1) + run(dir, -1) >= line_length)
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Full game state. Mutators either apply completely or leave it untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    window: Window,
    placed: PlacementCounts,
    turn: Player,
    selected: Option<Coord>,
    winner: Option<Player>,
    moves: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New game with an empty board and a centered window. `config` is
    /// expected to be valid; use [`GameState::try_new`] otherwise.
    pub fn new(config: GameConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config: {:?}", config);
        Self {
            board: Board::new(config.board_size),
            window: Window::centered(config.board_size, config.window_size),
            placed: PlacementCounts::default(),
            turn: Player::X,
            selected: None,
            winner: None,
            moves: 0,
            config,
        }
    }

    pub fn try_new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Start from an arbitrary position. Placement counts are taken from
    /// the pieces on the board and the winner is evaluated immediately.
    pub fn from_position(
        config: GameConfig,
        board: Board,
        window: Window,
        turn: Player,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.size() != config.board_size {
            return Err(ConfigError::InvalidPosition(format!(
                "board is {0}x{0}, expected {1}x{1}",
                board.size(),
                config.board_size
            )));
        }
        if window.size != config.window_size
            || window.x + window.size > config.board_size
            || window.y + window.size > config.board_size
        {
            return Err(ConfigError::InvalidPosition(format!(
                "window {:?} does not fit the configuration",
                window
            )));
        }

        let mut placed = PlacementCounts::default();
        for player in [Player::X, Player::O] {
            let count = board.count(player);
            if count > config.max_pieces as usize {
                return Err(ConfigError::InvalidPosition(format!(
                    "player {} has {} pieces, max is {}",
                    player, count, config.max_pieces
                )));
            }
            for _ in 0..count {
                placed.increment(player);
            }
        }

        let winner = detect_winner(&board, window, config.line_length());
        Ok(Self {
            config,
            board,
            window,
            placed,
            turn,
            selected: None,
            winner,
            moves: 0,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn placement_counts(&self) -> PlacementCounts {
        self.placed
    }

    pub fn placed(&self, player: Player) -> u8 {
        self.placed.get(player)
    }

    /// Player to move
    pub fn current_player(&self) -> Player {
        self.turn
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Successful actions so far
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn in_placement_phase(&self, player: Player) -> bool {
        self.placed.get(player) < self.config.max_pieces
    }

    pub fn in_movement_phase(&self, player: Player) -> bool {
        !self.in_placement_phase(player)
    }

    /// Both players have placed enough pieces for drivers to offer
    /// relocation and window shifts.
    pub fn movement_unlocked(&self) -> bool {
        let unlock = self.config.movement_unlock;
        self.placed.x >= unlock && self.placed.o >= unlock
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            window: self.window,
            placed: self.placed,
            max_pieces: self.config.max_pieces,
            board_size: self.config.board_size,
            line_length: self.config.line_length(),
        }
    }

    // ========================================================================
    // MUTATORS
    // ========================================================================

    /// Place a new piece for the player to move
    pub fn try_place(&mut self, to: Coord) -> Result<(), MoveError> {
        self.ensure_ongoing()?;
        self.ensure_target(to)?;
        if !self.in_placement_phase(self.turn) {
            return Err(MoveError::PlacementExhausted(self.turn));
        }
        if !self.board.is_empty(to) {
            return Err(MoveError::OccupiedCell(to));
        }

        self.board.set(to, Some(self.turn));
        self.placed.increment(self.turn);
        self.selected = None;
        self.finish_action(Action::Place { to });
        Ok(())
    }

    /// Choose one of the mover's in-window pieces for relocation
    pub fn try_select(&mut self, at: Coord) -> Result<(), MoveError> {
        self.ensure_ongoing()?;
        self.ensure_target(at)?;
        if self.board.get(at) != Some(self.turn) {
            return Err(MoveError::InvalidSelection(at));
        }
        self.selected = Some(at);
        tracing::trace!(player = %self.turn, %at, "piece selected");
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Move the selected piece to an empty in-window cell. The selection
    /// survives a rejected call.
    pub fn try_relocate(&mut self, to: Coord) -> Result<(), MoveError> {
        self.ensure_ongoing()?;
        let from = self.selected.ok_or(MoveError::NoSelection)?;
        if self.board.get(from) != Some(self.turn) {
            return Err(MoveError::InvalidSelection(from));
        }
        if !self.window.contains(from) {
            return Err(MoveError::OutOfWindow(from));
        }
        self.ensure_target(to)?;
        if !self.board.is_empty(to) {
            return Err(MoveError::OccupiedCell(to));
        }

        self.board.set(from, None);
        self.board.set(to, Some(self.turn));
        self.selected = None;
        self.finish_action(Action::Relocate { from, to });
        Ok(())
    }

    /// Slide the active window one cell. Board contents never change.
    pub fn try_shift_window(&mut self, direction: Direction) -> Result<(), MoveError> {
        self.ensure_ongoing()?;
        let window = self
            .window
            .shifted(direction, self.config.board_size)
            .ok_or(MoveError::IllegalShift(direction))?;

        self.window = window;
        self.selected = None;
        self.finish_action(Action::ShiftWindow { direction });
        Ok(())
    }

    /// Apply an action through the same checks a human move goes through
    pub fn apply(&mut self, action: Action) -> Result<(), MoveError> {
        match action {
            Action::Place { to } => self.try_place(to),
            Action::Relocate { from, to } => {
                self.try_select(from)?;
                if let Err(err) = self.try_relocate(to) {
                    self.deselect();
                    return Err(err);
                }
                Ok(())
            }
            Action::ShiftWindow { direction } => self.try_shift_window(direction),
        }
    }

    pub fn place(&mut self, x: usize, y: usize) -> bool {
        let result = self.try_place(Coord::new(x, y));
        self.log_rejection(result)
    }

    pub fn select(&mut self, x: usize, y: usize) -> bool {
        let result = self.try_select(Coord::new(x, y));
        self.log_rejection(result)
    }

    pub fn relocate(&mut self, x: usize, y: usize) -> bool {
        let result = self.try_relocate(Coord::new(x, y));
        self.log_rejection(result)
    }

    pub fn shift_window(&mut self, direction: Direction) -> bool {
        let result = self.try_shift_window(direction);
        self.log_rejection(result)
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Every action the player to move could legally make
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_over() {
            return vec![];
        }

        let empty: Vec<Coord> = self
            .window
            .cells()
            .filter(|&c| self.board.is_empty(c))
            .collect();
        let mut actions = Vec::new();

        if self.in_placement_phase(self.turn) {
            actions.extend(empty.iter().map(|&to| Action::Place { to }));
        }

        for from in self.window.cells().filter(|&c| self.board.get(c) == Some(self.turn)) {
            actions.extend(empty.iter().map(|&to| Action::Relocate { from, to }));
        }

        actions.extend(
            self.window
                .legal_shifts(self.config.board_size)
                .into_iter()
                .map(|direction| Action::ShiftWindow { direction }),
        );

        actions
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn ensure_ongoing(&self) -> Result<(), MoveError> {
        match self.winner {
            Some(_) => Err(MoveError::GameOver),
            None => Ok(()),
        }
    }

    fn ensure_target(&self, c: Coord) -> Result<(), MoveError> {
        if !self.board.in_bounds(c) {
            return Err(MoveError::OffBoard(c));
        }
        if !self.window.contains(c) {
            return Err(MoveError::OutOfWindow(c));
        }
        Ok(())
    }

    fn finish_action(&mut self, action: Action) {
        self.moves += 1;
        self.winner = detect_winner(&self.board, self.window, self.config.line_length());
        tracing::debug!(player = %self.turn, %action, moves = self.moves, "action applied");

        match self.winner {
            Some(winner) => tracing::debug!(%winner, "line completed inside window"),
            None => self.turn = self.turn.opponent(),
        }
    }

    fn log_rejection(&self, result: Result<(), MoveError>) -> bool {
        if let Err(err) = &result {
            tracing::trace!(player = %self.turn, %err, "action rejected");
        }
        result.is_ok()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn position(rows: &str, window: Window, turn: Player) -> GameState {
        let board: Board = rows.parse().unwrap();
        GameState::from_position(GameConfig::default(), board, window, turn).unwrap()
    }

    /// Eight placements filling the centered window without a line:
    ///
    /// ```text
    /// X X O
    /// O O X
    /// X . O
    /// ```
    fn full_placement_game() -> GameState {
        let mut game = GameState::default();
        let sequence = [(1, 1), (3, 1), (2, 1), (1, 2), (3, 2), (2, 2), (1, 3), (3, 3)];
        for (x, y) in sequence {
            assert!(game.place(x, y), "placement at ({}, {}) rejected", x, y);
        }
        assert_eq!(game.winner(), None);
        game
    }

    #[test]
    fn test_game_creation() {
        let game = GameState::default();
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.window(), Window::new(1, 1, 3));
        assert_eq!(game.placed(Player::X), 0);
        assert_eq!(game.placed(Player::O), 0);
        assert_eq!(game.winner(), None);
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_try_new_rejects_bad_config() {
        let config = GameConfig {
            board_size: 2,
            ..Default::default()
        };
        assert!(GameState::try_new(config).is_err());
    }

    #[test]
    fn test_place() {
        let mut game = GameState::default();
        assert!(game.place(2, 2));
        assert_eq!(game.board().get(Coord::new(2, 2)), Some(Player::X));
        assert_eq!(game.placed(Player::X), 1);
        assert_eq!(game.current_player(), Player::O);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_place_rejections_have_no_side_effects() {
        let mut game = GameState::default();
        game.place(2, 2);
        let before = game.clone();

        assert_eq!(game.try_place(Coord::new(0, 0)), Err(MoveError::OutOfWindow(Coord::new(0, 0))));
        assert_eq!(game.try_place(Coord::new(9, 1)), Err(MoveError::OffBoard(Coord::new(9, 1))));
        assert_eq!(game.try_place(Coord::new(2, 2)), Err(MoveError::OccupiedCell(Coord::new(2, 2))));
        assert!(!game.place(4, 4));
        assert_eq!(game, before);
    }

    #[test]
    fn test_placement_exhausted() {
        let mut game = full_placement_game();
        assert_eq!(game.current_player(), Player::X);
        assert!(game.in_movement_phase(Player::X));
        assert_eq!(game.try_place(Coord::new(2, 3)), Err(MoveError::PlacementExhausted(Player::X)));
    }

    #[test]
    fn test_three_in_column_wins() {
        let mut game = GameState::default();
        assert!(game.place(1, 1));
        assert!(game.place(2, 1));
        assert!(game.place(1, 2));
        assert!(game.place(3, 3));
        assert!(game.place(1, 3));

        assert_eq!(game.winner(), Some(Player::X));
        // Turn does not advance on a winning action
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.placed(Player::X), 3);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut game = GameState::default();
        for (x, y) in [(1, 1), (2, 1), (1, 2), (3, 3), (1, 3)] {
            game.place(x, y);
        }
        let frozen = game.clone();

        assert_eq!(game.try_place(Coord::new(2, 2)), Err(MoveError::GameOver));
        assert_eq!(game.try_select(Coord::new(1, 1)), Err(MoveError::GameOver));
        assert_eq!(game.try_relocate(Coord::new(2, 2)), Err(MoveError::GameOver));
        assert_eq!(game.try_shift_window(Direction::Down), Err(MoveError::GameOver));
        assert!(game.legal_actions().is_empty());
        assert_eq!(game, frozen);
    }

    #[test]
    fn test_select() {
        let mut game = position(
            ".....\n.XO..\n.....\n.....\n.....",
            Window::new(1, 1, 3),
            Player::X,
        );
        assert_eq!(game.try_select(Coord::new(2, 1)), Err(MoveError::InvalidSelection(Coord::new(2, 1))));
        assert_eq!(game.try_select(Coord::new(3, 3)), Err(MoveError::InvalidSelection(Coord::new(3, 3))));
        assert_eq!(game.selected(), None);

        assert!(game.select(1, 1));
        assert_eq!(game.selected(), Some(Coord::new(1, 1)));

        // A failed reselect keeps the previous selection
        assert!(!game.select(2, 1));
        assert_eq!(game.selected(), Some(Coord::new(1, 1)));

        game.deselect();
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_select_outside_window() {
        let mut game = position(
            "X....\n.....\n.....\n.....\n.....",
            Window::new(1, 1, 3),
            Player::X,
        );
        assert_eq!(game.try_select(Coord::new(0, 0)), Err(MoveError::OutOfWindow(Coord::new(0, 0))));
    }

    #[test]
    fn test_relocate() {
        let mut game = position(
            ".....\n.X...\n..O..\n.....\n.....",
            Window::new(1, 1, 3),
            Player::X,
        );
        assert_eq!(game.try_relocate(Coord::new(3, 3)), Err(MoveError::NoSelection));

        assert!(game.select(1, 1));
        assert_eq!(game.try_relocate(Coord::new(2, 2)), Err(MoveError::OccupiedCell(Coord::new(2, 2))));
        assert_eq!(game.try_relocate(Coord::new(4, 4)), Err(MoveError::OutOfWindow(Coord::new(4, 4))));
        assert_eq!(game.selected(), Some(Coord::new(1, 1)));

        assert!(game.relocate(3, 3));
        assert!(game.board().is_empty(Coord::new(1, 1)));
        assert_eq!(game.board().get(Coord::new(3, 3)), Some(Player::X));
        assert_eq!(game.selected(), None);
        assert_eq!(game.current_player(), Player::O);
        // Relocation does not count as a placement
        assert_eq!(game.placed(Player::X), 1);
    }

    #[test]
    fn test_shift_window() {
        let mut game = position(
            "X....\n.X...\n.....\n...O.\n....O",
            Window::new(1, 1, 3),
            Player::O,
        );
        let board_before = game.board().clone();

        assert!(game.shift_window(Direction::UpLeft));
        assert_eq!(game.window(), Window::new(0, 0, 3));
        assert_eq!(game.board(), &board_before);
        assert_eq!(game.current_player(), Player::X);

        assert_eq!(game.try_shift_window(Direction::Up), Err(MoveError::IllegalShift(Direction::Up)));
        assert_eq!(game.window(), Window::new(0, 0, 3));
        assert_eq!(game.current_player(), Player::X);
    }

    #[test]
    fn test_shift_completes_line() {
        // X has a row at y=1 spanning x=2..4; only two cells are framed
        let mut game = position(
            ".....\n..XXX\n.....\n..O..\n...O.",
            Window::new(1, 1, 3),
            Player::O,
        );
        assert_eq!(game.winner(), None);

        assert!(game.shift_window(Direction::Right));
        assert_eq!(game.window(), Window::new(2, 1, 3));
        // The shifting player handed the win to X
        assert_eq!(game.winner(), Some(Player::X));
        assert_eq!(game.current_player(), Player::O);
    }

    #[test]
    fn test_shift_clears_stale_selection() {
        let mut game = position(
            ".....\n.X...\n.....\n...O.\n.....",
            Window::new(1, 1, 3),
            Player::X,
        );
        assert!(game.select(1, 1));
        assert!(game.shift_window(Direction::Down));
        assert_eq!(game.selected(), None);
        assert_eq!(game.try_relocate(Coord::new(2, 2)), Err(MoveError::NoSelection));
    }

    #[test]
    fn test_apply_relocate_clears_selection_on_failure() {
        let mut game = position(
            ".....\n.X...\n..O..\n.....\n.....",
            Window::new(1, 1, 3),
            Player::X,
        );
        let action = Action::Relocate {
            from: Coord::new(1, 1),
            to: Coord::new(2, 2),
        };
        assert_eq!(game.apply(action), Err(MoveError::OccupiedCell(Coord::new(2, 2))));
        assert_eq!(game.selected(), None);

        let action = Action::Relocate {
            from: Coord::new(1, 1),
            to: Coord::new(3, 1),
        };
        assert_eq!(game.apply(action), Ok(()));
        assert_eq!(game.board().get(Coord::new(3, 1)), Some(Player::X));
    }

    #[test]
    fn test_legal_actions() {
        let game = GameState::default();
        let actions = game.legal_actions();
        let places = actions.iter().filter(|a| matches!(a, Action::Place { .. })).count();
        let shifts = actions.iter().filter(|a| matches!(a, Action::ShiftWindow { .. })).count();
        assert_eq!(places, 9);
        assert_eq!(shifts, 8);
        assert_eq!(actions.len(), 17);

        let game = full_placement_game();
        let actions = game.legal_actions();
        assert!(!actions.iter().any(|a| matches!(a, Action::Place { .. })));
        // Four X pieces, one empty cell
        let relocations = actions.iter().filter(|a| matches!(a, Action::Relocate { .. })).count();
        assert_eq!(relocations, 4);
        for action in actions {
            assert!(game.clone().apply(action).is_ok(), "{} should be legal", action);
        }
    }

    #[test]
    fn test_movement_unlocked() {
        let mut game = GameState::default();
        for (x, y) in [(1, 1), (3, 1), (2, 1)] {
            game.place(x, y);
            assert!(!game.movement_unlocked());
        }
        game.place(1, 2);
        assert!(game.movement_unlocked());
    }

    #[test]
    fn test_from_position_validates() {
        let board: Board = "XXXXX/...../...../...../.....".parse().unwrap();
        let result = GameState::from_position(GameConfig::default(), board, Window::new(1, 1, 3), Player::O);
        assert!(matches!(result, Err(ConfigError::InvalidPosition(_))));

        let board = Board::new(5);
        let result = GameState::from_position(GameConfig::default(), board, Window::new(3, 3, 3), Player::X);
        assert!(result.is_err());
    }

    #[test]
    fn test_detect_winner_ignores_lines_leaving_window() {
        let board: Board = ".....\nXXX..\n.....\n.....\n.....".parse().unwrap();
        assert_eq!(detect_winner(&board, Window::new(1, 1, 3), 3), None);
        assert_eq!(detect_winner(&board, Window::new(0, 0, 3), 3), Some(Player::X));
    }

    #[test]
    fn test_detect_winner_all_directions() {
        let diagonal: Board = "X..../.X.../..X../...../.....".parse().unwrap();
        assert_eq!(detect_winner(&diagonal, Window::new(0, 0, 3), 3), Some(Player::X));

        let anti: Board = "..O../.O.../O..../...../.....".parse().unwrap();
        assert_eq!(detect_winner(&anti, Window::new(0, 0, 3), 3), Some(Player::O));

        let column: Board = "...../...O./...O./...O./.....".parse().unwrap();
        assert_eq!(detect_winner(&column, Window::new(1, 1, 3), 3), Some(Player::O));
    }

    #[test]
    fn test_detect_winner_scan_order() {
        let board: Board = "OOO/.../XXX".parse().unwrap();
        assert_eq!(detect_winner(&board, Window::new(0, 0, 3), 3), Some(Player::O));
    }

    #[test]
    fn test_completes_line() {
        let board: Board = ".....\n.X.X.\n.....\n.....\n.....".parse().unwrap();
        let window = Window::new(1, 1, 3);
        // Middle of the line
        assert!(completes_line(&board, window, Coord::new(2, 1), Player::X, 3));
        assert!(!completes_line(&board, window, Coord::new(2, 1), Player::O, 3));
        assert!(!completes_line(&board, window, Coord::new(2, 2), Player::X, 3));
        // Outside the window never counts
        assert!(!completes_line(&board, window, Coord::new(0, 1), Player::X, 3));
    }
}
