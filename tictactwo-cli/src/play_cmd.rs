//! Play command - interactive text driver
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: Session::handle() - one command per call
//! - Level 3: human actions, agent reply, end-of-game report
//! - Level 4: command parsing, board rendering

use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tictactwo_core::{Coord, Direction, GameConfig, GameState, HeuristicAgent, Player};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Human vs Human
    Hvh,
    /// Human vs AI
    Hva,
}

#[derive(Args)]
pub struct PlayArgs {
    /// Game mode
    #[arg(long, value_enum, default_value = "hvh")]
    pub mode: Mode,

    /// Symbol played by the AI in hva mode
    #[arg(long, default_value = "O")]
    pub ai_player: Player,
}

const HELP: &str = "\
Commands:
  place X Y      place a piece inside the window
  select X Y     pick one of your pieces inside the window
  move X Y       move the selected piece to an empty window cell
  shift DIR      move the window (up, down, left, right, up-left, ...)
  deselect       drop the current selection
  board          show the board
  help           show this message
  quit           leave the game";

/// Whether the input loop keeps going
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command on stdin/stdout
pub fn run(args: PlayArgs, config: GameConfig, seed: Option<u64>) -> Result<()> {
    let agent = match args.mode {
        Mode::Hva => Some(HeuristicAgent::with_rng(args.ai_player, create_rng(seed))),
        Mode::Hvh => None,
    };

    tracing::info!(mode = ?args.mode, "starting game");

    let mut session = Session::new(GameState::try_new(config)?, agent);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    session.greet(&mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line?;
        if session.handle_line(&line, &mut stdout)? == Flow::Stop {
            break;
        }
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - SESSION
// ============================================================================

/// A game plus the driver-side state around it
pub struct Session {
    game: GameState,
    agent: Option<HeuristicAgent>,
    started: Option<Instant>,
    stalled: bool,
}

impl Session {
    pub fn new(game: GameState, agent: Option<HeuristicAgent>) -> Self {
        Self {
            game,
            agent,
            started: None,
            stalled: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn is_finished(&self) -> bool {
        self.game.is_over() || self.stalled
    }

    pub fn greet(&mut self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "TIC TAC TWO")?;
        writeln!(out, "{}", HELP)?;
        writeln!(out, "{}", render(&self.game))?;
        // The AI may be configured to open
        self.reply_if_agent_turn(out)?;
        writeln!(out, "{}", self.status())?;
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        match line.parse::<Command>() {
            Ok(cmd) => self.handle(cmd, out),
            Err(err) => {
                writeln!(out, "{}", err)?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn handle(&mut self, cmd: Command, out: &mut impl Write) -> Result<Flow> {
        match cmd {
            Command::Quit => return Ok(Flow::Stop),
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                return Ok(Flow::Continue);
            }
            Command::Board => {
                writeln!(out, "{}", render(&self.game))?;
                return Ok(Flow::Continue);
            }
            Command::Deselect => {
                self.game.deselect();
                writeln!(out, "Selection cleared.")?;
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        if self.is_finished() {
            writeln!(out, "The game is over.")?;
            return Ok(Flow::Stop);
        }
        if self.is_agent_turn() {
            writeln!(out, "It is the AI's turn.")?;
            return Ok(Flow::Continue);
        }

        self.started.get_or_insert_with(Instant::now);
        let accepted = self.human_action(cmd, out)?;
        if accepted {
            writeln!(out, "{}", render(&self.game))?;
            self.reply_if_agent_turn(out)?;
        }

        if self.is_finished() {
            self.report_end(out)?;
            return Ok(Flow::Stop);
        }
        writeln!(out, "{}", self.status())?;
        Ok(Flow::Continue)
    }

    // ========================================================================
    // LEVEL 3 - STEPS
    // ========================================================================

    /// Apply one human command. Returns true when the turn was used.
    fn human_action(&mut self, cmd: Command, out: &mut impl Write) -> Result<bool> {
        let needs_unlock = matches!(cmd, Command::Select(_) | Command::Move(_) | Command::Shift(_));
        if needs_unlock && !self.game.movement_unlocked() {
            writeln!(
                out,
                "Moving pieces and the window unlocks once both players have placed {} pieces.",
                self.game.config().movement_unlock
            )?;
            return Ok(false);
        }

        let result = match cmd {
            Command::Place(c) => self.game.try_place(c),
            Command::Select(c) => {
                let result = self.game.try_select(c);
                if result.is_ok() {
                    writeln!(out, "Now move the piece to an empty cell inside the window.")?;
                    return Ok(false);
                }
                result
            }
            Command::Move(c) => self.game.try_relocate(c),
            Command::Shift(d) => self.game.try_shift_window(d),
            Command::Quit | Command::Help | Command::Board | Command::Deselect => return Ok(false),
        };

        match result {
            Ok(()) => Ok(true),
            Err(err) => {
                writeln!(out, "Invalid move: {}.", err)?;
                Ok(false)
            }
        }
    }

    fn is_agent_turn(&self) -> bool {
        matches!(&self.agent, Some(agent) if agent.player == self.game.current_player())
    }

    /// Let the AI answer while it holds the turn
    fn reply_if_agent_turn(&mut self, out: &mut impl Write) -> Result<()> {
        if self.game.is_over() || !self.is_agent_turn() {
            return Ok(());
        }
        let Some(agent) = self.agent.as_mut() else {
            return Ok(());
        };

        match agent.decide_for(&self.game) {
            Some(action) => match self.game.apply(action) {
                Ok(()) => {
                    writeln!(out, "AI ({}) plays: {}", agent.player, action)?;
                    writeln!(out, "{}", render(&self.game))?;
                }
                Err(err) => {
                    tracing::warn!(%action, %err, "agent proposed an illegal action");
                    writeln!(out, "AI ({}) could not move.", agent.player)?;
                    self.stalled = true;
                }
            },
            None => {
                writeln!(out, "AI ({}) passes.", agent.player)?;
                self.stalled = true;
            }
        }
        Ok(())
    }

    fn report_end(&self, out: &mut impl Write) -> Result<()> {
        let elapsed = self.started.map(|s| s.elapsed().as_secs()).unwrap_or(0);
        match self.game.winner() {
            Some(winner) => writeln!(out, "Player {} wins!", winner)?,
            None => writeln!(out, "No moves left, game stalled.")?,
        }
        writeln!(out, "Time: {}s, {} moves.", elapsed, self.game.moves())?;
        tracing::info!(winner = ?self.game.winner(), moves = self.game.moves(), elapsed, "game finished");
        Ok(())
    }

    fn status(&self) -> String {
        let player = self.game.current_player();
        if self.game.in_placement_phase(player) && !self.game.movement_unlocked() {
            format!("Player {}, place a piece inside the grid.", player)
        } else if self.game.in_placement_phase(player) {
            format!(
                "Player {}, place a piece, move one of yours or shift the grid.",
                player
            )
        } else {
            format!(
                "Player {}, move an existing piece inside the grid or move the grid.",
                player
            )
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// One line of user input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Place(Coord),
    Select(Coord),
    Move(Coord),
    Shift(Direction),
    Deselect,
    Board,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let rest: Vec<&str> = parts.collect();

        let coord = || -> Result<Coord, String> {
            match rest.as_slice() {
                [x, y] => {
                    let x = x.parse().map_err(|_| format!("bad column: {}", x))?;
                    let y = y.parse().map_err(|_| format!("bad row: {}", y))?;
                    Ok(Coord::new(x, y))
                }
                _ => Err(format!("usage: {} X Y", verb)),
            }
        };

        match verb.as_str() {
            "place" | "p" => coord().map(Command::Place),
            "select" | "s" => coord().map(Command::Select),
            "move" | "m" => coord().map(Command::Move),
            "shift" => match rest.as_slice() {
                [dir] => dir.parse().map(Command::Shift),
                _ => Err("usage: shift DIRECTION".to_string()),
            },
            "deselect" => Ok(Command::Deselect),
            "board" => Ok(Command::Board),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command: {} (try 'help')", other)),
        }
    }
}

/// Board with the active window bracketed
pub fn render(game: &GameState) -> String {
    let board = game.board();
    let window = game.window();
    let mut s = String::from("   ");
    for x in 0..board.size() {
        let _ = write!(s, " {} ", x);
    }
    for y in 0..board.size() {
        let _ = write!(s, "\n{:>2} ", y);
        for x in 0..board.size() {
            let c = Coord::new(x, y);
            let ch = board.get(c).map(|p| p.symbol()).unwrap_or('.');
            if game.selected() == Some(c) {
                let _ = write!(s, "<{}>", ch);
            } else if window.contains(c) {
                let _ = write!(s, "[{}]", ch);
            } else {
                let _ = write!(s, " {} ", ch);
            }
        }
    }
    s
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
