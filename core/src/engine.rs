use alloc::vec::Vec;
use rand::Rng;
use rand::RngExt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Balls added to the board per spawn batch.
pub const SPAWN_BATCH: usize = 3;

/// Upcoming spawn colors shown to the player.
pub type Forecast = [Color; SPAWN_BATCH];

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    GameOver,
}

impl EngineState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// How one activation resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// No corridor to the destination; nothing changed, selection kept.
    Unreachable,
    /// The moved ball completed one or more runs, which were cleared.
    MoveCleared,
    /// No run at the destination; a spawn batch was placed.
    Spawned,
    /// The spawn batch completed one or more runs, which were cleared.
    SpawnCleared,
    /// The spawn batch filled the board with no run to clear.
    GameOver,
}

impl TurnOutcome {
    /// Whether this outcome changed any board state.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Unreachable)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// Everything the presentation layer needs to stage one completed turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub outcome: TurnOutcome,
    /// Cells the moved ball traverses, destination last; empty when
    /// unreachable.
    pub path: Vec<Coord2>,
    /// Qualifying runs cleared this turn; a cell shared by two runs appears
    /// in both.
    pub cleared: Vec<Line>,
    /// Balls placed by the spawn step, in placement order.
    pub spawned: SmallVec<[(Coord2, Color); SPAWN_BATCH]>,
    /// Score credited this turn.
    pub score_gained: Score,
}

impl TurnReport {
    fn unreachable() -> Self {
        Self {
            outcome: TurnOutcome::Unreachable,
            path: Vec::new(),
            cleared: Vec::new(),
            spawned: SmallVec::new(),
            score_gained: 0,
        }
    }
}

/// Owned copy of everything the presentation layer renders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub forecast: Forecast,
    pub score: Score,
    pub record: Score,
    pub locked: bool,
    pub selected: Option<Coord2>,
    pub game_over: bool,
}

/// One game session from start to board-full.
///
/// All randomness comes from the caller, and the record score is injected
/// at session start; persisting it back is the caller's concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    board: Board,
    forecast: Forecast,
    score: Score,
    record: Score,
    selected: Option<Coord2>,
    locked: bool,
    state: EngineState,
}

impl GameEngine {
    /// Session over an explicit board, without the initial spawn batch.
    pub fn with_board(board: Board, forecast: Forecast, record: Score) -> Self {
        Self {
            board,
            forecast,
            score: 0,
            record,
            selected: None,
            locked: false,
            state: Default::default(),
        }
    }

    /// Fresh session: empty board, rolled forecast, one spawn batch placed.
    pub fn new_game<R: Rng>(record: Score, rng: &mut R) -> Self {
        let forecast = roll_forecast(rng);
        let mut engine = Self::with_board(Board::new(), forecast, record);
        engine.spawn_batch(rng);
        engine
    }

    /// Discards the session and starts over, keeping the record.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) {
        *self = Self::new_game(self.record, rng);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn forecast(&self) -> Forecast {
        self.forecast
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn record(&self) -> Score {
        self.record
    }

    pub fn selected(&self) -> Option<Coord2> {
        self.selected
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            forecast: self.forecast,
            score: self.score,
            record: self.record,
            locked: self.locked,
            selected: self.selected,
            game_over: self.is_over(),
        }
    }

    /// Picks the ball at `coords` to move, replacing any prior selection.
    pub fn select_cell(&mut self, coords: Coord2) -> Result<()> {
        self.check_accepting()?;
        let coords = self.board.validate_coords(coords)?;
        if self.board.ball_at(coords).is_none() {
            return Err(GameError::NoBall);
        }

        self.selected = Some(coords);
        Ok(())
    }

    /// Tries to move the selected ball to the empty cell at `coords`, then
    /// resolves the turn: line clearing, spawning, game-over detection.
    pub fn activate_cell<R: Rng>(&mut self, coords: Coord2, rng: &mut R) -> Result<TurnReport> {
        self.check_accepting()?;
        let coords = self.board.validate_coords(coords)?;
        if !self.board.is_empty_at(coords) {
            return Err(GameError::Occupied);
        }
        let origin = self.selected.ok_or(GameError::NoSelection)?;
        let color = self.board.ball_at(origin).ok_or(GameError::NoBall)?;

        // Reachability is settled before any board mutation; an unreachable
        // destination leaves the selection in place.
        let Some(path) = find_path(&self.board, origin, coords) else {
            log::debug!("no corridor from {:?} to {:?}", origin, coords);
            return Ok(TurnReport::unreachable());
        };

        self.locked = true;
        let report = self.run_turn(origin, coords, color, path, rng);
        if !self.state.is_over() {
            self.locked = false;
        }
        Ok(report)
    }

    fn run_turn<R: Rng>(
        &mut self,
        origin: Coord2,
        destination: Coord2,
        color: Color,
        path: Vec<Coord2>,
        rng: &mut R,
    ) -> TurnReport {
        self.board[origin] = Cell::Empty;
        self.board[destination] = Cell::Ball(color);
        self.selected = None;
        log::debug!("moved {:?} ball {:?} -> {:?}", color, origin, destination);

        let mut report = TurnReport {
            outcome: TurnOutcome::MoveCleared,
            path,
            cleared: Vec::new(),
            spawned: SmallVec::new(),
            score_gained: 0,
        };

        // Runs through the destination clear without spawning.
        let lines = find_lines(&self.board, destination);
        if !lines.is_empty() {
            report.score_gained = self.clear_lines(&lines);
            report.cleared = lines.into_vec();
            return report;
        }

        // Otherwise the forecast lands, and the new balls are checked the
        // same way.
        report.spawned = self.spawn_batch(rng);
        let mut spawn_lines = Vec::new();
        for &(coords, _) in &report.spawned {
            spawn_lines.extend(find_lines(&self.board, coords));
        }

        if !spawn_lines.is_empty() {
            report.score_gained = self.clear_lines(&spawn_lines);
            report.cleared = spawn_lines;
            report.outcome = TurnOutcome::SpawnCleared;
        } else if self.board.is_full() {
            self.state = EngineState::GameOver;
            report.outcome = TurnOutcome::GameOver;
            log::debug!("board full, game over at score {}", self.score);
        } else {
            report.outcome = TurnOutcome::Spawned;
        }
        report
    }

    /// Places up to `SPAWN_BATCH` forecast balls on random empty cells and
    /// rolls the next forecast. Stops early when the board fills; the
    /// forecast rolls once per batch either way.
    fn spawn_batch<R: Rng>(&mut self, rng: &mut R) -> SmallVec<[(Coord2, Color); SPAWN_BATCH]> {
        let forecast = self.forecast;
        let mut spawned = SmallVec::new();

        for color in forecast {
            let empty = self.board.empty_cells();
            if empty.is_empty() {
                log::warn!("spawn stopped early, board is full");
                break;
            }
            let coords = empty[rng.random_range(0..empty.len())];
            self.board[coords] = Cell::Ball(color);
            spawned.push((coords, color));
        }

        self.forecast = roll_forecast(rng);
        spawned
    }

    /// Empties every cell of every line and credits the score. A cell shared
    /// by two lines is counted once per line.
    fn clear_lines(&mut self, lines: &[Line]) -> Score {
        let mut gained = 0;
        for line in lines {
            for &coords in &line.cells {
                self.board[coords] = Cell::Empty;
            }
            gained += line.score();
        }
        self.award(gained);
        log::debug!("cleared {} line(s) for {} points", lines.len(), gained);
        gained
    }

    fn award(&mut self, gained: Score) {
        self.score += gained;
        if self.score > self.record {
            self.record = self.score;
        }
    }

    fn check_accepting(&self) -> Result<()> {
        if self.state.is_over() {
            Err(GameError::GameFinished)
        } else if self.locked {
            Err(GameError::Locked)
        } else {
            Ok(())
        }
    }
}

fn roll_forecast<R: Rng>(rng: &mut R) -> Forecast {
    [
        Color::random(rng),
        Color::random(rng),
        Color::random(rng),
    ]
}
