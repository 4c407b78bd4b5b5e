use core::fmt;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
        })
    }
}

/// How a primary click on a cell is interpreted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    Reveal,
    Flag,
}

impl InputMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Reveal => Self::Flag,
            Self::Flag => Self::Reveal,
        }
    }
}

impl Default for InputMode {
    fn default() -> Self {
        Self::Reveal
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Reveal => "revealing",
            Self::Flag => "flagging",
        })
    }
}

/// One round of play: the board, what the player can see of it, and whether
/// the round is still going.
///
/// Once the status leaves [`GameStatus::Playing`] every move is a no-op until
/// the next [`Game::reset`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameFields")]
pub struct Game {
    board: Board,
    cells: Array2<CellState>,
    status: GameStatus,
    input_mode: InputMode,
    triggered_mine: Option<usize>,
}

impl Game {
    /// Starts a round on a freshly generated random board.
    pub fn new(config: GameConfig) -> Result<Self> {
        let board = RejectionSampler::from_entropy().generate(config)?;
        Ok(Self::with_board(board))
    }

    /// Starts a round on a board built elsewhere.
    pub fn with_board(board: Board) -> Self {
        let size = board.size();
        Self {
            board,
            cells: Array2::default(size.to_nd_index()),
            status: Default::default(),
            input_mode: Default::default(),
            triggered_mine: None,
        }
    }

    /// Replaces the round with a new random board, keeping the input mode.
    ///
    /// On error the current round is left untouched.
    pub fn reset(&mut self, width: Coord, height: Coord, mines: CellCount) -> Result<()> {
        let board = generate(width, height, mines)?;
        self.start_round(board);
        Ok(())
    }

    /// Same as [`Game::reset`] with an explicit generator, e.g. a seeded one.
    pub fn reset_with(&mut self, config: GameConfig, generator: impl BoardGenerator) -> Result<()> {
        let board = generator.generate(config)?;
        self.start_round(board);
        Ok(())
    }

    fn start_round(&mut self, board: Board) {
        log::debug!(
            "new round: {}x{} with {} mines",
            board.size().0,
            board.size().1,
            board.mine_count()
        );
        let size = board.size();
        self.board = board;
        self.cells = Array2::default(size.to_nd_index());
        self.status = GameStatus::Playing;
        self.triggered_mine = None;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.board.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn toggle_input_mode(&mut self) -> InputMode {
        self.input_mode = self.input_mode.toggled();
        log::trace!("input mode: {}", self.input_mode);
        self.input_mode
    }

    /// The cell whose reveal lost the round.
    pub fn triggered_mine(&self) -> Option<usize> {
        self.triggered_mine
    }

    pub fn cell_state(&self, index: usize) -> CellState {
        self.cells[unflatten(index, self.size().0).to_nd_index()]
    }

    /// Visibility of every cell in row-major order.
    pub fn cell_states(&self) -> impl Iterator<Item = CellState> + '_ {
        self.cells.iter().copied()
    }

    pub fn cell_view(&self, index: usize) -> CellView {
        CellView::new(self.cell_state(index), self.board[index])
    }

    /// What to draw for every cell in row-major order.
    pub fn cell_views(&self) -> impl Iterator<Item = CellView> + '_ {
        self.cell_states()
            .zip(self.board.tokens())
            .map(|(state, token)| CellView::new(state, token))
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cell_states().filter(|state| state.is_revealed()).count() as CellCount
    }

    pub fn flag_count(&self) -> CellCount {
        self.cell_states().filter(|state| state.is_flagged()).count() as CellCount
    }

    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flag_count() as isize)
    }

    /// Primary click on `index`, interpreted through the current input mode.
    pub fn handle_click(&mut self, index: usize) -> Result<ClickOutcome> {
        let index = self.board.validate_index(index)?;

        Ok(match self.input_mode {
            InputMode::Flag => ClickOutcome::Mark(self.flag(index)?),
            InputMode::Reveal if self.board.contains_mine(index) => {
                ClickOutcome::Reveal(self.reveal_mine(index)?)
            }
            InputMode::Reveal => ClickOutcome::Reveal(self.reveal(index)?),
        })
    }

    /// Toggles a flag on an unrevealed cell.
    pub fn flag(&mut self, index: usize) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let index = self.board.validate_index(index)?;
        if self.status.is_finished() {
            return Ok(NoChange);
        }

        let cell = self.cell_mut(index);
        let outcome = match *cell {
            Unrevealed => {
                *cell = Flagged;
                Changed
            }
            Flagged => {
                *cell = Unrevealed;
                Changed
            }
            Revealed => NoChange,
        };
        log::trace!("flag {index}: {outcome:?}");
        Ok(outcome)
    }

    /// Reveals `index` and flood-fills through zero-count cells, then checks
    /// for a win.
    ///
    /// A mine under `index` takes the losing path of [`Game::reveal_mine`]
    /// instead.
    pub fn reveal(&mut self, index: usize) -> Result<RevealOutcome> {
        let index = self.board.validate_index(index)?;
        if self.status.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }
        if self.board.contains_mine(index) {
            return self.reveal_mine(index);
        }

        let revealed = self.flood_reveal(index);
        log::trace!("reveal {index}: {revealed} cells opened");

        Ok(if self.is_cleared() {
            self.end_game(GameStatus::Won);
            RevealOutcome::Won
        } else if revealed > 0 {
            RevealOutcome::Revealed
        } else {
            RevealOutcome::NoChange
        })
    }

    /// Loses the round on `index` and uncovers every mine, other cells keep
    /// their state.
    ///
    /// A flagged `index` is protected and nothing happens.
    pub fn reveal_mine(&mut self, index: usize) -> Result<RevealOutcome> {
        let index = self.board.validate_index(index)?;
        if self.status.is_finished() || self.cell_state(index).is_flagged() {
            return Ok(RevealOutcome::NoChange);
        }
        self.triggered_mine = Some(index);
        for (cell, token) in self.cells.iter_mut().zip(self.board.tokens()) {
            if token.is_mine() {
                *cell = CellState::Revealed;
            }
        }
        self.end_game(GameStatus::Lost);
        Ok(RevealOutcome::HitMine)
    }

    /// Reveals the flood-fill closure of `start`, flags act as walls.
    ///
    /// Returns how many cells went from unrevealed to revealed.
    fn flood_reveal(&mut self, start: usize) -> usize {
        let mut visited = HashSet::new();
        let mut to_visit: SmallVec<[usize; 16]> = smallvec![start];
        let mut revealed = 0;

        while let Some(index) = to_visit.pop() {
            if !visited.insert(index) {
                continue;
            }

            let cell = self.cell_mut(index);
            match *cell {
                CellState::Flagged => continue,
                CellState::Unrevealed => {
                    *cell = CellState::Revealed;
                    revealed += 1;
                }
                CellState::Revealed => {}
            }

            if self.board[index].is_zero() {
                to_visit.extend(self.board.neighbors(index));
            }
        }

        revealed
    }

    /// Every safe cell is revealed, flags on mines don't matter.
    fn is_cleared(&self) -> bool {
        self.cell_states()
            .zip(self.board.tokens())
            .all(|(state, token)| state.is_revealed() || token.is_mine())
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        self.status = status;
        log::debug!("game over: {status}");
    }

    fn cell_mut(&mut self, index: usize) -> &mut CellState {
        let coords = unflatten(index, self.size().0);
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Default for Game {
    /// A random round with [`GameConfig::default`].
    fn default() -> Self {
        let config = GameConfig::default();
        let mut board = Board::empty(config.size);
        RejectionSampler::from_entropy().fill(&mut board, config.mines);
        Self::with_board(board)
    }
}

#[derive(Deserialize)]
struct GameFields {
    board: Board,
    cells: Array2<CellState>,
    status: GameStatus,
    input_mode: InputMode,
    triggered_mine: Option<usize>,
}

impl TryFrom<GameFields> for Game {
    type Error = GameError;

    fn try_from(fields: GameFields) -> Result<Self> {
        let (width, height) = fields.board.size();
        if fields.cells.dim() != (height as usize, width as usize) {
            return Err(GameError::InvalidBoardShape);
        }
        if let Some(index) = fields.triggered_mine {
            fields.board.validate_index(index)?;
        }

        Ok(Self {
            board: fields.board,
            cells: fields.cells,
            status: fields.status,
            input_mode: fields.input_mode,
            triggered_mine: fields.triggered_mine,
        })
    }
}
