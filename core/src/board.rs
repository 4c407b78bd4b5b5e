use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mines and adjacency counts for one round, addressed by row-major index.
///
/// Backed by a `(height, width)` array in standard layout, so iterating it
/// visits cells in index order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardFields")]
pub struct Board {
    tokens: Array2<Token>,
    mine_count: CellCount,
}

impl Board {
    /// A board of the given size with no mines yet.
    pub(crate) fn empty(size: Coord2) -> Self {
        Self {
            tokens: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Builds a board with mines at exactly `mine_indices`, duplicates collapse.
    pub fn from_mine_indices(size: Coord2, mine_indices: &[usize]) -> Result<Self> {
        GameConfig::new(size, 0)?;
        let mut board = Self::empty(size);

        for &index in mine_indices {
            let index = board.validate_index(index)?;
            board.place_mine(index);
        }

        if board.mine_count >= board.total_cells() {
            return Err(GameError::TooManyMines);
        }

        Ok(board)
    }

    /// Turns `index` into a mine and bumps the counts around it.
    ///
    /// Returns `false` when the cell already held a mine.
    pub(crate) fn place_mine(&mut self, index: usize) -> bool {
        let coords = unflatten(index, self.size().0);
        let cell = &mut self.tokens[coords.to_nd_index()];
        if cell.is_mine() {
            return false;
        }
        *cell = Token::Mine;
        self.mine_count += 1;

        for neighbor in self.neighbors(index) {
            let neighbor_coords = unflatten(neighbor, self.size().0);
            if let Token::Count(count) = &mut self.tokens[neighbor_coords.to_nd_index()] {
                *count += 1;
            }
        }

        true
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_index(&self, index: usize) -> Result<usize> {
        if index < self.len() {
            Ok(index)
        } else {
            Err(GameError::IndexOutOfRange)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (height, width) = self.tokens.dim();
        (width as Coord, height as Coord)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn total_cells(&self) -> CellCount {
        self.tokens.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn get(&self, index: usize) -> Option<Token> {
        self.validate_index(index).ok().map(|index| self[index])
    }

    pub fn contains_mine(&self, index: usize) -> bool {
        self[index].is_mine()
    }

    /// All tokens in row-major order.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().copied()
    }

    pub fn neighbors(&self, index: usize) -> NeighborIter {
        let size = self.size();
        NeighborIter::new(unflatten(index, size.0), size)
    }

    /// Counts mines around `index` from scratch, ignoring the stored token.
    pub fn count_adjacent_mines(&self, index: usize) -> u8 {
        self.neighbors(index)
            .filter(|&neighbor| self.contains_mine(neighbor))
            .count() as u8
    }
}

#[derive(Deserialize)]
struct BoardFields {
    tokens: Array2<Token>,
    mine_count: CellCount,
}

/// Rebuilds the board from its mines and checks the stored counts agree.
impl TryFrom<BoardFields> for Board {
    type Error = GameError;

    fn try_from(fields: BoardFields) -> Result<Self> {
        let (height, width) = fields.tokens.dim();
        let size = (
            Coord::try_from(width).map_err(|_| GameError::InvalidDimensions)?,
            Coord::try_from(height).map_err(|_| GameError::InvalidDimensions)?,
        );
        GameConfig::new(size, 0)?;

        let mut board = Self::empty(size);
        for (index, token) in fields.tokens.iter().enumerate() {
            if token.is_mine() {
                board.place_mine(index);
            }
        }

        if board.tokens != fields.tokens || board.mine_count != fields.mine_count {
            return Err(GameError::InvalidBoardShape);
        }
        board.game_config().validate()?;
        Ok(board)
    }
}

impl Index<usize> for Board {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[unflatten(index, self.size().0).to_nd_index()]
    }
}
