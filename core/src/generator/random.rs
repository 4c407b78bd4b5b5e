use rand::prelude::*;

use super::*;

/// Places mines one at a time on uniformly random cells, retrying whenever the
/// chosen cell already holds one.
///
/// Retries grow without bound as the board fills up, which is fine for the
/// densities people actually play. See [`ShuffleSampler`] for a bounded
/// alternative.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        let seed = rand::random();
        log::debug!("seed: {seed}");
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Places `mines` more mines on `board`, which must have room for them.
    pub(crate) fn fill(&self, board: &mut Board, mines: CellCount) {
        let total_cells = board.len();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_left = mines;
        let mut retries = 0u64;

        while mines_left > 0 {
            let index = rng.random_range(0..total_cells);
            if board.place_mine(index) {
                mines_left -= 1;
            } else {
                retries += 1;
            }
        }

        log::trace!("placed {mines} mines with {retries} retries");
    }
}

impl BoardGenerator for RejectionSampler {
    fn generate(self, config: GameConfig) -> Result<Board> {
        config.validate()?;

        let mut board = Board::empty(config.size);
        self.fill(&mut board, config.mines);

        check_mine_count(&board, config);
        Ok(board)
    }
}
