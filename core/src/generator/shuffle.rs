use rand::prelude::*;

use super::*;

/// Picks mine cells with a partial Fisher-Yates shuffle of all indices.
///
/// Does a fixed amount of work regardless of density.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleSampler {
    seed: u64,
}

impl ShuffleSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for ShuffleSampler {
    fn generate(self, config: GameConfig) -> Result<Board> {
        config.validate()?;

        let mut board = Board::empty(config.size);
        let mut indices: Vec<usize> = (0..board.len()).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let (mines, _) = indices.partial_shuffle(&mut rng, config.mines.into());
        for &index in mines.iter() {
            board.place_mine(index);
        }

        check_mine_count(&board, config);
        Ok(board)
    }
}
