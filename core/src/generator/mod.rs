use crate::*;
pub use random::*;
pub use shuffle::*;

mod random;
mod shuffle;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}

/// Generates a fresh random board for `(width, height, mines)`.
pub fn generate(width: Coord, height: Coord, mines: CellCount) -> Result<Board> {
    let config = GameConfig::new((width, height), mines)?;
    RejectionSampler::from_entropy().generate(config)
}

/// Warns when a generator produced a different mine count than requested.
fn check_mine_count(board: &Board, config: GameConfig) {
    if board.mine_count() != config.mines {
        log::warn!(
            "Generated board mine count mismatch, actual: {}, requested: {}",
            board.mine_count(),
            config.mines
        );
    }
}
