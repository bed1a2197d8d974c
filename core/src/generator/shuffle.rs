use alloc::vec;
use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Generation strategy that lays out every mine and clear cell in a flat run, applies a uniform random permutation,
/// and reshapes the result row by row, so that every placement is equally likely.
#[derive(Clone, Debug)]
pub struct ShuffleGenerator<R> {
    rng: R,
}

impl<R: Rng> ShuffleGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl ShuffleGenerator<SmallRng> {
    /// Reproducible generator, the same seed always yields the same board.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BoardGenerator for ShuffleGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<HiddenBoard> {
        shuffle_layout(config, &mut self.rng)
    }
}

/// Places `config.mines` mines uniformly at random and computes every adjacency count.
pub fn shuffle_layout<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<HiddenBoard> {
    if let Err(err) = config.validate() {
        log::warn!("Refusing to generate board for {:?}: {}", config, err);
        return Err(err);
    }

    let total_cells = usize::from(config.total_cells());
    let mut cells = vec![false; total_cells];
    cells[..usize::from(config.mines)].fill(true);
    cells.shuffle(rng);

    let mine_mask = Array2::from_shape_vec(config.size.to_nd_index(), cells)
        .map_err(|_| GameError::InvalidBoardShape)?;
    let board = HiddenBoard::from_mine_mask(&mine_mask)?;

    log::debug!(
        "Generated {}x{} board with {} mines",
        config.size.0,
        config.size.1,
        board.mine_count()
    );
    Ok(board)
}
