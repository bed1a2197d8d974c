use crate::*;
pub use shuffle::*;

mod shuffle;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<HiddenBoard>;
}
