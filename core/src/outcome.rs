use serde::{Deserialize, Serialize};

use crate::*;

/// Where a game stands. Once terminal it never changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Won,
    Lost,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameOutcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A board is won when nothing is left hidden and the number of flags equals the number of mines.
///
/// Flags are not checked against the mine layout. Reveals are refused on flagged cells, so every mine the player
/// has not hit is still hidden or flagged, and with nothing hidden the flags can only match the mine count by
/// sitting on exactly the mines.
pub fn is_won(visible: &VisibleBoard) -> bool {
    visible.hidden_count() == 0 && visible.flagged_count() == visible.mine_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal_all_but(visible: &mut VisibleBoard, mine: Coord2) {
        let (rows, cols) = visible.size();
        for row in 0..rows {
            for col in 0..cols {
                if (row, col) != mine {
                    visible[(row, col)] = VisibleCell::Revealed(Label::Number(1));
                }
            }
        }
    }

    #[test]
    fn won_with_mine_flagged_and_everything_else_revealed() {
        let mut visible = VisibleBoard::new((2, 2), 1);
        reveal_all_but(&mut visible, (0, 0));
        visible[(0, 0)] = VisibleCell::Flagged;

        assert!(is_won(&visible));
    }

    #[test]
    fn not_won_while_a_clear_cell_is_hidden() {
        let mut visible = VisibleBoard::new((2, 2), 1);
        reveal_all_but(&mut visible, (0, 0));
        visible[(0, 0)] = VisibleCell::Flagged;
        visible[(1, 1)] = VisibleCell::Hidden;

        assert!(!is_won(&visible));
    }

    #[test]
    fn not_won_with_the_mine_unflagged() {
        let mut visible = VisibleBoard::new((2, 2), 1);
        reveal_all_but(&mut visible, (0, 0));

        assert!(!is_won(&visible));
    }

    #[test]
    fn flag_covered_cells_are_not_counted_as_flags() {
        let mut visible = VisibleBoard::new((1, 3), 1);
        visible[(0, 0)] = VisibleCell::Revealed(Label::FlagCovered);
        visible[(0, 1)] = VisibleCell::Revealed(Label::Number(1));
        visible[(0, 2)] = VisibleCell::Flagged;

        assert!(is_won(&visible));
    }

    #[test]
    fn outcome_finished_states() {
        assert!(!GameOutcome::default().is_finished());
        assert!(GameOutcome::Won.is_finished());
        assert!(GameOutcome::Lost.is_finished());
    }
}
