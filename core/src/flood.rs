use alloc::collections::BTreeSet;
use alloc::vec;

use crate::*;

/// Reveals `start` and, when it has no adjacent mines, the orthogonally connected blank region around it along with
/// that region's numbered border.
///
/// Numbered cells are always leaves, flagged numbered cells included, whose flag is replaced by the number. A flag
/// sitting on a blank cell is kept on screen as [`Label::FlagCovered`] but no longer stops the spread. Each cell is
/// marked revealed before its neighbors are queued, and an already revealed blank stops the walk, so no separate
/// visited set is needed.
///
/// Returns the positions whose visible state changed.
pub fn flood_reveal(
    hidden: &HiddenBoard,
    visible: &mut VisibleBoard,
    start: Coord2,
) -> BTreeSet<Coord2> {
    let mut changed = BTreeSet::new();
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        let label = match hidden[coords] {
            HiddenCell::Mine => {
                log::warn!("Flood reached mine at {:?}, skipping", coords);
                continue;
            }
            HiddenCell::Clear(0) => match visible[coords] {
                VisibleCell::Revealed(_) => continue,
                VisibleCell::Hidden => Label::Blank,
                VisibleCell::Flagged => Label::FlagCovered,
            },
            HiddenCell::Clear(count) => {
                if !visible[coords].is_revealed() {
                    visible[coords] = VisibleCell::Revealed(Label::Number(count));
                    changed.insert(coords);
                }
                continue;
            }
        };

        visible[coords] = VisibleCell::Revealed(label);
        changed.insert(coords);
        to_visit.extend(hidden.iter_neighbors(coords, Neighborhood::VonNeumann));
    }

    log::trace!("Flood from {:?} changed {} cells", start, changed.len());
    changed
}
