use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Why a legal-looking move was refused. Nothing changes on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Flag toggle on a revealed cell.
    AlreadyRevealed,
    /// Reveal on a cell that is revealed or flagged.
    AlreadyRevealedOrFlagged,
}

/// What a move did, for the caller to display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    Flagged(Coord2),
    Unflagged(Coord2),
    Rejected(RejectReason),
    HitMine(Coord2),
    /// Positions whose visible state changed.
    Revealed(BTreeSet<Coord2>),
    Won,
}

impl EngineEvent {
    /// Whether the board needs to be drawn again.
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// One game from the first move to a win or a loss. Start a new game by building a new value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    hidden: HiddenBoard,
    visible: VisibleBoard,
    outcome: GameOutcome,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(hidden: HiddenBoard) -> Self {
        let visible = VisibleBoard::new(hidden.size(), hidden.mine_count());
        Self {
            hidden,
            visible,
            outcome: Default::default(),
            triggered_mine: None,
        }
    }

    /// Fresh game with a uniformly random layout, reproducible from `seed`.
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(ShuffleGenerator::from_seed(seed), config)
    }

    pub fn with_generator(generator: impl BoardGenerator, config: GameConfig) -> Result<Self> {
        generator.generate(config).map(Self::new)
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.hidden.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.hidden.mine_count()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.visible.flagged_count()
    }

    /// Mines minus flags, negative when the player has over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.flags_placed() as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> VisibleCell {
        self.visible[coords]
    }

    pub fn visible_board(&self) -> &VisibleBoard {
        &self.visible
    }

    /// The mine layout, only available once the game is over.
    pub fn hidden_board(&self) -> Option<&HiddenBoard> {
        self.is_finished().then_some(&self.hidden)
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Plays one move. Legality is decided from the current board before anything is written.
    pub fn apply(&mut self, mv: Move) -> Result<EngineEvent> {
        self.check_in_progress()?;
        let coords = self.hidden.validate_coords(mv.coords())?;
        log::trace!("apply {:?}", mv);

        Ok(if mv.flag {
            self.toggle_flag(coords)
        } else {
            self.reveal(coords)
        })
    }

    /// Suggests a blank cell that is still hidden, a safe move that opens a region.
    pub fn hint<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Coord2> {
        if self.is_finished() {
            return None;
        }

        let (rows, cols) = self.size();
        let candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| {
                self.hidden[coords].is_blank() && self.visible[coords] == VisibleCell::Hidden
            })
            .collect();

        candidates.choose(rng).copied()
    }

    fn toggle_flag(&mut self, coords: Coord2) -> EngineEvent {
        match self.visible[coords] {
            VisibleCell::Hidden => {
                self.visible[coords] = VisibleCell::Flagged;
                EngineEvent::Flagged(coords)
            }
            VisibleCell::Flagged => {
                self.visible[coords] = VisibleCell::Hidden;
                EngineEvent::Unflagged(coords)
            }
            VisibleCell::Revealed(_) => EngineEvent::Rejected(RejectReason::AlreadyRevealed),
        }
    }

    fn reveal(&mut self, coords: Coord2) -> EngineEvent {
        if self.visible[coords] != VisibleCell::Hidden {
            return EngineEvent::Rejected(RejectReason::AlreadyRevealedOrFlagged);
        }

        if self.hidden.contains_mine(coords) {
            self.triggered_mine = Some(coords);
            self.end_game(GameOutcome::Lost);
            self.expose_mines();
            return EngineEvent::HitMine(coords);
        }

        let changed = flood_reveal(&self.hidden, &mut self.visible, coords);
        if is_won(&self.visible) {
            self.end_game(GameOutcome::Won);
            EngineEvent::Won
        } else {
            EngineEvent::Revealed(changed)
        }
    }

    /// Shows every mine: hidden ones as exposed, flagged ones as disarmed. Flags on clear cells stay.
    fn expose_mines(&mut self) {
        let mines: Vec<Coord2> = self.hidden.mine_positions().collect();
        for coords in mines {
            self.visible[coords] = match self.visible[coords] {
                VisibleCell::Hidden => VisibleCell::Revealed(Label::MineExposed),
                VisibleCell::Flagged => VisibleCell::Revealed(Label::MineDisarmed),
                revealed @ VisibleCell::Revealed(_) => revealed,
            };
        }
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        if self.outcome.is_finished() {
            return;
        }
        log::debug!("Game ended: {:?}", outcome);
        self.outcome = outcome;
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.outcome.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> Game {
        Game::new(HiddenBoard::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn reveal_hits_mine_and_exposes_layout() {
        let mut game = game((3, 3), &[(0, 0), (2, 2)]);
        game.apply(Move::toggle_flag((2, 2))).unwrap();
        game.apply(Move::toggle_flag((1, 1))).unwrap();

        let event = game.apply(Move::reveal((0, 0))).unwrap();

        assert_eq!(event, EngineEvent::HitMine((0, 0)));
        assert_eq!(game.outcome(), GameOutcome::Lost);
        assert_eq!(game.triggered_mine(), Some((0, 0)));
        assert_eq!(game.cell_at((0, 0)), VisibleCell::Revealed(Label::MineExposed));
        assert_eq!(game.cell_at((2, 2)), VisibleCell::Revealed(Label::MineDisarmed));
        assert_eq!(game.cell_at((1, 1)), VisibleCell::Flagged);
        assert_eq!(game.cell_at((0, 1)), VisibleCell::Hidden);
        assert!(game.hidden_board().is_some());
    }

    #[test]
    fn no_moves_after_the_game_ends() {
        let mut game = game((2, 2), &[(0, 0)]);
        game.apply(Move::reveal((0, 0))).unwrap();

        assert_eq!(game.apply(Move::reveal((1, 1))), Err(GameError::AlreadyEnded));
        assert_eq!(game.apply(Move::toggle_flag((1, 1))), Err(GameError::AlreadyEnded));
        assert_eq!(game.outcome(), GameOutcome::Lost);
    }

    #[test]
    fn finished_game_refuses_out_of_bounds_moves_as_ended() {
        let mut game = game((2, 2), &[(0, 0)]);
        game.apply(Move::reveal((0, 0))).unwrap();

        assert_eq!(game.apply(Move::reveal((5, 5))), Err(GameError::AlreadyEnded));
        assert_eq!(game.apply(Move::toggle_flag((0, 9))), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn flag_toggles_back_and_forth() {
        let mut game = game((2, 2), &[(0, 0)]);

        assert_eq!(
            game.apply(Move::toggle_flag((1, 0))).unwrap(),
            EngineEvent::Flagged((1, 0))
        );
        assert_eq!(game.flags_placed(), 1);
        assert_eq!(
            game.apply(Move::toggle_flag((1, 0))).unwrap(),
            EngineEvent::Unflagged((1, 0))
        );
        assert_eq!(game.cell_at((1, 0)), VisibleCell::Hidden);
        assert_eq!(game.mines_left(), 1);
    }

    #[test]
    fn rejected_moves_leave_the_game_untouched() {
        let mut game = game((2, 3), &[(0, 0)]);
        game.apply(Move::reveal((1, 2))).unwrap();
        game.apply(Move::toggle_flag((0, 0))).unwrap();
        let before = game.clone();

        assert_eq!(
            game.apply(Move::toggle_flag((1, 2))).unwrap(),
            EngineEvent::Rejected(RejectReason::AlreadyRevealed)
        );
        assert_eq!(
            game.apply(Move::reveal((1, 2))).unwrap(),
            EngineEvent::Rejected(RejectReason::AlreadyRevealedOrFlagged)
        );
        assert_eq!(
            game.apply(Move::reveal((0, 0))).unwrap(),
            EngineEvent::Rejected(RejectReason::AlreadyRevealedOrFlagged)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn reveal_floods_and_reports_changed_cells() {
        let mut game = game((3, 3), &[(2, 2)]);

        let event = game.apply(Move::reveal((0, 0))).unwrap();

        let EngineEvent::Revealed(changed) = event else {
            panic!("expected a reveal, got {:?}", event);
        };
        assert_eq!(changed.len(), 8);
        assert_eq!(game.cell_at((0, 0)), VisibleCell::Revealed(Label::Blank));
        assert_eq!(game.cell_at((1, 1)), VisibleCell::Revealed(Label::Number(1)));
        assert_eq!(game.cell_at((2, 2)), VisibleCell::Hidden);
        assert_eq!(game.outcome(), GameOutcome::InProgress);
    }

    #[test]
    fn winning_board_transitions_to_won_state() {
        let mut game = game((3, 3), &[(2, 2)]);
        game.apply(Move::toggle_flag((2, 2))).unwrap();

        assert_eq!(game.apply(Move::reveal((0, 0))).unwrap(), EngineEvent::Won);
        assert_eq!(game.outcome(), GameOutcome::Won);
        assert!(game.is_finished());
        assert_eq!(game.triggered_mine(), None);
        assert_eq!(game.apply(Move::reveal((0, 0))), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn flag_toggle_never_ends_the_game() {
        let mut game = game((2, 1), &[(0, 0)]);
        assert_eq!(
            game.apply(Move::reveal((1, 0))).unwrap(),
            EngineEvent::Revealed(BTreeSet::from([(1, 0)]))
        );

        // board now satisfies the win predicate, but only a reveal evaluates it
        assert_eq!(
            game.apply(Move::toggle_flag((0, 0))).unwrap(),
            EngineEvent::Flagged((0, 0))
        );
        assert!(is_won(game.visible_board()));
        assert_eq!(game.outcome(), GameOutcome::InProgress);
        assert_eq!(
            game.apply(Move::toggle_flag((0, 0))).unwrap(),
            EngineEvent::Unflagged((0, 0))
        );
    }

    #[test]
    fn out_of_bounds_move_is_an_error() {
        let mut game = game((2, 2), &[(0, 0)]);
        assert_eq!(game.apply(Move::reveal((2, 0))), Err(GameError::InvalidCoords));
        assert_eq!(game.apply(Move::toggle_flag((0, 2))), Err(GameError::InvalidCoords));
    }

    #[test]
    fn hidden_board_is_withheld_during_play() {
        let game = Game::new_game(GameConfig::STANDARD, 11).unwrap();

        assert!(game.hidden_board().is_none());
        assert_eq!(game.total_mines(), 96);
        assert_eq!(game.visible_board().hidden_count(), 450);
    }

    #[test]
    fn new_game_rejects_bad_config() {
        let config = GameConfig::new_unchecked((2, 2), 4);
        assert_eq!(Game::new_game(config, 1), Err(GameError::TooManyMines));
    }

    #[test]
    fn hint_points_at_hidden_blank_cells() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut game = game((3, 3), &[(2, 2)]);

        let hint = game.hint(&mut rng).unwrap();
        assert_eq!(game.hidden[hint], HiddenCell::Clear(0));

        game.apply(Move::reveal(hint)).unwrap();
        assert_eq!(game.hint(&mut rng), None);
    }
}
