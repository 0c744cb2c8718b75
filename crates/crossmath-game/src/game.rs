use std::collections::BTreeMap;

use crossmath_core::Position;
use log::debug;

use crate::{
    Assignment, Bank, BankError, Board, CellValues as _, Puzzle, Tracker, ValidationReport,
    validate,
};

/// Errors raised by player actions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum GameError {
    /// The position is not a designated slot.
    #[display("{_0} is not a player slot")]
    #[from(ignore)]
    NotASlot(#[error(not(source))] Position),
    /// The bank rejected the operation.
    #[display("{_0}")]
    Bank(BankError),
}

/// A cross-math game session.
///
/// Holds everything that changes while a puzzle is played: which bank number sits in
/// which slot, and the equation states of the last validation pass. Each action runs one
/// complete validation pass and returns its [`ValidationReport`].
///
/// # Example
///
/// ```
/// use crossmath_core::Position;
/// use crossmath_game::{Game, PuzzleLibrary, TransitionKind};
///
/// let library = PuzzleLibrary::builtin();
/// let mut game = Game::new(library.level(0)?.clone());
///
/// // The easy level's bank is [2, 3, 6, 7]; put the 3 into (0, 2).
/// let report = game.place(Position::new(0, 2), 1)?;
/// assert!(
///     report
///         .transitions()
///         .iter()
///         .all(|t| t.kind() == TransitionKind::BecameCorrect)
/// );
/// assert!(!report.is_complete());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    puzzle: Puzzle,
    bank: Bank,
    assignment: Assignment,
    placed: BTreeMap<Position, usize>,
    tracker: Tracker,
}

impl Game {
    /// Starts a session on `puzzle` with every slot empty and every bank number unused.
    #[must_use]
    pub fn new(puzzle: Puzzle) -> Self {
        let bank = Bank::new(puzzle.numbers().iter().copied());
        Self {
            puzzle,
            bank,
            assignment: Assignment::new(),
            placed: BTreeMap::new(),
            tracker: Tracker::new(),
        }
    }

    /// Returns the puzzle being played.
    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Returns the number bank.
    #[must_use]
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    /// Returns the player's slot values.
    #[must_use]
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Returns the grid combined with the player's values.
    #[must_use]
    pub fn board(&self) -> Board<'_> {
        Board::new(self.puzzle.grid(), &self.assignment)
    }

    /// Returns the current value of a cell, fixed or placed.
    #[must_use]
    pub fn value(&self, pos: Position) -> Option<i64> {
        self.board().value(pos)
    }

    /// Returns the bank index of the number placed at `slot`.
    #[must_use]
    pub fn placed_item(&self, slot: Position) -> Option<usize> {
        self.placed.get(&slot).copied()
    }

    /// Returns a report on the current values without recording it.
    ///
    /// Transitions are relative to the last recorded pass.
    #[must_use]
    pub fn report(&self) -> ValidationReport {
        validate(
            self.puzzle.equations(),
            &self.board(),
            self.puzzle.slots(),
            self.tracker.previous(),
        )
    }

    /// Returns `true` if the puzzle is solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.report().is_complete()
    }

    /// Places bank item `bank_index` into `slot`.
    ///
    /// A number already in the slot goes back to the bank first.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotASlot`] if `slot` is not a designated slot, and
    /// [`GameError::Bank`] if the bank item does not exist or is already placed. The game
    /// is unchanged on error.
    pub fn place(
        &mut self,
        slot: Position,
        bank_index: usize,
    ) -> Result<ValidationReport, GameError> {
        self.check_slot(slot)?;
        self.bank.check_take(bank_index)?;

        if let Some(previous) = self.placed.remove(&slot) {
            self.bank.release(previous)?;
        }
        let value = self.bank.take(bank_index)?;
        self.placed.insert(slot, bank_index);
        self.assignment.set(slot, value);
        debug!("placed {value} (bank item {bank_index}) at {slot}");

        Ok(self.validate())
    }

    /// Takes the number out of `slot` and returns it to the bank.
    ///
    /// Picking up from an empty slot changes nothing, but still runs a validation pass.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotASlot`] if `slot` is not a designated slot.
    pub fn pickup(&mut self, slot: Position) -> Result<ValidationReport, GameError> {
        self.check_slot(slot)?;
        if let Some(index) = self.placed.remove(&slot) {
            let value = self.bank.release(index)?;
            self.assignment.remove(slot);
            debug!("picked up {value} (bank item {index}) from {slot}");
        }
        Ok(self.validate())
    }

    /// Empties every slot, returns all numbers to the bank, and forgets equation states.
    pub fn reset(&mut self) {
        self.bank.reset();
        self.assignment.clear();
        self.placed.clear();
        self.tracker.reset();
        debug!("reset puzzle {:?}", self.puzzle.name());
    }

    /// Runs a validation pass and records its equation states.
    pub fn validate(&mut self) -> ValidationReport {
        let board = Board::new(self.puzzle.grid(), &self.assignment);
        self.tracker
            .validate(self.puzzle.equations(), &board, self.puzzle.slots())
    }

    fn check_slot(&self, pos: Position) -> Result<(), GameError> {
        if self.puzzle.solution(pos).is_none() {
            return Err(GameError::NotASlot(pos));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossmath_core::{EquationKey, Orientation};

    use super::*;
    use crate::{EquationState, PuzzleLibrary, TransitionKind};

    fn easy_game() -> Game {
        let library = PuzzleLibrary::builtin();
        Game::new(library.by_name("easy").expect("builtin level").1.clone())
    }

    fn place_value(game: &mut Game, slot: Position, value: i64) -> ValidationReport {
        let index = game.bank().find_unused(value).expect("value in bank");
        game.place(slot, index).expect("valid placement")
    }

    #[test]
    fn test_new_game_is_empty() {
        let game = easy_game();
        assert!(game.assignment().is_empty());
        assert_eq!(game.bank().unused().count(), 4);
        assert_eq!(game.value(Position::new(0, 0)), Some(1));
        assert_eq!(game.value(Position::new(0, 2)), None);
        assert!(!game.is_solved());
    }

    #[test]
    fn test_solving_easy_level() {
        let mut game = easy_game();
        place_value(&mut game, Position::new(0, 2), 3);
        place_value(&mut game, Position::new(2, 0), 2);
        place_value(&mut game, Position::new(2, 4), 6);
        let report = place_value(&mut game, Position::new(4, 2), 7);
        assert!(report.is_complete());
        assert!(game.is_solved());
        assert!(game.bank().is_exhausted());
    }

    #[test]
    fn test_place_into_filled_slot_returns_previous_number() {
        let mut game = easy_game();
        let slot = Position::new(0, 2);
        place_value(&mut game, slot, 7);
        let seven = game.placed_item(slot).expect("placed");

        place_value(&mut game, slot, 3);
        assert_eq!(game.value(slot), Some(3));
        assert!(!game.bank().get(seven).expect("item").is_used());
        assert_eq!(game.bank().unused().count(), 3);
    }

    #[test]
    fn test_place_rejects_used_item_and_non_slot() {
        let mut game = easy_game();
        game.place(Position::new(0, 2), 0).expect("valid placement");
        assert_eq!(
            game.place(Position::new(2, 0), 0).unwrap_err(),
            GameError::Bank(BankError::AlreadyUsed { index: 0 })
        );
        assert_eq!(
            game.place(Position::new(0, 0), 1).unwrap_err(),
            GameError::NotASlot(Position::new(0, 0))
        );
        assert_eq!(
            game.place(Position::new(2, 0), 9).unwrap_err(),
            GameError::Bank(BankError::UnknownItem { index: 9 })
        );
        assert_eq!(game.assignment().len(), 1);
    }

    #[test]
    fn test_replacing_with_the_same_item_is_rejected_without_change() {
        let mut game = easy_game();
        let slot = Position::new(0, 2);
        game.place(slot, 1).expect("valid placement");
        assert!(game.place(slot, 1).is_err());
        assert_eq!(game.placed_item(slot), Some(1));
        assert!(game.bank().get(1).expect("item").is_used());
    }

    #[test]
    fn test_pickup_reports_became_incomplete() {
        let mut game = easy_game();
        place_value(&mut game, Position::new(0, 2), 3);
        let report = game.pickup(Position::new(0, 2)).expect("valid pickup");
        let row0 = EquationKey::new(Orientation::Horizontal, Position::new(0, 0));
        assert_eq!(report.state(row0), Some(EquationState::Incomplete));
        assert!(
            report
                .transitions()
                .iter()
                .any(|t| t.key() == row0 && t.kind() == TransitionKind::BecameIncomplete)
        );
        assert_eq!(game.bank().unused().count(), 4);

        // Picking up again is a no-op pass.
        let again = game.pickup(Position::new(0, 2)).expect("valid pickup");
        assert!(again.transitions().is_empty());
    }

    #[test]
    fn test_wrong_then_right_reports_each_transition_once() {
        let mut game = easy_game();
        let row2 = EquationKey::new(Orientation::Horizontal, Position::new(2, 0));
        place_value(&mut game, Position::new(2, 0), 2);

        let wrong = place_value(&mut game, Position::new(2, 4), 7);
        let wrong_row2: Vec<_> = wrong
            .transitions()
            .iter()
            .filter(|t| t.key() == row2)
            .collect();
        assert_eq!(wrong_row2.len(), 1);
        assert_eq!(wrong_row2[0].kind(), TransitionKind::BecameIncorrect);

        // Revalidating without changes reports nothing.
        assert!(game.validate().transitions().is_empty());

        let right = place_value(&mut game, Position::new(2, 4), 6);
        assert_eq!(right.transitions().len(), 1);
        assert_eq!(right.transitions()[0].key(), row2);
        assert_eq!(right.transitions()[0].kind(), TransitionKind::BecameCorrect);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut game = easy_game();
        place_value(&mut game, Position::new(0, 2), 3);
        game.reset();
        assert!(game.assignment().is_empty());
        assert_eq!(game.bank().unused().count(), 4);
        assert_eq!(game.placed_item(Position::new(0, 2)), None);

        // States were forgotten, so the same placement reports the same transitions again.
        let report = place_value(&mut game, Position::new(0, 2), 3);
        assert!(!report.transitions().is_empty());
    }
}
