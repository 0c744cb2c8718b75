//! Ordered level packs.

use std::{slice, sync::OnceLock};

use log::debug;

use crate::{Puzzle, PuzzleDefinition, PuzzleError};

const BUILTIN_LEVELS: &str = include_str!("../levels/builtin.json");

/// Errors raised while loading or querying a level pack.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LibraryError {
    /// The level pack is not valid JSON.
    #[display("invalid level pack: {_0}")]
    Json(serde_json::Error),
    /// A level definition is invalid.
    #[display("level {index}: {source}")]
    #[from(ignore)]
    Puzzle {
        /// Index of the level in the pack.
        index: usize,
        /// What is wrong with it.
        source: PuzzleError,
    },
    /// The level pack contains no levels.
    #[display("level pack contains no levels")]
    Empty,
    /// No level matches the request.
    #[display("level not found: {level}")]
    #[from(ignore)]
    LevelNotFound {
        /// The requested index or name.
        level: String,
    },
}

/// An ordered, non-empty list of puzzles.
///
/// # Examples
///
/// ```
/// use crossmath_game::PuzzleLibrary;
///
/// let library = PuzzleLibrary::builtin();
/// let (index, hard) = library.by_name("hard")?;
/// assert_eq!(index, 2);
/// assert!(hard.verify_solution().is_complete());
///
/// // The level after the last one is the first.
/// assert_eq!(library.next_index(library.len() - 1), 0);
/// # Ok::<(), crossmath_game::LibraryError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleLibrary {
    levels: Vec<Puzzle>,
}

impl PuzzleLibrary {
    /// Returns the definitions of the built-in levels: easy, medium, hard, and expert.
    ///
    /// # Panics
    ///
    /// Panics if the bundled level pack does not parse.
    #[must_use]
    pub fn builtin_definitions() -> &'static [PuzzleDefinition] {
        static DEFINITIONS: OnceLock<Vec<PuzzleDefinition>> = OnceLock::new();
        DEFINITIONS.get_or_init(|| {
            serde_json::from_str(BUILTIN_LEVELS).expect("built-in level pack is valid JSON")
        })
    }

    /// Returns the built-in levels.
    ///
    /// # Panics
    ///
    /// Panics if a bundled level is invalid.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_definitions(Self::builtin_definitions())
            .expect("built-in level pack is valid")
    }

    /// Builds a library from level definitions, in order.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Puzzle`] for the first invalid definition and
    /// [`LibraryError::Empty`] if there are no definitions.
    pub fn from_definitions<'a>(
        definitions: impl IntoIterator<Item = &'a PuzzleDefinition>,
    ) -> Result<Self, LibraryError> {
        let levels = definitions
            .into_iter()
            .enumerate()
            .map(|(index, definition)| {
                Puzzle::from_definition(definition)
                    .map_err(|source| LibraryError::Puzzle { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if levels.is_empty() {
            return Err(LibraryError::Empty);
        }
        debug!("loaded {} levels", levels.len());
        Ok(Self { levels })
    }

    /// Loads a level pack: a JSON array of [`PuzzleDefinition`]s.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::Json`] for malformed JSON, otherwise as
    /// [`PuzzleLibrary::from_definitions`].
    pub fn from_json(json: &str) -> Result<Self, LibraryError> {
        let definitions: Vec<PuzzleDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(&definitions)
    }

    /// Returns the number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; a library holds at least one level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the level at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::LevelNotFound`] if `index` is out of range.
    pub fn level(&self, index: usize) -> Result<&Puzzle, LibraryError> {
        self.levels
            .get(index)
            .ok_or_else(|| LibraryError::LevelNotFound {
                level: index.to_string(),
            })
    }

    /// Returns the first level named `name` (ASCII case-insensitive) with its index.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::LevelNotFound`] if no level has that name.
    pub fn by_name(&self, name: &str) -> Result<(usize, &Puzzle), LibraryError> {
        self.levels
            .iter()
            .enumerate()
            .find(|(_, puzzle)| puzzle.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| LibraryError::LevelNotFound {
                level: name.to_owned(),
            })
    }

    /// Looks a level up by zero-based index or, failing that, by name.
    ///
    /// # Errors
    ///
    /// Returns [`LibraryError::LevelNotFound`] if neither matches.
    pub fn resolve(&self, level: &str) -> Result<(usize, &Puzzle), LibraryError> {
        if let Ok(index) = level.parse::<usize>() {
            return self.level(index).map(|puzzle| (index, puzzle));
        }
        self.by_name(level)
    }

    /// Returns the index of the level after `index`, wrapping to the first.
    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.levels.len()
    }

    /// Iterates over the levels in order.
    pub fn iter(&self) -> slice::Iter<'_, Puzzle> {
        self.levels.iter()
    }
}

impl<'a> IntoIterator for &'a PuzzleLibrary {
    type Item = &'a Puzzle;
    type IntoIter = slice::Iter<'a, Puzzle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
