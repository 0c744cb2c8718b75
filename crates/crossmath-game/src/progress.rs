use serde::{Deserialize, Serialize};

/// How far the player has got through a level pack.
///
/// Only the furthest level reached is kept. Levels up to and including it are unlocked.
///
/// # Examples
///
/// ```
/// use crossmath_game::Progress;
///
/// let mut progress = Progress::new();
/// assert!(progress.is_unlocked(0));
/// assert!(!progress.is_unlocked(1));
///
/// assert!(progress.record_solved(0));
/// assert!(progress.is_furthest(1));
///
/// // Replaying an earlier level does not move the marker.
/// assert!(!progress.record_solved(0));
/// assert_eq!(progress.furthest(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    furthest_level: usize,
}

impl Progress {
    /// Creates progress with only the first level unlocked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the furthest level reached.
    #[must_use]
    pub fn furthest(&self) -> usize {
        self.furthest_level
    }

    /// Records that level `index` was solved, unlocking the next one.
    ///
    /// Returns `true` if this moved the furthest level forward.
    pub fn record_solved(&mut self, index: usize) -> bool {
        let next = index.saturating_add(1);
        if next <= self.furthest_level {
            return false;
        }
        self.furthest_level = next;
        true
    }

    /// Returns `true` if `index` is the furthest level reached.
    #[must_use]
    pub fn is_furthest(&self, index: usize) -> bool {
        index == self.furthest_level
    }

    /// Returns `true` if level `index` may be played.
    #[must_use]
    pub fn is_unlocked(&self, index: usize) -> bool {
        index <= self.furthest_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_solved_moves_forward_only() {
        let mut progress = Progress::new();
        assert!(progress.record_solved(2));
        assert_eq!(progress.furthest(), 3);
        assert!(progress.is_unlocked(1));
        assert!(progress.is_unlocked(3));
        assert!(!progress.is_unlocked(4));
        assert!(!progress.record_solved(1));
        assert!(progress.is_furthest(3));
    }

    #[test]
    fn test_serde_shape() {
        let mut progress = Progress::new();
        progress.record_solved(0);
        let json = serde_json::to_string(&progress).expect("serializable");
        assert_eq!(json, r#"{"furthestLevel":1}"#);
        let loaded: Progress = serde_json::from_str(&json).expect("valid json");
        assert_eq!(loaded, progress);
    }
}
