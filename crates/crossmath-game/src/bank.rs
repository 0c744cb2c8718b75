//! The number bank.

/// A single number in the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankItem {
    value: i64,
    used: bool,
}

impl BankItem {
    /// Returns the number.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Returns `true` if the number currently sits in a slot.
    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used
    }
}

/// Errors raised by bank operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BankError {
    /// No bank item has this index.
    #[display("no bank item at index {index}")]
    UnknownItem {
        /// The requested index.
        index: usize,
    },
    /// The item is already placed in a slot.
    #[display("bank item {index} is already in use")]
    AlreadyUsed {
        /// The requested index.
        index: usize,
    },
    /// The item is not placed anywhere.
    #[display("bank item {index} is not in use")]
    NotUsed {
        /// The requested index.
        index: usize,
    },
}

/// The finite multiset of numbers available for placement.
///
/// Items are sorted in ascending order and addressed by index. Each item is either unused
/// or sitting in exactly one slot; [`Bank::take`] and [`Bank::release`] flip that flag in
/// lockstep with slot occupancy.
///
/// # Examples
///
/// ```
/// use crossmath_game::Bank;
///
/// let mut bank = Bank::new([7, 3, 6, 2]);
/// assert_eq!(bank.values().collect::<Vec<_>>(), vec![2, 3, 6, 7]);
///
/// assert_eq!(bank.take(1), Ok(3));
/// assert!(bank.take(1).is_err());
/// assert_eq!(bank.release(1), Ok(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    items: Vec<BankItem>,
}

impl Bank {
    /// Creates a bank with all items unused.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        let mut items: Vec<BankItem> = values
            .into_iter()
            .map(|value| BankItem { value, used: false })
            .collect();
        items.sort_by_key(|item| item.value);
        Self { items }
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the bank has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BankItem> {
        self.items.get(index)
    }

    /// Returns the items in ascending order.
    #[must_use]
    pub fn items(&self) -> &[BankItem] {
        &self.items
    }

    /// Returns every value in ascending order, used or not.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.items.iter().map(BankItem::value)
    }

    /// Returns `(index, value)` for every unused item.
    pub fn unused(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.used)
            .map(|(index, item)| (index, item.value))
    }

    /// Returns the index of the first unused item holding `value`.
    #[must_use]
    pub fn find_unused(&self, value: i64) -> Option<usize> {
        self.unused()
            .find(|(_, v)| *v == value)
            .map(|(index, _)| index)
    }

    /// Returns `true` if every item is in use.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.items.iter().all(|item| item.used)
    }

    /// Marks an unused item as used and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::UnknownItem`] for an out-of-range index and
    /// [`BankError::AlreadyUsed`] if the item is already placed.
    pub fn take(&mut self, index: usize) -> Result<i64, BankError> {
        self.check_take(index)?;
        let item = &mut self.items[index];
        item.used = true;
        Ok(item.value)
    }

    /// Checks whether [`Bank::take`] would succeed, without changing anything.
    ///
    /// # Errors
    ///
    /// Same as [`Bank::take`].
    pub fn check_take(&self, index: usize) -> Result<i64, BankError> {
        let item = self.get(index).ok_or(BankError::UnknownItem { index })?;
        if item.used {
            return Err(BankError::AlreadyUsed { index });
        }
        Ok(item.value)
    }

    /// Returns a used item to the bank and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::UnknownItem`] for an out-of-range index and
    /// [`BankError::NotUsed`] if the item is not placed.
    pub fn release(&mut self, index: usize) -> Result<i64, BankError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(BankError::UnknownItem { index })?;
        if !item.used {
            return Err(BankError::NotUsed { index });
        }
        item.used = false;
        Ok(item.value)
    }

    /// Marks every item as unused.
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.used = false;
        }
    }
}
