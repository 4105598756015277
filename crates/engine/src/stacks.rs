use std::fmt;

/// Number of items in one full stack of a stackable material.
pub const BUNDLE_SIZE: i64 = 64;

/// An item count split into whole stacks plus a remainder.
///
/// `Display` renders `"<stacks>s"` when the remainder is zero and
/// `"<stacks>s <remainder>i"` otherwise.
///
/// # Examples
///
/// ```rust
/// use engine::Stacks;
///
/// assert_eq!(Stacks::from_items(0).to_string(), "0s");
/// assert_eq!(Stacks::from_items(128).to_string(), "2s");
/// assert_eq!(Stacks::from_items(100).to_string(), "1s 36i");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stacks {
    stacks: i64,
    remainder: i64,
}

impl Stacks {
    /// Splits a non-negative item count. Negative input is treated as 0.
    #[must_use]
    pub const fn from_items(amount: i64) -> Self {
        let amount = if amount < 0 { 0 } else { amount };
        Self {
            stacks: amount / BUNDLE_SIZE,
            remainder: amount % BUNDLE_SIZE,
        }
    }

    /// Whole stacks.
    #[must_use]
    pub const fn stacks(self) -> i64 {
        self.stacks
    }

    /// Items left over after the whole stacks.
    #[must_use]
    pub const fn remainder(self) -> i64 {
        self.remainder
    }

    /// Total item count.
    #[must_use]
    pub const fn items(self) -> i64 {
        self.stacks * BUNDLE_SIZE + self.remainder
    }
}

impl fmt::Display for Stacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.remainder > 0 {
            write!(f, "{}s {}i", self.stacks, self.remainder)
        } else {
            write!(f, "{}s", self.stacks)
        }
    }
}

impl From<i64> for Stacks {
    fn from(value: i64) -> Self {
        Self::from_items(value)
    }
}

/// Formats an item count as stacks, e.g. `format_stacks(70) == "1s 6i"`.
#[must_use]
pub fn format_stacks(amount: i64) -> String {
    Stacks::from_items(amount).to_string()
}
