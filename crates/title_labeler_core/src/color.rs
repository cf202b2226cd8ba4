//! Random label colours.

use std::fmt;

use rand::Rng;

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// A label colour made of six uppercase hexadecimal digits.
///
/// `Display` renders the `#RRGGBB` form; [`LabelColor::hex`] gives the bare digits that the
/// GitHub API expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelColor(String);

impl LabelColor {
    /// Draws each digit independently and uniformly from `0-9A-F` using the thread RNG.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Draws a colour from the supplied random number generator.
    pub fn random_with<R: Rng>(rng: &mut R) -> Self {
        let digits = (0..6)
            .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
            .collect();
        Self(digits)
    }

    /// The six digits without a leading `#`.
    pub fn hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
