use serde::{Deserialize, Serialize};

/// A (short, long) pair of EMA periods.
///
/// Invalid pairs (`short >= long`) are representable because seeding and
/// perturbation can produce them; the optimizer filters them out before
/// scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodPair {
    pub short: u32,
    pub long: u32,
}

impl PeriodPair {
    pub const fn new(short: u32, long: u32) -> Self {
        Self { short, long }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.short < self.long
    }

    /// `short / long` as a decimal. Total for valid pairs since `long > short >= 0`.
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.short as f64 / self.long as f64
    }

    /// Hover label for charts, e.g. `9/21`.
    pub fn label(&self) -> String {
        format!("{}/{}", self.short, self.long)
    }
}

impl From<(u32, u32)> for PeriodPair {
    fn from((short, long): (u32, u32)) -> Self {
        Self::new(short, long)
    }
}

impl std::fmt::Display for PeriodPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.short, self.long)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_requires_strictly_shorter_short_period() {
        assert!(PeriodPair::new(9, 21).is_valid());
        assert!(!PeriodPair::new(21, 21).is_valid());
        assert!(!PeriodPair::new(30, 20).is_valid());
    }

    #[test]
    fn label_and_display() {
        let pair = PeriodPair::from((12, 26));
        assert_eq!(pair.label(), "12/26");
        assert_eq!(pair.to_string(), "(12, 26)");
    }
}
