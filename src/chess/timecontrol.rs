use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use thiserror::Error;

/// Nominal game length used to weigh the increment.
const ESTIMATED_MOVES: u64 = 40;

static INITIAL_PLUS_INCREMENT_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^(\d+)\+(\d+)$").expect("valid initial+increment regex")
});

/// Speed category, ordered from fastest to slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TimeControlType {
    UltraBullet,
    HyperBullet,
    Bullet,
    Blitz,
    Rapid,
    Classic,
}

impl TimeControlType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UltraBullet => "UltraBullet",
            Self::HyperBullet => "HyperBullet",
            Self::Bullet => "Bullet",
            Self::Blitz => "Blitz",
            Self::Rapid => "Rapid",
            Self::Classic => "Classic",
        }
    }
}

impl fmt::Display for TimeControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("threshold table is empty")]
    Empty,
    #[error("only the last threshold may be unbounded ({0} is not last)")]
    UnboundedNotLast(TimeControlType),
    #[error("last threshold ({0}) must be unbounded")]
    LastBounded(TimeControlType),
    #[error("threshold bounds must be strictly increasing ({category} <= {bound}s)")]
    NotIncreasing {
        category: TimeControlType,
        bound: u64,
    },
}

/// Ordered `(category, inclusive upper bound in seconds)` table. The last entry
/// has no bound, so every estimate lands somewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedThresholds {
    entries: Vec<(TimeControlType, Option<u64>)>,
}

impl SpeedThresholds {
    pub fn new(entries: Vec<(TimeControlType, Option<u64>)>) -> Result<Self, ThresholdError> {
        let Some((&(last_category, last_bound), rest)) = entries.split_last() else {
            return Err(ThresholdError::Empty);
        };
        if last_bound.is_some() {
            return Err(ThresholdError::LastBounded(last_category));
        }

        let mut previous: Option<u64> = None;
        for &(category, bound) in rest {
            let Some(bound) = bound else {
                return Err(ThresholdError::UnboundedNotLast(category));
            };
            if previous.is_some_and(|p| bound <= p) {
                return Err(ThresholdError::NotIncreasing { category, bound });
            }
            previous = Some(bound);
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(TimeControlType, Option<u64>)] {
        &self.entries
    }

    /// First category whose bound is >= `estimated_seconds`.
    pub fn classify_seconds(&self, estimated_seconds: u64) -> TimeControlType {
        self.entries
            .iter()
            .find(|(_, bound)| bound.is_none_or(|b| b >= estimated_seconds))
            .map(|&(category, _)| category)
            // Unreachable: `new` guarantees an unbounded last entry.
            .unwrap_or(TimeControlType::Classic)
    }

    pub fn classify(&self, time_control: &TimeControl) -> TimeControlType {
        self.classify_seconds(time_control.estimated_seconds())
    }
}

impl Default for SpeedThresholds {
    fn default() -> Self {
        Self {
            entries: vec![
                (TimeControlType::UltraBullet, Some(29)),
                (TimeControlType::HyperBullet, Some(59)),
                (TimeControlType::Bullet, Some(179)),
                (TimeControlType::Blitz, Some(599)),
                (TimeControlType::Rapid, Some(1799)),
                (TimeControlType::Classic, None),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeControlParseError {
    pub raw: String,
}

impl fmt::Display for TimeControlParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected 'initialSeconds+incrementSeconds', got '{}'",
            self.raw
        )
    }
}

impl std::error::Error for TimeControlParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeControl {
    pub initial_seconds: u32,
    pub increment_seconds: u32,
}

impl TimeControl {
    pub fn parse(raw: &str) -> Result<Self, TimeControlParseError> {
        let error = || TimeControlParseError {
            raw: raw.to_string(),
        };

        let caps = INITIAL_PLUS_INCREMENT_RE
            .captures(raw.trim())
            .ok_or_else(error)?;
        let initial_seconds = caps[1].parse::<u32>().map_err(|_| error())?;
        let increment_seconds = caps[2].parse::<u32>().map_err(|_| error())?;

        Ok(Self {
            initial_seconds,
            increment_seconds,
        })
    }

    pub fn estimated_seconds(&self) -> u64 {
        self.initial_seconds as u64 + ESTIMATED_MOVES * self.increment_seconds as u64
    }

    /// Minutes plus increment, e.g. "3+2", "½+0", "¼+0".
    pub fn display_notation(&self) -> String {
        let minutes = match self.initial_seconds {
            s if s >= 60 => (s / 60).to_string(),
            30 => "½".to_string(),
            15 => "¼".to_string(),
            _ => "0".to_string(),
        };
        format!("{}+{}", minutes, self.increment_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tc(initial_seconds: u32, increment_seconds: u32) -> TimeControl {
        TimeControl {
            initial_seconds,
            increment_seconds,
        }
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(TimeControl::parse("180+2").unwrap(), tc(180, 2));
        assert_eq!(TimeControl::parse(" 600+0 ").unwrap(), tc(600, 0));
        assert_eq!(TimeControl::parse("0180+2").unwrap(), tc(180, 2));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["abc", "180", "-", "180+", "+2", "3.5+2", "180+2+1", "1e3+0", "600 + 0", "600+ 0", ""] {
            let err = TimeControl::parse(raw).unwrap_err();
            assert_eq!(err.raw, raw);
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(TimeControl::parse("99999999999+0").is_err());
    }

    #[test]
    fn test_display_notation() {
        assert_eq!(tc(180, 2).display_notation(), "3+2");
        assert_eq!(tc(30, 0).display_notation(), "½+0");
        assert_eq!(tc(15, 0).display_notation(), "¼+0");
        assert_eq!(tc(30, 1).display_notation(), "½+1");
        assert_eq!(tc(45, 0).display_notation(), "0+0");
        assert_eq!(tc(90, 0).display_notation(), "1+0");
        assert_eq!(tc(60, 0).display_notation(), "1+0");
    }

    #[test]
    fn test_category_threshold_boundaries() {
        let thresholds = SpeedThresholds::default();
        assert_eq!(thresholds.classify_seconds(0), TimeControlType::UltraBullet);
        assert_eq!(thresholds.classify_seconds(29), TimeControlType::UltraBullet);
        assert_eq!(thresholds.classify_seconds(30), TimeControlType::HyperBullet);
        assert_eq!(thresholds.classify_seconds(59), TimeControlType::HyperBullet);
        assert_eq!(thresholds.classify_seconds(60), TimeControlType::Bullet);
        assert_eq!(thresholds.classify_seconds(179), TimeControlType::Bullet);
        assert_eq!(thresholds.classify_seconds(180), TimeControlType::Blitz);
        assert_eq!(thresholds.classify_seconds(599), TimeControlType::Blitz);
        assert_eq!(thresholds.classify_seconds(600), TimeControlType::Rapid);
        assert_eq!(thresholds.classify_seconds(1799), TimeControlType::Rapid);
        assert_eq!(thresholds.classify_seconds(1800), TimeControlType::Classic);
        assert_eq!(thresholds.classify_seconds(u64::MAX), TimeControlType::Classic);
    }

    #[test]
    fn test_category_increment_driven_case() {
        let thresholds = SpeedThresholds::default();
        // 120 + 40 * 12 = 600
        assert_eq!(thresholds.classify(&tc(120, 12)), TimeControlType::Rapid);
        // 0 + 40 * 1 = 40
        assert_eq!(thresholds.classify(&tc(0, 1)), TimeControlType::HyperBullet);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = SpeedThresholds::new(vec![
            (TimeControlType::Blitz, Some(300)),
            (TimeControlType::Classic, None),
        ])
        .unwrap();
        assert_eq!(thresholds.classify_seconds(300), TimeControlType::Blitz);
        assert_eq!(thresholds.classify_seconds(301), TimeControlType::Classic);
    }

    #[test]
    fn test_threshold_table_validation() {
        assert_eq!(SpeedThresholds::new(vec![]), Err(ThresholdError::Empty));
        assert_eq!(
            SpeedThresholds::new(vec![(TimeControlType::Blitz, Some(10))]),
            Err(ThresholdError::LastBounded(TimeControlType::Blitz))
        );
        assert_eq!(
            SpeedThresholds::new(vec![
                (TimeControlType::Blitz, None),
                (TimeControlType::Classic, None),
            ]),
            Err(ThresholdError::UnboundedNotLast(TimeControlType::Blitz))
        );
        assert_eq!(
            SpeedThresholds::new(vec![
                (TimeControlType::Bullet, Some(100)),
                (TimeControlType::Blitz, Some(100)),
                (TimeControlType::Classic, None),
            ]),
            Err(ThresholdError::NotIncreasing {
                category: TimeControlType::Blitz,
                bound: 100,
            })
        );
    }

    #[test]
    fn test_default_table_passes_validation() {
        let default = SpeedThresholds::default();
        let rebuilt = SpeedThresholds::new(default.entries().to_vec()).unwrap();
        assert_eq!(default, rebuilt);
    }

    proptest! {
        #[test]
        fn prop_classification_is_monotonic(a in 0u64..10_000, b in 0u64..10_000) {
            let thresholds = SpeedThresholds::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(thresholds.classify_seconds(lo) <= thresholds.classify_seconds(hi));
        }
    }
}
