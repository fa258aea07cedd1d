use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};

use super::error::ApiError;

/// Lichess game speeds and variants accepted by the `perfType` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerfType {
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    Classical,
    Correspondence,
    Chess960,
    Crazyhouse,
    Antichess,
    Atomic,
    Horde,
    KingOfTheHill,
    RacingKings,
    ThreeCheck,
}

impl PerfType {
    pub const ALL: [PerfType; 14] = [
        Self::UltraBullet,
        Self::Bullet,
        Self::Blitz,
        Self::Rapid,
        Self::Classical,
        Self::Correspondence,
        Self::Chess960,
        Self::Crazyhouse,
        Self::Antichess,
        Self::Atomic,
        Self::Horde,
        Self::KingOfTheHill,
        Self::RacingKings,
        Self::ThreeCheck,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UltraBullet => "ultraBullet",
            Self::Bullet => "bullet",
            Self::Blitz => "blitz",
            Self::Rapid => "rapid",
            Self::Classical => "classical",
            Self::Correspondence => "correspondence",
            Self::Chess960 => "chess960",
            Self::Crazyhouse => "crazyhouse",
            Self::Antichess => "antichess",
            Self::Atomic => "atomic",
            Self::Horde => "horde",
            Self::KingOfTheHill => "kingOfTheHill",
            Self::RacingKings => "racingKings",
            Self::ThreeCheck => "threeCheck",
        }
    }

    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Parses a comma-separated list; blank input means "all types".
    pub fn parse_list(raw: &str) -> Result<Vec<PerfType>, ApiError> {
        let mut perf_types: Vec<PerfType> = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let perf_type: PerfType = part.parse()?;
            if !perf_types.contains(&perf_type) {
                perf_types.push(perf_type);
            }
        }
        Ok(perf_types)
    }
}

impl FromStr for PerfType {
    type Err = ApiError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == raw.trim())
            .ok_or_else(|| ApiError::InvalidPerfType {
                value: raw.trim().to_string(),
                valid: Self::valid_values(),
            })
    }
}

impl fmt::Display for PerfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive calendar-day range, as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub since_ms: i64,
    pub until_ms: i64,
}

const DATE_FORMAT: &str = "%Y-%m-%d";

impl DateRange {
    /// `start` at 00:00:00.000 UTC through `end` at 23:59:59.999 UTC.
    pub fn from_days(start: &str, end: &str) -> Result<Self, ApiError> {
        let parse = |raw: &str| {
            NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| ApiError::InvalidDate {
                value: raw.to_string(),
                reason: e.to_string(),
            })
        };
        let start_day = parse(start)?;
        let end_day = parse(end)?;
        if start_day > end_day {
            return Err(ApiError::InvertedDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let since_ms = start_day
            .and_time(NaiveTime::default())
            .and_utc()
            .timestamp_millis();
        let until_ms = end_day
            .and_hms_milli_opt(23, 59, 59, 999)
            .map(|dt| dt.and_utc().timestamp_millis())
            .ok_or_else(|| ApiError::InvalidDate {
                value: end.to_string(),
                reason: "end of day out of range".to_string(),
            })?;

        Ok(Self { since_ms, until_ms })
    }
}

/// Query parameters of the user games export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportParams {
    pub max: Option<u32>,
    /// `None` exports rated and casual games.
    pub rated: Option<bool>,
    pub perf_types: Vec<PerfType>,
    pub range: Option<DateRange>,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            max: None,
            rated: Some(true),
            perf_types: Vec::new(),
            range: None,
        }
    }
}

impl ExportParams {
    /// Query pairs in a stable order. Moves are never requested; opening
    /// names and the full tag set always are.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("moves", "false".to_string()),
            ("tags", "true".to_string()),
            ("opening", "true".to_string()),
        ];
        if let Some(max) = self.max {
            query.push(("max", max.to_string()));
        }
        if let Some(rated) = self.rated {
            query.push(("rated", rated.to_string()));
        }
        if !self.perf_types.is_empty() {
            let joined = self
                .perf_types
                .iter()
                .map(|p| p.as_str())
                .collect::<Vec<_>>()
                .join(",");
            query.push(("perfType", joined));
        }
        if let Some(range) = self.range {
            query.push(("since", range.since_ms.to_string()));
            query.push(("until", range.until_ms.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_perf_type_list() {
        let perf_types = PerfType::parse_list("blitz, rapid,blitz").unwrap();
        assert_eq!(perf_types, vec![PerfType::Blitz, PerfType::Rapid]);
        assert!(PerfType::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_perf_type_is_case_sensitive_like_api() {
        assert_eq!("ultraBullet".parse::<PerfType>().unwrap(), PerfType::UltraBullet);
        assert!("UltraBullet".parse::<PerfType>().is_err());
    }

    #[test]
    fn test_invalid_perf_type_lists_valid_values() {
        let err = PerfType::parse_list("blitz,hyper").unwrap_err().to_string();
        assert!(err.contains("'hyper'"));
        assert!(err.contains("ultraBullet"));
        assert!(err.contains("threeCheck"));
    }

    #[test]
    fn test_date_range_covers_whole_days() {
        let range = DateRange::from_days("2024-01-01", "2024-01-01").unwrap();
        assert_eq!(range.since_ms, 1_704_067_200_000);
        assert_eq!(range.until_ms, 1_704_067_200_000 + 86_400_000 - 1);
    }

    #[test]
    fn test_date_range_rejects_bad_input() {
        assert!(matches!(
            DateRange::from_days("2024.01.01", "2024-01-02"),
            Err(ApiError::InvalidDate { .. })
        ));
        assert!(matches!(
            DateRange::from_days("2024-02-01", "2024-01-01"),
            Err(ApiError::InvertedDateRange { .. })
        ));
    }

    #[test]
    fn test_query_pairs() {
        let params = ExportParams {
            max: Some(10),
            rated: Some(true),
            perf_types: vec![PerfType::Blitz, PerfType::Bullet],
            range: Some(DateRange {
                since_ms: 1,
                until_ms: 2,
            }),
        };
        let query = params.query();
        assert!(query.contains(&("moves", "false".to_string())));
        assert!(query.contains(&("opening", "true".to_string())));
        assert!(query.contains(&("max", "10".to_string())));
        assert!(query.contains(&("perfType", "blitz,bullet".to_string())));
        assert!(query.contains(&("since", "1".to_string())));
        assert!(query.contains(&("until", "2".to_string())));
    }

    #[test]
    fn test_query_omits_unset_filters() {
        let params = ExportParams {
            rated: None,
            ..ExportParams::default()
        };
        let keys: Vec<_> = params.query().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["moves", "tags", "opening"]);
    }
}
