//! How many game iterations run on each day of the week.

use chrono::Weekday;
use serde::Deserialize;

/// Iterations per day, Monday first.
///
/// Indexing goes through [`Weekday::num_days_from_monday`], so Monday is
/// always slot 0 and Sunday slot 6 regardless of platform conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<u32>")]
pub struct RunTable([u32; 7]);

impl RunTable {
  /// One game a day, two on Friday, none on Saturday.
  pub const DEFAULT: RunTable = RunTable::new([1, 1, 1, 1, 2, 0, 1]);

  pub const fn new(runs: [u32; 7]) -> Self {
    Self(runs)
  }

  pub fn runs_on(&self, day: Weekday) -> u32 {
    self.0[day.num_days_from_monday() as usize]
  }
}

impl Default for RunTable {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl TryFrom<Vec<u32>> for RunTable {
  type Error = String;

  fn try_from(runs: Vec<u32>) -> Result<Self, Self::Error> {
    let len = runs.len();
    let runs: [u32; 7] = runs
      .try_into()
      .map_err(|_| format!("schedule needs exactly 7 entries (Monday first), got {}", len))?;
    Ok(Self(runs))
  }
}

/// Parse a weekday from a command-line argument ("mon", "Friday", ...).
pub fn parse_weekday(input: &str) -> Result<Weekday, String> {
  input
    .trim()
    .parse::<Weekday>()
    .map_err(|_| format!("unknown weekday '{}'", input))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_monday_is_slot_zero() {
    let table = RunTable::new([7, 0, 0, 0, 0, 0, 9]);
    assert_eq!(table.runs_on(Weekday::Mon), 7);
    assert_eq!(table.runs_on(Weekday::Sun), 9);
  }

  #[test]
  fn test_default_table() {
    let table = RunTable::default();
    assert_eq!(table.runs_on(Weekday::Thu), 1);
    assert_eq!(table.runs_on(Weekday::Fri), 2);
    assert_eq!(table.runs_on(Weekday::Sat), 0);
    assert_eq!(table.runs_on(Weekday::Sun), 1);
  }

  #[test]
  fn test_wrong_length_rejected() {
    assert!(RunTable::try_from(vec![1, 2, 3]).is_err());
    assert!(RunTable::try_from(vec![0; 8]).is_err());
    assert!(RunTable::try_from(vec![0; 7]).is_ok());
  }

  #[test]
  fn test_parse_weekday() {
    assert_eq!(parse_weekday("fri"), Ok(Weekday::Fri));
    assert_eq!(parse_weekday("Saturday"), Ok(Weekday::Sat));
    assert!(parse_weekday("someday").is_err());
  }
}
