// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Gameweek schedule resolution.
//!
//! The schedule is a hand-maintained list of gameweeks. Each entry carries:
//! - an informational start time
//! - a submission deadline
//! - a window close (end of the goal-tracking window)
//!
//! ## Invariants
//!
//! - All comparisons happen in the schedule's declared timezone
//! - Configured wall-clock times are localized with the zone's DST rules
//! - A gameweek's window opens when the previous entry's window closes
//! - The first entry opens a week before its start (season kick-off grace)
//! - A gameweek may appear more than once (postponed rounds); the entry with
//!   the latest deadline governs that gameweek's deadline

use crate::error::DomainError;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Timezone the schedule is authored in unless configured otherwise.
pub const DEFAULT_TIMEZONE: &str = "Europe/London";

/// Days before the first gameweek's start that submissions open.
pub const SEASON_OPENING_GRACE_DAYS: i64 = 7;

/// Minutes after a deadline that the picks summary goes out.
pub const SUMMARY_DELAY_MINUTES: i64 = 1;

/// A gameweek as written in configuration, in local wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDefinition {
    /// Gameweek ordinal.
    pub gameweek: u32,
    /// Informational start of the gameweek.
    pub starts: NaiveDateTime,
    /// Explicit window opening, replacing the previous entry's close.
    #[serde(default)]
    pub opens: Option<NaiveDateTime>,
    /// Submission deadline.
    pub deadline: NaiveDateTime,
    /// End of the goal-tracking window.
    pub closes: NaiveDateTime,
}

/// A localized gameweek.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    gameweek: u32,
    starts_at: DateTime<Tz>,
    opens_at: Option<DateTime<Tz>>,
    deadline: DateTime<Tz>,
    closes_at: DateTime<Tz>,
}

impl Period {
    /// Creates a period, checking that the deadline falls inside the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the gameweek is zero, the deadline is after the
    /// window close, or an explicit opening is after the deadline.
    pub fn new(
        gameweek: u32,
        starts_at: DateTime<Tz>,
        opens_at: Option<DateTime<Tz>>,
        deadline: DateTime<Tz>,
        closes_at: DateTime<Tz>,
    ) -> Result<Self, DomainError> {
        if gameweek == 0 {
            return Err(DomainError::InvalidGameweek(gameweek));
        }
        if closes_at < deadline {
            return Err(DomainError::InvalidPeriod {
                gameweek,
                reason: format!("window closes ({closes_at}) before the deadline ({deadline})"),
            });
        }
        if let Some(opens) = opens_at.filter(|opens| *opens > deadline) {
            return Err(DomainError::InvalidPeriod {
                gameweek,
                reason: format!("window opens ({opens}) after the deadline ({deadline})"),
            });
        }

        Ok(Self {
            gameweek,
            starts_at,
            opens_at,
            deadline,
            closes_at,
        })
    }

    /// Returns the gameweek ordinal.
    #[must_use]
    pub const fn gameweek(&self) -> u32 {
        self.gameweek
    }

    /// Returns the informational start time.
    #[must_use]
    pub const fn starts_at(&self) -> DateTime<Tz> {
        self.starts_at
    }

    /// Returns the explicit window opening, if one was configured.
    #[must_use]
    pub const fn opens_at(&self) -> Option<DateTime<Tz>> {
        self.opens_at
    }

    /// Returns the submission deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Tz> {
        self.deadline
    }

    /// Returns the end of the goal-tracking window.
    #[must_use]
    pub const fn closes_at(&self) -> DateTime<Tz> {
        self.closes_at
    }
}

/// The gameweek that is currently accepting picks or being scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePeriod {
    /// Gameweek ordinal.
    pub gameweek: u32,
    /// Governing submission deadline for the gameweek.
    pub deadline: DateTime<Tz>,
}

/// A fire-once summary job for a gameweek deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryJob {
    /// Gameweek the summary covers.
    pub gameweek: u32,
    /// When the summary should be sent.
    pub fire_at: DateTime<Utc>,
}

impl SummaryJob {
    /// Stable identifier for this job.
    #[must_use]
    pub fn job_id(&self) -> String {
        format!("gw_{}_summary", self.gameweek)
    }
}

/// The season schedule, injected at start-up and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    tz: Tz,
    periods: Vec<Period>,
}

impl Schedule {
    /// Builds a schedule from configured wall-clock definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone is unknown, a local time cannot be
    /// resolved unambiguously, or a period violates its invariants.
    pub fn new(timezone: &str, definitions: &[PeriodDefinition]) -> Result<Self, DomainError> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;

        let mut periods: Vec<Period> = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let opens_at: Option<DateTime<Tz>> = definition
                .opens
                .map(|opens| localize(tz, opens))
                .transpose()?;
            periods.push(Period::new(
                definition.gameweek,
                localize(tz, definition.starts)?,
                opens_at,
                localize(tz, definition.deadline)?,
                localize(tz, definition.closes)?,
            )?);
        }

        Ok(Self { tz, periods })
    }

    /// Builds a schedule from already-localized periods.
    #[must_use]
    pub const fn from_periods(tz: Tz, periods: Vec<Period>) -> Self {
        Self { tz, periods }
    }

    /// Returns the reference timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// Returns the periods in configured order.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Interprets a naive wall-clock time in the schedule's timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the local time falls in a DST gap or overlap.
    pub fn localize(&self, naive: NaiveDateTime) -> Result<DateTime<Tz>, DomainError> {
        localize(self.tz, naive)
    }

    /// Returns the gameweek whose window contains `now`.
    ///
    /// When no window contains `now` (pre-season, or a gap between
    /// windows) the earliest-listed gameweek with a future deadline is
    /// returned. `None` means the season is over.
    #[must_use]
    pub fn current_period(&self, now: DateTime<Utc>) -> Option<ActivePeriod> {
        let now: DateTime<Tz> = now.with_timezone(&self.tz);

        let in_window: Option<&Period> = self
            .periods
            .iter()
            .enumerate()
            .find(|(index, period)| {
                self.window_open(*index) <= now && now <= period.closes_at
            })
            .map(|(_, period)| period);

        let period: &Period =
            in_window.or_else(|| self.periods.iter().find(|period| now < period.deadline))?;

        self.deadline_for(period.gameweek)
            .map(|deadline| ActivePeriod {
                gameweek: period.gameweek,
                deadline,
            })
    }

    /// Returns the governing deadline for a gameweek.
    ///
    /// Rescheduled gameweeks are listed more than once; the latest deadline
    /// wins.
    #[must_use]
    pub fn deadline_for(&self, gameweek: u32) -> Option<DateTime<Tz>> {
        self.periods
            .iter()
            .filter(|period| period.gameweek == gameweek)
            .map(|period| period.deadline)
            .max()
    }

    /// Returns true if picks for `gameweek` are closed at `now`.
    ///
    /// Unknown gameweeks are always closed.
    #[must_use]
    pub fn deadline_passed(&self, gameweek: u32, now: DateTime<Utc>) -> bool {
        self.deadline_for(gameweek)
            .is_none_or(|deadline| now > deadline)
    }

    /// Renders an instant as `"Friday 15 August at 18:30"` in the schedule
    /// timezone.
    #[must_use]
    pub fn format_deadline<T: TimeZone>(&self, instant: &DateTime<T>) -> String {
        instant
            .with_timezone(&self.tz)
            .format("%A %d %B at %H:%M")
            .to_string()
    }

    /// Summary jobs for every gameweek whose deadline is still ahead.
    ///
    /// One job per gameweek, at the governing deadline plus
    /// [`SUMMARY_DELAY_MINUTES`], ordered by fire time.
    #[must_use]
    pub fn summary_jobs(&self, now: DateTime<Utc>) -> Vec<SummaryJob> {
        let mut gameweeks: Vec<u32> = self.periods.iter().map(Period::gameweek).collect();
        gameweeks.sort_unstable();
        gameweeks.dedup();

        let mut jobs: Vec<SummaryJob> = gameweeks
            .into_iter()
            .filter_map(|gameweek| {
                self.deadline_for(gameweek).map(|deadline| SummaryJob {
                    gameweek,
                    fire_at: deadline.with_timezone(&Utc)
                        + Duration::minutes(SUMMARY_DELAY_MINUTES),
                })
            })
            .filter(|job| job.fire_at > now)
            .collect();

        jobs.sort_by_key(|job| job.fire_at);
        jobs
    }

    /// Start of the submission window for the period at `index`.
    fn window_open(&self, index: usize) -> DateTime<Tz> {
        let period: &Period = &self.periods[index];
        if let Some(opens) = period.opens_at {
            return opens;
        }
        match index.checked_sub(1) {
            Some(previous) => self.periods[previous].closes_at,
            None => period.starts_at - Duration::days(SEASON_OPENING_GRACE_DAYS),
        }
    }
}

/// Localizes a naive wall-clock time, refusing DST gaps and overlaps.
fn localize(tz: Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>, DomainError> {
    tz.from_local_datetime(&naive)
        .single()
        .ok_or_else(|| DomainError::UnresolvableLocalTime {
            datetime: naive.to_string(),
            timezone: tz.name().to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_localize_applies_summer_time() {
        let tz: Tz = DEFAULT_TIMEZONE.parse().unwrap();
        let local: DateTime<Tz> = localize(tz, naive(2025, 8, 15, 18, 30)).unwrap();

        assert_eq!(
            local.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2025, 8, 15, 17, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_localize_applies_winter_time() {
        let tz: Tz = DEFAULT_TIMEZONE.parse().unwrap();
        let local: DateTime<Tz> = localize(tz, naive(2025, 11, 29, 13, 30)).unwrap();

        assert_eq!(
            local.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2025, 11, 29, 13, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_localize_rejects_dst_gap() {
        let tz: Tz = DEFAULT_TIMEZONE.parse().unwrap();
        let result = localize(tz, naive(2026, 3, 29, 1, 30));

        assert!(matches!(
            result,
            Err(DomainError::UnresolvableLocalTime { .. })
        ));
    }

    #[test]
    fn test_period_rejects_close_before_deadline() {
        let tz: Tz = DEFAULT_TIMEZONE.parse().unwrap();
        let result = Period::new(
            1,
            localize(tz, naive(2025, 8, 15, 0, 0)).unwrap(),
            None,
            localize(tz, naive(2025, 8, 15, 18, 30)).unwrap(),
            localize(tz, naive(2025, 8, 15, 12, 0)).unwrap(),
        );

        assert!(matches!(
            result,
            Err(DomainError::InvalidPeriod { gameweek: 1, .. })
        ));
    }

    #[test]
    fn test_period_rejects_zero_gameweek() {
        let tz: Tz = DEFAULT_TIMEZONE.parse().unwrap();
        let at: DateTime<Tz> = localize(tz, naive(2025, 8, 15, 18, 30)).unwrap();

        assert_eq!(
            Period::new(0, at, None, at, at),
            Err(DomainError::InvalidGameweek(0))
        );
    }

    #[test]
    fn test_summary_job_id() {
        let job: SummaryJob = SummaryJob {
            gameweek: 7,
            fire_at: Utc.with_ymd_and_hms(2025, 10, 3, 17, 31, 0).unwrap(),
        };

        assert_eq!(job.job_id(), "gw_7_summary");
    }
}
