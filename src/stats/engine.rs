use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::error::{Error, Result};
use crate::models::{ContributionCalendar, ContributionDay, YearlyStatistics};
use crate::timezone::date_parts_in_zone;

#[derive(Debug, Clone, Copy)]
pub struct StatsOptions {
    pub year: i32,
    pub time_zone: Tz,
}

/// Tracks the longest run of consecutive days matching one predicate
/// (nonzero counts for streaks, zero counts for gaps). Replacement is
/// strictly-greater, so the earliest run wins ties.
#[derive(Debug, Default)]
struct RunTracker {
    best: u32,
    best_start: Option<NaiveDate>,
    best_end: Option<NaiveDate>,
    current: u32,
    current_start: Option<NaiveDate>,
    current_end: Option<NaiveDate>,
}

impl RunTracker {
    fn extend(&mut self, date: NaiveDate) {
        if self.current == 0 {
            self.current_start = Some(date);
        }
        self.current += 1;
        self.current_end = Some(date);
    }

    fn close(&mut self) {
        if self.current > self.best {
            self.best = self.current;
            self.best_start = self.current_start;
            self.best_end = self.current_end;
        }
        self.current = 0;
        self.current_start = None;
        self.current_end = None;
    }
}

/// Derives the full yearly statistics record from a contribution calendar.
///
/// Pure: does not mutate its input and is deterministic for a given
/// calendar/options pair. Fails only when the calendar violates its
/// structural invariant (contiguous, strictly ascending days).
///
/// Days from partial boundary weeks whose timezone-local year is not the
/// target year are excluded from totals, monthly/weekday buckets and the
/// daily average denominator, but still participate in streak/gap scanning
/// since they are chronologically contiguous with the in-year days.
pub fn derive_yearly_statistics(
    calendar: &ContributionCalendar,
    opts: &StatsOptions,
) -> Result<YearlyStatistics> {
    let days: Vec<&ContributionDay> = calendar
        .weeks
        .iter()
        .flat_map(|week| week.days.iter())
        .collect();

    validate_structure(calendar, &days)?;

    let mut total: u64 = 0;
    let mut monthly = [0u64; 12];
    let mut weekday = [0u64; 7];
    let mut in_year_days: u32 = 0;
    let mut max_day_count: u32 = 0;
    let mut max_day_date: Option<NaiveDate> = None;
    let mut streaks = RunTracker::default();
    let mut gaps = RunTracker::default();

    for day in &days {
        let parts = date_parts_in_zone(day.date, opts.time_zone);

        if parts.year == opts.year {
            in_year_days += 1;
            total += u64::from(day.count);
            monthly[(parts.month - 1) as usize] += u64::from(day.count);
            weekday[parts.weekday] += u64::from(day.count);

            if day.count > max_day_count {
                max_day_count = day.count;
                max_day_date = Some(day.date);
            }
        }

        if day.count > 0 {
            gaps.close();
            streaks.extend(day.date);
        } else {
            streaks.close();
            gaps.extend(day.date);
        }
    }

    streaks.close();
    gaps.close();

    let mut busiest_weekday = 0usize;
    for (idx, value) in weekday.iter().enumerate() {
        if *value > weekday[busiest_weekday] {
            busiest_weekday = idx;
        }
    }

    let mut max_month: Option<usize> = None;
    for (idx, value) in monthly.iter().enumerate() {
        if *value > 0 && max_month.map_or(true, |best| *value > monthly[best]) {
            max_month = Some(idx);
        }
    }

    let average = if in_year_days == 0 {
        0.0
    } else {
        round_to_two(total as f64 / f64::from(in_year_days))
    };

    Ok(YearlyStatistics {
        total_contributions: total,
        average_contributions_per_day: average,
        monthly_contributions: monthly,
        weekday_contributions: weekday,
        busiest_weekday,
        max_contributions_in_a_day: max_day_count,
        max_contributions_date: max_day_date,
        max_contributions_month: max_month.map(|idx| format!("{:04}-{:02}", opts.year, idx + 1)),
        longest_streak: streaks.best,
        longest_streak_start_date: streaks.best_start,
        longest_streak_end_date: streaks.best_end,
        longest_gap: gaps.best,
        longest_gap_start_date: gaps.best_start,
        longest_gap_end_date: gaps.best_end,
        heatmap_weeks: calendar.weeks.clone(),
    })
}

/// Fail-fast structural validation: weeks hold at most 7 days (exactly 7 for
/// interior weeks), and the flattened day sequence is strictly ascending with
/// no missing dates. The reported index is the flattened day position.
fn validate_structure(
    calendar: &ContributionCalendar,
    days: &[&ContributionDay],
) -> Result<()> {
    let week_count = calendar.weeks.len();
    let mut day_index = 0usize;

    for (week_index, week) in calendar.weeks.iter().enumerate() {
        let interior = week_index > 0 && week_index + 1 < week_count;

        if week.days.is_empty() {
            return Err(Error::MalformedCalendar {
                index: day_index,
                reason: format!("week {} has no days", week_index),
            });
        }
        if week.days.len() > 7 || (interior && week.days.len() != 7) {
            return Err(Error::MalformedCalendar {
                index: day_index,
                reason: format!("week {} has {} days", week_index, week.days.len()),
            });
        }

        day_index += week.days.len();
    }

    for (index, pair) in days.windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);

        if prev.date.succ_opt() != Some(next.date) {
            let reason = if next.date <= prev.date {
                format!("dates out of order ({} then {})", prev.date, next.date)
            } else {
                format!("missing days between {} and {}", prev.date, next.date)
            };
            return Err(Error::MalformedCalendar { index: index + 1, reason });
        }
    }

    Ok(())
}

/// Half-up rounding to two decimals, so snapshots are reproducible.
fn round_to_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
