use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::holiday::StrategyType;
use crate::services::date_utils;
use crate::services::holiday_index::HolidayIndex;
use crate::services::holiday_optimizer::Candidate;

// Per-day concentration of free days, scanned over the whole year once per
// run. Only the extended strategy asks for it.
pub type DensityMap = BTreeMap<NaiveDate, i64>;

const DENSITY_SCAN_RADIUS: i64 = 7;

pub trait StrategyProfile {
    fn strategy_type(&self) -> StrategyType;

    // Window lengths grouped into ordered passes; a pass is fully generated,
    // scored and consumed before the next one starts.
    fn length_passes(&self) -> &'static [&'static [i64]];

    fn min_total_personal_days(&self) -> i64 {
        0
    }

    fn is_valid_start(&self, _date: NaiveDate, _length: i64, _pass: usize) -> bool {
        true
    }

    fn is_valid_end(&self, _date: NaiveDate, _length: i64, _pass: usize) -> bool {
        true
    }

    fn min_weekend_days(&self, length: i64, pass: usize) -> i64;

    fn personal_days_valid(
        &self,
        personal_days: i64,
        remaining_budget: i64,
        length: i64,
        pass: usize,
    ) -> bool;

    // Structural filter applied after classification, before scoring.
    fn accepts(&self, _candidate: &Candidate, _pass: usize) -> bool {
        true
    }

    fn precompute(&self, _year: i32, _index: &HolidayIndex) -> Option<DensityMap> {
        None
    }

    fn score(&self, candidate: &Candidate, pass: usize) -> f64;

    fn describe(&self, candidate: &Candidate) -> String;
}

pub fn profile_for(strategy: StrategyType) -> &'static dyn StrategyProfile {
    match strategy {
        StrategyType::LongWeekend => &LongWeekendStrategy,
        StrategyType::MidWeek => &MidWeekStrategy,
        StrategyType::Week => &WeekStrategy,
        StrategyType::Extended => &ExtendedStrategy,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Season {
    Summer,
    Winter,
    OffSeason,
}

fn season_of(start: NaiveDate) -> Season {
    let year = start.year();
    let within = |m1: u32, d1: u32, m2: u32, d2: u32| {
        match (
            NaiveDate::from_ymd_opt(year, m1, d1),
            NaiveDate::from_ymd_opt(year, m2, d2),
        ) {
            (Some(lo), Some(hi)) => start >= lo && start <= hi,
            _ => false,
        }
    };
    if within(6, 15, 9, 15) {
        Season::Summer
    } else if within(12, 15, 12, 31) {
        Season::Winter
    } else {
        Season::OffSeason
    }
}

pub struct LongWeekendStrategy;

impl StrategyProfile for LongWeekendStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::LongWeekend
    }

    fn length_passes(&self) -> &'static [&'static [i64]] {
        &[&[4], &[3]]
    }

    fn is_valid_start(&self, date: NaiveDate, _length: i64, _pass: usize) -> bool {
        matches!(date.weekday(), Weekday::Thu | Weekday::Fri | Weekday::Sat)
    }

    fn min_weekend_days(&self, length: i64, _pass: usize) -> i64 {
        if length == 3 {
            1
        } else {
            2
        }
    }

    fn personal_days_valid(
        &self,
        personal_days: i64,
        remaining_budget: i64,
        _length: i64,
        _pass: usize,
    ) -> bool {
        personal_days == 1 && personal_days <= remaining_budget
    }

    fn score(&self, _candidate: &Candidate, pass: usize) -> f64 {
        // 4 天窗口（第一轮）优先于 3 天窗口；同轮内按时间先后取用
        if pass == 0 {
            100.0
        } else {
            50.0
        }
    }

    fn describe(&self, candidate: &Candidate) -> String {
        format!("{}天长周末", candidate.length)
    }
}

pub struct MidWeekStrategy;

impl StrategyProfile for MidWeekStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::MidWeek
    }

    fn length_passes(&self) -> &'static [&'static [i64]] {
        &[&[6, 5]]
    }

    fn is_valid_start(&self, date: NaiveDate, _length: i64, _pass: usize) -> bool {
        date.weekday() != Weekday::Mon
    }

    fn is_valid_end(&self, date: NaiveDate, _length: i64, _pass: usize) -> bool {
        date.weekday() != Weekday::Fri
    }

    fn min_weekend_days(&self, _length: i64, _pass: usize) -> i64 {
        2
    }

    fn personal_days_valid(
        &self,
        personal_days: i64,
        remaining_budget: i64,
        _length: i64,
        _pass: usize,
    ) -> bool {
        personal_days <= remaining_budget
    }

    fn accepts(&self, candidate: &Candidate, _pass: usize) -> bool {
        candidate.weekend_days == 2
    }

    fn score(&self, candidate: &Candidate, _pass: usize) -> f64 {
        let length_bonus = if candidate.length == 6 { 2 } else { 0 };
        (candidate.holiday_days() * 10 + candidate.weekend_days * 5 - candidate.personal_days * 3
            + length_bonus) as f64
    }

    fn describe(&self, candidate: &Candidate) -> String {
        format!("{}天周中假期", candidate.length)
    }
}

pub struct WeekStrategy;

impl StrategyProfile for WeekStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::Week
    }

    fn length_passes(&self) -> &'static [&'static [i64]] {
        &[&[9, 8, 7]]
    }

    fn min_weekend_days(&self, _length: i64, _pass: usize) -> i64 {
        2
    }

    fn personal_days_valid(
        &self,
        personal_days: i64,
        remaining_budget: i64,
        _length: i64,
        _pass: usize,
    ) -> bool {
        personal_days <= remaining_budget
    }

    fn accepts(&self, candidate: &Candidate, _pass: usize) -> bool {
        candidate.weekend_days == 2
    }

    fn score(&self, candidate: &Candidate, _pass: usize) -> f64 {
        let cluster_bonus = if candidate.max_free_run >= 3 { 50.0 } else { 0.0 };
        candidate.efficiency() * 100.0
            + cluster_bonus
            + (candidate.holiday_days() * 10 + candidate.weekend_days * 5
                + (candidate.length - 7) * 3
                - candidate.personal_days * 3) as f64
    }

    fn describe(&self, candidate: &Candidate) -> String {
        if candidate.max_free_run >= 3 {
            format!("围绕公共假日的{}天假期", candidate.length)
        } else if candidate.weekend_days >= 4 {
            format!("横跨多个周末的{}天假期", candidate.length)
        } else if candidate.public_days >= 2 {
            format!("包含公共假日的{}天假期", candidate.length)
        } else {
            format!("{}天整周假期", candidate.length)
        }
    }
}

pub struct ExtendedStrategy;

impl StrategyProfile for ExtendedStrategy {
    fn strategy_type(&self) -> StrategyType {
        StrategyType::Extended
    }

    fn length_passes(&self) -> &'static [&'static [i64]] {
        &[&[15, 14, 13], &[12, 11, 10]]
    }

    fn min_total_personal_days(&self) -> i64 {
        5
    }

    fn min_weekend_days(&self, _length: i64, pass: usize) -> i64 {
        // 长窗口轮要求覆盖两个完整周末，短窗口轮只要求一个
        if pass == 0 {
            4
        } else {
            2
        }
    }

    fn personal_days_valid(
        &self,
        personal_days: i64,
        remaining_budget: i64,
        _length: i64,
        _pass: usize,
    ) -> bool {
        personal_days <= remaining_budget
    }

    fn precompute(&self, year: i32, index: &HolidayIndex) -> Option<DensityMap> {
        let (year_start, year_end) = date_utils::year_bounds(year).ok()?;
        let mut density = DensityMap::new();
        let mut date = year_start;
        while date <= year_end {
            let mut local = 0;
            for offset in -DENSITY_SCAN_RADIUS..=DENSITY_SCAN_RADIUS {
                let scan = date + Duration::days(offset);
                if scan.year() != year {
                    continue;
                }
                if index.contains_key(&scan) {
                    local += 3;
                } else if date_utils::is_weekend(scan) {
                    local += 1;
                }
            }
            density.insert(date, local);
            date += Duration::days(1);
        }
        Some(density)
    }

    fn score(&self, candidate: &Candidate, _pass: usize) -> f64 {
        let season_bonus = match season_of(candidate.start_date()) {
            Season::Summer | Season::Winter => 50.0,
            Season::OffSeason => 0.0,
        };
        candidate.efficiency() * 150.0
            + candidate.avg_density() * 10.0
            + season_bonus
            + (candidate.holiday_days() * 15 + candidate.weekend_days * 7
                + (candidate.length - 10) * 5
                - candidate.personal_days * 2) as f64
    }

    fn describe(&self, candidate: &Candidate) -> String {
        match season_of(candidate.start_date()) {
            Season::Summer => format!("{}天夏季长假", candidate.length),
            Season::Winter => format!("{}天冬季假期", candidate.length),
            Season::OffSeason => {
                if candidate.avg_density() > 1.0 {
                    format!("围绕假日密集期的{}天长假", candidate.length)
                } else if candidate.weekend_days >= 6 {
                    format!("横跨多个周末的{}天长假", candidate.length)
                } else {
                    format!("{}天加长假期", candidate.length)
                }
            }
        }
    }
}
