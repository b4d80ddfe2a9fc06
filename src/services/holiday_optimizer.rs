use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::holiday::{CompanyHoliday, PublicHoliday, StrategyType};
use crate::models::period::{DayOff, HolidayPeriod};
use crate::services::date_utils;
use crate::services::holiday_index::{build_index, HolidayEntry, HolidayIndex};
use crate::services::strategy::{profile_for, DensityMap, StrategyProfile};

#[derive(Debug, Clone)]
pub struct Candidate {
    pub dates: Vec<NaiveDate>,
    pub length: i64,
    pub personal_days: i64,
    pub public_days: i64,
    pub company_days: i64,
    pub weekend_days: i64,
    // Longest streak of days inside the window that cost no personal day.
    pub max_free_run: i64,
    pub density_total: i64,
    pub score: f64,
}

impl Candidate {
    pub fn start_date(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn end_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn holiday_days(&self) -> i64 {
        self.public_days + self.company_days
    }

    pub fn efficiency(&self) -> f64 {
        (self.holiday_days() + self.weekend_days) as f64 / self.length as f64
    }

    pub fn avg_density(&self) -> f64 {
        self.density_total as f64 / self.length as f64
    }
}

// Mutable state scoped to one optimization run; threaded through the passes
// instead of living in captured closures.
struct RunContext {
    remaining_budget: i64,
    used_dates: BTreeSet<NaiveDate>,
    periods: Vec<HolidayPeriod>,
}

#[derive(Default)]
pub struct HolidayOptimizer;

impl HolidayOptimizer {
    pub fn new() -> Self {
        Self
    }

    // String-keyed entry point for callers that carry the strategy as free
    // text. Unknown names are not a fault: they yield an empty result.
    pub fn optimize_by_name(
        &self,
        strategy: &str,
        public_holidays: &[PublicHoliday],
        company_holidays: &[CompanyHoliday],
        personal_day_count: i64,
        year: i32,
        reference_today: Option<NaiveDate>,
    ) -> AppResult<Vec<HolidayPeriod>> {
        match StrategyType::parse(strategy) {
            Some(parsed) => self.optimize(
                parsed,
                public_holidays,
                company_holidays,
                personal_day_count,
                year,
                reference_today,
            ),
            None => {
                warn!(
                    target: "app::optimizer",
                    strategy,
                    "unknown strategy name, returning empty result"
                );
                Ok(Vec::new())
            }
        }
    }

    pub fn optimize(
        &self,
        strategy: StrategyType,
        public_holidays: &[PublicHoliday],
        company_holidays: &[CompanyHoliday],
        personal_day_count: i64,
        year: i32,
        reference_today: Option<NaiveDate>,
    ) -> AppResult<Vec<HolidayPeriod>> {
        if personal_day_count < 0 {
            return Err(AppError::validation_with_details(
                "个人假期天数不能为负数",
                json!({"personalDayCount": personal_day_count}),
            ));
        }
        date_utils::ensure_supported_year(year)?;

        let public_parsed = parse_holiday_list(
            public_holidays.iter().map(|h| (h.date.as_str(), h.name.as_str())),
        )?;
        let company_parsed = parse_holiday_list(
            company_holidays.iter().map(|h| (h.date.as_str(), h.name.as_str())),
        )?;
        let index = build_index(&public_parsed, &company_parsed);

        let profile = profile_for(strategy);
        if personal_day_count < profile.min_total_personal_days() {
            debug!(
                target: "app::optimizer",
                strategy = strategy.as_str(),
                personal_day_count,
                required = profile.min_total_personal_days(),
                "personal-day budget below strategy minimum, skipping"
            );
            return Ok(Vec::new());
        }

        let (year_start, year_end) = date_utils::year_bounds(year)?;
        let today = reference_today.unwrap_or_else(|| Utc::now().date_naive());
        let density = profile.precompute(year, &index);

        let mut ctx = RunContext {
            remaining_budget: personal_day_count,
            used_dates: BTreeSet::new(),
            periods: Vec::new(),
        };

        for (pass, lengths) in profile.length_passes().iter().enumerate() {
            if ctx.remaining_budget <= 0 {
                break;
            }

            let mut candidates = generate_candidates(
                profile,
                pass,
                lengths,
                year_start,
                year_end,
                today,
                &index,
                density.as_ref(),
                &ctx,
            );
            // 稳定排序: 同分候选保持生成时的时间顺序
            candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

            select_candidates(profile, pass, candidates, &index, &mut ctx);
        }

        ctx.periods.sort_by(|a, b| a.start_date.cmp(&b.start_date));

        debug!(
            target: "app::optimizer",
            strategy = strategy.as_str(),
            periods = ctx.periods.len(),
            remaining_budget = ctx.remaining_budget,
            "optimization run complete"
        );
        Ok(ctx.periods)
    }
}

fn parse_holiday_list<'a>(
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> AppResult<Vec<(NaiveDate, String)>> {
    entries
        .map(|(date, name)| Ok((date_utils::parse_date(date)?, name.to_string())))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn generate_candidates(
    profile: &dyn StrategyProfile,
    pass: usize,
    lengths: &[i64],
    year_start: NaiveDate,
    year_end: NaiveDate,
    today: NaiveDate,
    index: &HolidayIndex,
    density: Option<&DensityMap>,
    ctx: &RunContext,
) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for &length in lengths {
        let mut start = year_start;
        while start <= year_end {
            if let Some(candidate) =
                evaluate_window(profile, pass, start, length, year_end, today, index, density, ctx)
            {
                candidates.push(candidate);
            }
            start += Duration::days(1);
        }
    }
    candidates
}

#[allow(clippy::too_many_arguments)]
fn evaluate_window(
    profile: &dyn StrategyProfile,
    pass: usize,
    start: NaiveDate,
    length: i64,
    year_end: NaiveDate,
    today: NaiveDate,
    index: &HolidayIndex,
    density: Option<&DensityMap>,
    ctx: &RunContext,
) -> Option<Candidate> {
    if !profile.is_valid_start(start, length, pass) {
        return None;
    }
    if start < today {
        return None;
    }

    let end = start + Duration::days(length - 1);
    if end > year_end {
        return None;
    }
    if !profile.is_valid_end(end, length, pass) {
        return None;
    }

    let dates: Vec<NaiveDate> = (0..length).map(|i| start + Duration::days(i)).collect();
    // 重叠检查放在逐日分类之前，避免对已占用窗口做无谓统计
    if dates.iter().any(|date| ctx.used_dates.contains(date)) {
        return None;
    }

    let mut candidate = Candidate {
        dates,
        length,
        personal_days: 0,
        public_days: 0,
        company_days: 0,
        weekend_days: 0,
        max_free_run: 0,
        density_total: 0,
        score: 0.0,
    };

    let mut free_run = 0;
    for date in &candidate.dates {
        if let Some(map) = density {
            candidate.density_total += map.get(date).copied().unwrap_or(0);
        }
        // 分类优先级: 假日 > 周末 > 个人假
        match index.get(date) {
            Some(HolidayEntry::Public { .. }) => {
                candidate.public_days += 1;
                free_run += 1;
            }
            Some(HolidayEntry::Company { .. }) => {
                candidate.company_days += 1;
                free_run += 1;
            }
            None if date_utils::is_weekend(*date) => {
                candidate.weekend_days += 1;
                free_run += 1;
            }
            None => {
                candidate.personal_days += 1;
                free_run = 0;
            }
        }
        candidate.max_free_run = candidate.max_free_run.max(free_run);
    }

    if !profile.personal_days_valid(candidate.personal_days, ctx.remaining_budget, length, pass) {
        return None;
    }
    if candidate.weekend_days < profile.min_weekend_days(length, pass) {
        return None;
    }
    if !profile.accepts(&candidate, pass) {
        return None;
    }

    candidate.score = profile.score(&candidate, pass);
    Some(candidate)
}

fn select_candidates(
    profile: &dyn StrategyProfile,
    pass: usize,
    candidates: Vec<Candidate>,
    index: &HolidayIndex,
    ctx: &mut RunContext,
) {
    for candidate in candidates {
        // 预算在同一轮内逐个递减，需要对剩余额度重新校验
        if !profile.personal_days_valid(
            candidate.personal_days,
            ctx.remaining_budget,
            candidate.length,
            pass,
        ) {
            continue;
        }
        // 同轮中更高分的候选可能已占用了这些日期
        if candidate.dates.iter().any(|date| ctx.used_dates.contains(date)) {
            continue;
        }

        let days = build_breakdown(&candidate, index);
        let filled = days.iter().filter(|day| day.is_personal()).count() as i64;
        if filled != candidate.personal_days {
            warn!(
                target: "app::optimizer",
                start = %candidate.start_date(),
                expected = candidate.personal_days,
                actual = filled,
                "personal-day count mismatch in breakdown, dropping candidate"
            );
            continue;
        }

        let period = HolidayPeriod {
            start_date: date_utils::format_date(candidate.start_date()),
            end_date: date_utils::format_date(candidate.end_date()),
            days,
            strategy: profile.strategy_type(),
            personal_days_used: candidate.personal_days,
            public_days_used: candidate.public_days,
            company_days_used: candidate.company_days,
            weekend_days: candidate.weekend_days,
            total_days_off: candidate.length,
            description: profile.describe(&candidate),
        };

        ctx.used_dates.extend(candidate.dates.iter().copied());
        ctx.remaining_budget -= candidate.personal_days;
        ctx.periods.push(period);

        if ctx.remaining_budget <= 0 {
            break;
        }
    }
}

fn build_breakdown(candidate: &Candidate, index: &HolidayIndex) -> Vec<DayOff> {
    candidate
        .dates
        .iter()
        .map(|date| {
            let iso = date_utils::format_date(*date);
            match index.get(date) {
                Some(HolidayEntry::Public { name }) => DayOff::PublicHoliday {
                    date: iso,
                    name: name.clone(),
                },
                Some(HolidayEntry::Company { name }) => DayOff::CompanyHoliday {
                    date: iso,
                    name: name.clone(),
                },
                None if date_utils::is_weekend(*date) => DayOff::Weekend { date: iso },
                None => DayOff::PersonalDay { date: iso },
            }
        })
        .collect()
}
