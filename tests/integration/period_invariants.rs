use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};
use holiday_optimizer::{
    CompanyHoliday, DayOff, HolidayOptimizer, HolidayPeriod, PublicHoliday, StrategyType,
};

const PERSONAL_DAYS: i64 = 12;

const ALL_STRATEGIES: [StrategyType; 4] = [
    StrategyType::LongWeekend,
    StrategyType::MidWeek,
    StrategyType::Week,
    StrategyType::Extended,
];

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

// 2025 年德国全国性假日, 外加一个落在周六的州假日用于周末优先级检查
fn public_holidays() -> Vec<PublicHoliday> {
    [
        ("2025-01-01", "元旦"),
        ("2025-04-18", "耶稣受难日"),
        ("2025-04-21", "复活节星期一"),
        ("2025-05-01", "劳动节"),
        ("2025-05-29", "耶稣升天节"),
        ("2025-06-09", "圣灵降临节星期一"),
        ("2025-08-09", "和平节"),
        ("2025-10-03", "德国统一日"),
        ("2025-12-25", "圣诞节"),
        ("2025-12-26", "节礼日"),
    ]
    .iter()
    .map(|(date, name)| PublicHoliday {
        date: date.to_string(),
        name: name.to_string(),
    })
    .collect()
}

fn company_holidays() -> Vec<CompanyHoliday> {
    vec![CompanyHoliday {
        date: "2025-12-24".to_string(),
        name: "平安夜".to_string(),
    }]
}

fn run(strategy: StrategyType) -> Vec<HolidayPeriod> {
    HolidayOptimizer::new()
        .optimize(
            strategy,
            &public_holidays(),
            &company_holidays(),
            PERSONAL_DAYS,
            2025,
            Some(date("2025-01-01")),
        )
        .expect("optimize")
}

fn period_dates(period: &HolidayPeriod) -> Vec<NaiveDate> {
    let start = date(&period.start_date);
    let end = date(&period.end_date);
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current += Duration::days(1);
    }
    dates
}

#[test]
fn every_strategy_produces_at_least_one_period_on_a_real_calendar() {
    for strategy in ALL_STRATEGIES {
        assert!(
            !run(strategy).is_empty(),
            "strategy {:?} found nothing on a holiday-rich year",
            strategy
        );
    }
}

#[test]
fn periods_within_one_run_never_overlap() {
    for strategy in ALL_STRATEGIES {
        let periods = run(strategy);
        let mut seen = BTreeSet::new();
        for period in &periods {
            for day in period_dates(period) {
                assert!(
                    seen.insert(day),
                    "strategy {:?} reused {} across periods",
                    strategy,
                    day
                );
            }
        }
    }
}

#[test]
fn personal_day_spend_never_exceeds_the_budget() {
    for strategy in ALL_STRATEGIES {
        let spent: i64 = run(strategy).iter().map(|p| p.personal_days_used).sum();
        assert!(
            spent <= PERSONAL_DAYS,
            "strategy {:?} spent {} of {}",
            strategy,
            spent,
            PERSONAL_DAYS
        );
    }
}

#[test]
fn every_day_in_a_period_is_classified_exactly_once_in_order() {
    for strategy in ALL_STRATEGIES {
        for period in run(strategy) {
            let expected = period_dates(&period);
            assert_eq!(period.days.len(), expected.len());
            assert_eq!(period.total_days_off, expected.len() as i64);
            for (day, expected_date) in period.days.iter().zip(expected) {
                assert_eq!(
                    day.date(),
                    expected_date.format("%Y-%m-%d").to_string(),
                    "strategy {:?} breakdown out of order",
                    strategy
                );
            }
        }
    }
}

#[test]
fn per_period_counters_match_the_breakdown() {
    for strategy in ALL_STRATEGIES {
        for period in run(strategy) {
            let mut personal = 0;
            let mut public = 0;
            let mut company = 0;
            let mut weekend = 0;
            for day in &period.days {
                match day {
                    DayOff::PublicHoliday { .. } => public += 1,
                    DayOff::CompanyHoliday { .. } => company += 1,
                    DayOff::Weekend { .. } => weekend += 1,
                    DayOff::PersonalDay { .. } => personal += 1,
                }
            }
            assert_eq!(period.personal_days_used, personal);
            assert_eq!(period.public_days_used, public);
            assert_eq!(period.company_days_used, company);
            assert_eq!(period.weekend_days, weekend);
        }
    }
}

#[test]
fn holidays_always_beat_weekend_and_personal_classifications() {
    let holiday_dates: BTreeSet<String> = public_holidays()
        .iter()
        .map(|h| h.date.clone())
        // 2025-08-09 落在周六, 合并索引时会被清除, 期间内按周末分类
        .filter(|d| d != "2025-08-09")
        .collect();

    for strategy in ALL_STRATEGIES {
        for period in run(strategy) {
            for day in &period.days {
                if day.date() == "2025-08-09" {
                    assert!(matches!(day, DayOff::Weekend { .. }));
                }
                if holiday_dates.contains(day.date()) {
                    assert!(
                        matches!(day, DayOff::PublicHoliday { .. }),
                        "strategy {:?} misclassified {}",
                        strategy,
                        day.date()
                    );
                }
            }
        }
    }
}

#[test]
fn output_is_chronological_and_deterministic() {
    for strategy in ALL_STRATEGIES {
        let first = run(strategy);
        let second = run(strategy);
        assert_eq!(first, second, "strategy {:?} is not deterministic", strategy);

        for pair in first.windows(2) {
            assert!(
                pair[0].start_date < pair[1].start_date,
                "strategy {:?} output not sorted by start date",
                strategy
            );
        }
    }
}
