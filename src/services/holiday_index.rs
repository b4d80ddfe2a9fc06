use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::services::date_utils;

#[derive(Debug, Clone, PartialEq)]
pub enum HolidayEntry {
    Public { name: String },
    Company { name: String },
}

pub type HolidayIndex = BTreeMap<NaiveDate, HolidayEntry>;

// Company holidays are inserted after public ones so a collision keeps the
// company record. Entries landing on Saturday/Sunday are removed: weekends
// are already free and must not count against the personal-day budget.
pub fn build_index(
    public_holidays: &[(NaiveDate, String)],
    company_holidays: &[(NaiveDate, String)],
) -> HolidayIndex {
    let mut index = HolidayIndex::new();
    for (date, name) in public_holidays {
        index.insert(*date, HolidayEntry::Public { name: name.clone() });
    }
    for (date, name) in company_holidays {
        index.insert(*date, HolidayEntry::Company { name: name.clone() });
    }
    index.retain(|date, _| !date_utils::is_weekend(*date));
    index
}
