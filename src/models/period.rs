use serde::{Deserialize, Serialize};

use crate::models::holiday::StrategyType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DayOff {
    #[serde(rename = "PUBLIC_HOLIDAY")]
    PublicHoliday { date: String, name: String },
    #[serde(rename = "COMPANY_HOLIDAY")]
    CompanyHoliday { date: String, name: String },
    #[serde(rename = "WEEKEND")]
    Weekend { date: String },
    #[serde(rename = "USER_HOLIDAY")]
    PersonalDay { date: String },
}

impl DayOff {
    pub fn date(&self) -> &str {
        match self {
            DayOff::PublicHoliday { date, .. }
            | DayOff::CompanyHoliday { date, .. }
            | DayOff::Weekend { date }
            | DayOff::PersonalDay { date } => date,
        }
    }

    pub fn is_personal(&self) -> bool {
        matches!(self, DayOff::PersonalDay { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HolidayPeriod {
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<DayOff>,
    pub strategy: StrategyType,
    pub personal_days_used: i64,
    pub public_days_used: i64,
    pub company_days_used: i64,
    pub weekend_days: i64,
    pub total_days_off: i64,
    pub description: String,
}
