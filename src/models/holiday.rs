use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicHoliday {
    pub date: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompanyHoliday {
    pub date: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StrategyType {
    LongWeekend,
    MidWeek,
    Week,
    Extended,
}

impl StrategyType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "longWeekend" => Some(StrategyType::LongWeekend),
            "midWeek" => Some(StrategyType::MidWeek),
            "week" => Some(StrategyType::Week),
            "extended" => Some(StrategyType::Extended),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyType::LongWeekend => "longWeekend",
            StrategyType::MidWeek => "midWeek",
            StrategyType::Week => "week",
            StrategyType::Extended => "extended",
        }
    }
}
