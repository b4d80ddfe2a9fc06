pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use models::holiday::{CompanyHoliday, PublicHoliday, StrategyType};
pub use models::period::{DayOff, HolidayPeriod};
pub use services::holiday_optimizer::HolidayOptimizer;
