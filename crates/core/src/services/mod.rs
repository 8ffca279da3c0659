pub mod forecast_service;
pub mod month_range;
pub mod trend;
