pub mod charge_offs;
pub mod dealers;
pub mod kpi;
pub mod trend;
