pub mod payments;
pub mod payments_chaos;
pub mod payments_metrics;
