pub mod blend;
pub mod metrics;
