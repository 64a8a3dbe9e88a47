pub mod analyte;
pub mod pathway;
pub mod state;
pub mod thresholds;
