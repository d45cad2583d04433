pub mod prediction;
pub mod quiz;
