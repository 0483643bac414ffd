pub mod assessment;
pub mod job;
