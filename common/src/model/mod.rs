pub mod audit;
pub mod church;
pub mod status;
pub mod submission;
