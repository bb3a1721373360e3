pub mod report;
pub mod votes;
