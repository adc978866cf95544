pub mod analyze;
pub mod extract;
pub mod keywords;
pub mod policy;
