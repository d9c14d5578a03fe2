pub mod dns;
pub mod git;
