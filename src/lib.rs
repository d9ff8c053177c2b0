pub mod config;
pub mod drilling;
pub mod map;
pub mod node;
pub mod problem;
pub mod report;
pub mod search;
pub mod stat;
pub mod viz;
