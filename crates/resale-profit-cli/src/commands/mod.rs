pub mod calculate;
pub mod export;
pub mod listing;
pub mod scenarios;
