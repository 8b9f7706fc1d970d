pub mod error;
pub mod types;

#[cfg(feature = "profit")]
pub mod profit;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(feature = "export")]
pub mod export;

pub use error::ProfitError;
pub use types::*;

/// Standard result type for all resale-profit operations
pub type CalcResult<T> = Result<T, ProfitError>;
