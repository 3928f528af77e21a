pub mod holdings;
pub mod price;
pub mod transaction;
pub mod valuation;
