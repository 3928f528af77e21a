pub mod history_service;
pub mod holdings_service;
pub mod price_service;
pub mod valuation_service;
