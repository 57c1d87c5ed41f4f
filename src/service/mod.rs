pub mod pricing;
pub mod quote_service;
