pub mod analyzer;
pub mod config;
pub mod error;
pub mod export;
pub mod parser;

pub use analyzer::{analisar, Analise};
pub use config::AnaliseConfig;
pub use error::AppError;

// ─── E2E Integration Tests ──────────────────────────────────────────────────
