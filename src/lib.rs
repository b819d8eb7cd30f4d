pub mod checker;
pub mod config;
pub mod error;
pub mod report;
pub mod version;

pub use checker::PageChecker;
pub use config::CheckConfig;
pub use report::{CheckKind, CheckOutcome, RunReport};
