// Ice Planner - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod plan;
pub mod routing;
pub mod seed;
pub mod stepper;

// Only compile the terminal UI when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use plan::{format_currency, CostPlan};
pub use routing::FieldKind;
pub use seed::SeedParams;
pub use stepper::{Stepper, ValueChange};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
