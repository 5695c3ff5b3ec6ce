pub mod budget;
pub mod coordinator;
pub mod heuristics;
pub mod strategies;

pub use budget::SearchBudget;
pub use coordinator::{solve, CoordinatorConfig};
pub use strategies::{CancelToken, Strategy, StrategyKind};
