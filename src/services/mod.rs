pub mod fallback;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod recommendations;
pub mod retry;

pub use recommendations::RecommendationService;
pub use retry::{RetryPolicy, RetryingInvoker};
