//! Quiz flow engine: branching resolution, pure state transitions, progress
//! estimation, and the session that fronts them for a rendering layer.

pub mod error;
pub mod paths;
pub mod progress;
pub mod resolve;
pub mod session;
pub mod state;

pub use error::NavigationError;
pub use paths::{enumerate_paths, QuizPath, TEXT_ANSWER_PLACEHOLDER};
pub use progress::{progress_of, progress_snapshot, Progress, PROGRESS_TOTAL};
pub use resolve::{resolve_next, resolve_text_destination};
pub use session::{QuizSession, StepView};
pub use state::QuizState;
