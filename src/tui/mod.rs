pub mod navigation;
pub mod quiz;
pub mod screens;

pub use navigation::{NavState, QuizAction, QuizNavEffect, QuizScreen, SCRIPT_KEYS_ENV};
pub use quiz::{run_quiz, run_quiz_scripted, QuizExit};
