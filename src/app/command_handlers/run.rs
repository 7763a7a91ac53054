use crate::app::command_support::load_context;
use crate::engine::{progress_snapshot, QuizSession, QuizState};
use crate::tui::{run_quiz, QuizExit};

pub fn cmd_run() -> Result<String, String> {
    let context = load_context()?;
    let mut session = QuizSession::new(context.flow, context.rules);
    let exit = run_quiz(&context.settings, &mut session)?;
    tracing::info!(exit = exit.as_str(), step = %session.state().current_step_id, "quiz finished");
    Ok(render_exit(&exit, session.state()))
}

pub(crate) fn render_exit(exit: &QuizExit, state: &QuizState) -> String {
    let mut lines = vec![
        format!("quiz_exit={}", exit.as_str()),
        format!("current_step={}", state.current_step_id),
        format!("progress={}", progress_snapshot(state.current_step_id)),
    ];
    if let QuizExit::Submitted(outcome) = exit {
        lines.push(format!("lead_delivered={}", outcome.delivered));
        lines.push(format!("redirect={}", outcome.redirect_url));
    }
    lines.join("\n")
}
