use crate::config::Settings;
use crate::engine::QuizSession;
use crate::lead::{submit_lead, LeadError, LeadOutcome, LeadSink, WebhookSink};
use crate::tui::navigation::{
    parse_scripted_keys, quiz_action_from_key, quiz_screen_item_count, quiz_transition, NavState,
    QuizAction, QuizNavEffect, QuizScreen, SCRIPT_KEYS_ENV,
};
use crate::tui::screens::{
    draw_lead_form, draw_question, footer_line, project_lead_form_view_model,
    project_question_view_model, QuestionViewModel,
};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, IsTerminal};
use std::time::Duration;

type QuizTerminal = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizExit {
    Submitted(LeadOutcome),
    Quit,
    ScriptEnded,
}

impl QuizExit {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizExit::Submitted(_) => "submitted",
            QuizExit::Quit => "quit",
            QuizExit::ScriptEnded => "script_ended",
        }
    }
}

fn is_interactive_quiz() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn load_scripted_quiz_keys() -> Result<Option<Vec<KeyEvent>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) else {
        return Ok(None);
    };
    parse_scripted_keys(&raw).map(Some)
}

/// Runs the quiz against `session`, delivering the lead to the configured
/// webhook.
pub fn run_quiz(settings: &Settings, session: &mut QuizSession) -> Result<QuizExit, String> {
    let sink = WebhookSink::new(settings.webhook_url.clone(), settings.request_timeout());
    if let Some(keys) = load_scripted_quiz_keys()? {
        return run_quiz_scripted(settings, session, &sink, keys);
    }
    if !is_interactive_quiz() {
        return Err(format!(
            "`run` needs an interactive terminal; set {SCRIPT_KEYS_ENV} or use `quizfunnel walk <answer>...`"
        ));
    }
    run_quiz_tui(settings, session, &sink)
}

fn run_quiz_tui(
    settings: &Settings,
    session: &mut QuizSession,
    sink: &dyn LeadSink,
) -> Result<QuizExit, String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter quiz screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create quiz terminal: {e}"))?;
    let result = run_quiz_tui_loop(settings, session, sink, &mut terminal);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave quiz screen: {e}"))?;
    result
}

fn run_quiz_tui_loop(
    settings: &Settings,
    session: &mut QuizSession,
    sink: &dyn LeadSink,
    terminal: &mut QuizTerminal,
) -> Result<QuizExit, String> {
    let footer = footer_line(&settings.footer_brand);
    let mut nav = NavState::for_step(current_kind(session)?);
    loop {
        reconcile(&mut nav, session)?;
        let shown = draw_active_quiz_screen(terminal, session, &nav, &footer, false)?;
        if !event::poll(Duration::from_millis(250))
            .map_err(|e| format!("failed to poll quiz input: {e}"))?
        {
            continue;
        }
        let ev = event::read().map_err(|e| format!("failed to read quiz input: {e}"))?;
        let Event::Key(key) = ev else {
            continue;
        };
        let Some(action) = quiz_action_from_key(nav.screen, current_kind(session)?, key) else {
            continue;
        };
        let transition = match quiz_transition(&mut nav, session, action) {
            Ok(transition) => transition,
            Err(err) => {
                nav.status_text = err.to_string();
                continue;
            }
        };
        if let Some(feedback) = transition.feedback {
            nav.status_text = feedback;
        }
        match transition.effect {
            QuizNavEffect::None | QuizNavEffect::OpenLeadForm => {}
            QuizNavEffect::Advanced { .. } => {
                terminal
                    .draw(|frame| draw_question(frame, &shown, true))
                    .map_err(|e| format!("failed to render quiz ui: {e}"))?;
                std::thread::sleep(settings.transition_delay());
            }
            QuizNavEffect::SubmitLead => {
                draw_active_quiz_screen(terminal, session, &nav, &footer, true)?;
                match submit_lead(sink, &nav.lead, session.state(), &settings.redirect_url) {
                    Ok(outcome) => return Ok(QuizExit::Submitted(outcome)),
                    Err(err) => nav.status_text = err.to_string(),
                }
            }
            QuizNavEffect::Quit => return Ok(QuizExit::Quit),
        }
    }
}

fn draw_active_quiz_screen(
    terminal: &mut QuizTerminal,
    session: &QuizSession,
    nav: &NavState,
    footer: &str,
    sending: bool,
) -> Result<QuestionViewModel, String> {
    let question =
        project_question_view_model(session, nav, footer).map_err(|err| err.to_string())?;
    let drawn = match nav.screen {
        QuizScreen::Question => terminal.draw(|frame| draw_question(frame, &question, false)),
        QuizScreen::LeadForm => {
            let form = project_lead_form_view_model(&nav.lead, nav.lead_field, sending);
            terminal.draw(|frame| draw_lead_form(frame, &question, &form))
        }
    };
    drawn.map_err(|e| format!("failed to render quiz ui: {e}"))?;
    Ok(question)
}

/// Drives the same state machine from a fixed key list. The transition
/// delay is skipped since nothing is drawn.
pub fn run_quiz_scripted(
    settings: &Settings,
    session: &mut QuizSession,
    sink: &dyn LeadSink,
    scripted_keys: Vec<KeyEvent>,
) -> Result<QuizExit, String> {
    let mut nav = NavState::for_step(current_kind(session)?);
    for key in scripted_keys {
        reconcile(&mut nav, session)?;
        let Some(action) = quiz_action_from_key(nav.screen, current_kind(session)?, key) else {
            continue;
        };
        let transition = quiz_transition(&mut nav, session, action).map_err(|e| e.to_string())?;
        if let Some(feedback) = transition.feedback {
            tracing::debug!(feedback = %feedback, "scripted quiz feedback");
            nav.status_text = feedback;
        }
        match transition.effect {
            QuizNavEffect::None | QuizNavEffect::OpenLeadForm | QuizNavEffect::Advanced { .. } => {}
            QuizNavEffect::SubmitLead => {
                match submit_lead(sink, &nav.lead, session.state(), &settings.redirect_url) {
                    Ok(outcome) => return Ok(QuizExit::Submitted(outcome)),
                    Err(err @ LeadError::IncompleteForm(_)) => nav.status_text = err.to_string(),
                    Err(err) => return Err(err.to_string()),
                }
            }
            QuizNavEffect::Quit => return Ok(QuizExit::Quit),
        }
    }
    Ok(QuizExit::ScriptEnded)
}

fn current_kind(session: &QuizSession) -> Result<crate::flow::StepKind, String> {
    session
        .current_step()
        .map(|step| step.kind)
        .map_err(|err| err.to_string())
}

fn reconcile(nav: &mut NavState, session: &mut QuizSession) -> Result<(), String> {
    let item_count = quiz_screen_item_count(nav, session);
    let transition = quiz_transition(nav, session, QuizAction::ReconcileSelection(item_count))
        .map_err(|err| err.to_string())?;
    if let Some(feedback) = transition.feedback {
        nav.status_text = feedback;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::StepId;
    use crate::lead::LeadPayload;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        seen: RefCell<Vec<LeadPayload>>,
    }

    impl LeadSink for RecordingSink {
        fn deliver(&self, payload: &LeadPayload) -> Result<(), LeadError> {
            self.seen.borrow_mut().push(payload.clone());
            Ok(())
        }
    }

    fn keys(raw: &str) -> Vec<KeyEvent> {
        parse_scripted_keys(raw).expect("keys")
    }

    #[test]
    fn scripted_run_submits_lead_at_terminal_step() {
        let settings = Settings::default();
        let mut session = QuizSession::builtin();
        let sink = RecordingSink::default();
        let exit = run_quiz_scripted(
            &settings,
            &mut session,
            &sink,
            keys("enter,enter,enter,enter,type:Ana,tab,type:11987654321,enter"),
        )
        .expect("run");
        match exit {
            QuizExit::Submitted(outcome) => {
                assert!(outcome.delivered);
                assert_eq!(outcome.redirect_url, settings.redirect_url);
            }
            other => panic!("unexpected exit {other:?}"),
        }
        assert_eq!(session.state().current_step_id, StepId::ResultElecti);
        let seen = sink.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].phone, "(11) 98765-4321");
        assert_eq!(seen[0].quiz_data.get("PATH_A_INTEREST").map(String::as_str), Some("automation"));
    }

    #[test]
    fn scripted_run_reports_unfinished_script() {
        let mut session = QuizSession::builtin();
        let exit = run_quiz_scripted(
            &Settings::default(),
            &mut session,
            &RecordingSink::default(),
            keys("down,enter"),
        )
        .expect("run");
        assert_eq!(exit, QuizExit::ScriptEnded);
        assert_eq!(session.state().current_step_id, StepId::PathBArea);
    }

    #[test]
    fn ctrl_c_quits_without_submitting() {
        let mut session = QuizSession::builtin();
        let sink = RecordingSink::default();
        let exit = run_quiz_scripted(&Settings::default(), &mut session, &sink, keys("ctrl-c"))
            .expect("run");
        assert_eq!(exit, QuizExit::Quit);
        assert!(sink.seen.borrow().is_empty());
    }
}
