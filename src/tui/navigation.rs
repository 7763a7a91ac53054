use crate::engine::QuizSession;
use crate::flow::{StepId, StepKind};
use crate::lead::{LeadField, LeadForm};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV: &str = "QUIZFUNNEL_SCRIPT_KEYS";

const CHOICE_HINT_TEXT: &str = "Up/Down move | Enter choose | Esc quit";
const TEXT_HINT_TEXT: &str = "Type your answer | Enter continue | Esc quit";
const INFO_HINT_TEXT: &str = "Enter continue | Esc quit";
const LEAD_FORM_HINT_TEXT: &str = "Tab switch field | Enter send | Esc close";
const LEAD_FORM_STATUS_TEXT: &str = "Preencha seus dados para receber o direcionamento exclusivo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScreen {
    Question,
    LeadForm,
}

impl QuizScreen {
    fn as_str(self) -> &'static str {
        match self {
            QuizScreen::Question => "question",
            QuizScreen::LeadForm => "lead_form",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    MovePrev,
    MoveNext,
    Enter,
    Back,
    Cancel,
    Input(char),
    Backspace,
    SwitchField,
    ReconcileSelection(usize),
}

impl QuizAction {
    fn as_str(self) -> &'static str {
        match self {
            QuizAction::MovePrev => "move_prev",
            QuizAction::MoveNext => "move_next",
            QuizAction::Enter => "enter",
            QuizAction::Back => "back",
            QuizAction::Cancel => "cancel",
            QuizAction::Input(_) => "input",
            QuizAction::Backspace => "backspace",
            QuizAction::SwitchField => "switch_field",
            QuizAction::ReconcileSelection(_) => "reconcile_selection",
        }
    }
}

/// Presentation-side state: cursor, text being typed, and the contact form.
/// Quiz answers live in the session, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub screen: QuizScreen,
    pub selected: usize,
    pub text_buffer: String,
    pub lead: LeadForm,
    pub lead_field: LeadField,
    pub status_text: String,
    pub hint_text: String,
}

impl NavState {
    pub fn for_step(kind: StepKind) -> Self {
        Self {
            screen: QuizScreen::Question,
            selected: 0,
            text_buffer: String::new(),
            lead: LeadForm::default(),
            lead_field: LeadField::Name,
            status_text: String::new(),
            hint_text: hint_for_kind(kind).to_string(),
        }
    }

    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = clamp_selection(self.selected, len);
    }

    fn reset_for_step(&mut self, kind: StepKind) {
        self.screen = QuizScreen::Question;
        self.selected = 0;
        self.text_buffer.clear();
        self.status_text.clear();
        self.hint_text = hint_for_kind(kind).to_string();
    }
}

fn hint_for_kind(kind: StepKind) -> &'static str {
    match kind {
        StepKind::SingleChoice => CHOICE_HINT_TEXT,
        StepKind::TextInput => TEXT_HINT_TEXT,
        StepKind::Info => INFO_HINT_TEXT,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizNavEffect {
    None,
    Advanced { from: StepId, to: StepId },
    OpenLeadForm,
    SubmitLead,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizTransition {
    pub effect: QuizNavEffect,
    pub feedback: Option<String>,
}

impl QuizTransition {
    fn no_op(feedback: Option<String>) -> Self {
        Self {
            effect: QuizNavEffect::None,
            feedback,
        }
    }

    fn effect(effect: QuizNavEffect) -> Self {
        Self {
            effect,
            feedback: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizNavError {
    InvalidTransition {
        screen: QuizScreen,
        action: QuizAction,
    },
}

impl std::fmt::Display for QuizNavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizNavError::InvalidTransition { screen, action } => {
                write!(
                    f,
                    "invalid quiz transition: screen={} action={}",
                    screen.as_str(),
                    action.as_str()
                )
            }
        }
    }
}

pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.min(len - 1)
}

fn accepts_text(screen: QuizScreen, kind: StepKind) -> bool {
    screen == QuizScreen::LeadForm || kind == StepKind::TextInput
}

pub fn quiz_action_from_key(screen: QuizScreen, kind: StepKind, key: KeyEvent) -> Option<QuizAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(QuizAction::Cancel);
    }
    match key.code {
        KeyCode::Up => Some(QuizAction::MovePrev),
        KeyCode::Down => Some(QuizAction::MoveNext),
        KeyCode::Tab | KeyCode::BackTab if screen == QuizScreen::LeadForm => {
            Some(QuizAction::SwitchField)
        }
        KeyCode::Esc => Some(if screen == QuizScreen::LeadForm {
            QuizAction::Back
        } else {
            QuizAction::Cancel
        }),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => Some(QuizAction::Enter),
        KeyCode::Backspace if accepts_text(screen, kind) => Some(QuizAction::Backspace),
        KeyCode::Char(ch)
            if accepts_text(screen, kind) && !key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(QuizAction::Input(ch))
        }
        _ => None,
    }
}

/// Parses `QUIZFUNNEL_SCRIPT_KEYS`. A `type:<text>` token expands into one
/// key press per character.
pub fn parse_scripted_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        if let Some(text) = token.trim_start().strip_prefix("type:") {
            keys.extend(
                text.chars()
                    .map(|ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)),
            );
            continue;
        }
        let normalized = token.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            continue;
        }
        let key = match normalized.as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "tab" => KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            "backspace" => KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            other => {
                return Err(format!(
                    "invalid {SCRIPT_KEYS_ENV} token `{other}`; valid tokens: up,down,enter,esc,tab,backspace,ctrl-c,type:<text>"
                ));
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

pub fn quiz_transition(
    state: &mut NavState,
    session: &mut QuizSession,
    action: QuizAction,
) -> Result<QuizTransition, QuizNavError> {
    if let QuizAction::ReconcileSelection(len) = action {
        let previous = state.selected;
        state.clamp_selection(len);
        if previous != state.selected {
            return Ok(QuizTransition::no_op(Some(
                "selection adjusted".to_string(),
            )));
        }
        return Ok(QuizTransition::no_op(None));
    }
    if action == QuizAction::Cancel {
        return Ok(QuizTransition::effect(QuizNavEffect::Quit));
    }

    match state.screen {
        QuizScreen::Question => question_transition(state, session, action),
        QuizScreen::LeadForm => lead_form_transition(state, action),
    }
}

fn question_transition(
    state: &mut NavState,
    session: &mut QuizSession,
    action: QuizAction,
) -> Result<QuizTransition, QuizNavError> {
    let (kind, option_count) = match session.current_step() {
        Ok(step) => (step.kind, step.options.len()),
        Err(err) => return Ok(QuizTransition::no_op(Some(err.to_string()))),
    };
    let from = session.state().current_step_id;

    match (kind, action) {
        (StepKind::SingleChoice, QuizAction::MovePrev) => {
            state.selected = state.selected.saturating_sub(1);
            Ok(QuizTransition::no_op(None))
        }
        (StepKind::SingleChoice, QuizAction::MoveNext) => {
            let max_index = option_count.saturating_sub(1);
            state.selected = std::cmp::min(state.selected + 1, max_index);
            Ok(QuizTransition::no_op(None))
        }
        (StepKind::SingleChoice, QuizAction::Enter) => {
            match session.select_option_at(state.selected) {
                Ok(next) => Ok(advanced(state, session, from, next.current_step_id)),
                Err(err) => Ok(QuizTransition::no_op(Some(err.to_string()))),
            }
        }
        (StepKind::TextInput, QuizAction::Input(ch)) => {
            state.text_buffer.push(ch);
            Ok(QuizTransition::no_op(None))
        }
        (StepKind::TextInput, QuizAction::Backspace) => {
            state.text_buffer.pop();
            Ok(QuizTransition::no_op(None))
        }
        (StepKind::TextInput, QuizAction::Enter) => {
            if state.text_buffer.trim().is_empty() {
                return Ok(QuizTransition::no_op(Some(
                    "Type an answer before continuing.".to_string(),
                )));
            }
            match session.submit_text(&state.text_buffer) {
                Ok(next) => Ok(advanced(state, session, from, next.current_step_id)),
                Err(err) => Ok(QuizTransition::no_op(Some(err.to_string()))),
            }
        }
        (StepKind::TextInput, QuizAction::MovePrev | QuizAction::MoveNext) => {
            Ok(QuizTransition::no_op(None))
        }
        (StepKind::Info, QuizAction::Enter) => {
            state.screen = QuizScreen::LeadForm;
            state.lead_field = LeadField::Name;
            state.status_text = LEAD_FORM_STATUS_TEXT.to_string();
            state.hint_text = LEAD_FORM_HINT_TEXT.to_string();
            Ok(QuizTransition::effect(QuizNavEffect::OpenLeadForm))
        }
        (StepKind::Info, QuizAction::MovePrev | QuizAction::MoveNext) => {
            Ok(QuizTransition::no_op(None))
        }
        _ => Err(QuizNavError::InvalidTransition {
            screen: state.screen,
            action,
        }),
    }
}

fn advanced(
    state: &mut NavState,
    session: &QuizSession,
    from: StepId,
    to: StepId,
) -> QuizTransition {
    let kind = session
        .current_step()
        .map(|step| step.kind)
        .unwrap_or(StepKind::Info);
    state.reset_for_step(kind);
    QuizTransition::effect(QuizNavEffect::Advanced { from, to })
}

fn lead_form_transition(
    state: &mut NavState,
    action: QuizAction,
) -> Result<QuizTransition, QuizNavError> {
    match action {
        QuizAction::Input(ch) => {
            state.lead.push_char(state.lead_field, ch);
            Ok(QuizTransition::no_op(None))
        }
        QuizAction::Backspace => {
            state.lead.pop_char(state.lead_field);
            Ok(QuizTransition::no_op(None))
        }
        QuizAction::SwitchField | QuizAction::MovePrev | QuizAction::MoveNext => {
            state.lead_field = state.lead_field.toggled();
            Ok(QuizTransition::no_op(None))
        }
        QuizAction::Enter => match state.lead.blocking_reason() {
            Some(reason) => Ok(QuizTransition::no_op(Some(format!(
                "Cannot send yet: {reason}."
            )))),
            None => {
                state.status_text = "Enviando...".to_string();
                Ok(QuizTransition::effect(QuizNavEffect::SubmitLead))
            }
        },
        QuizAction::Back => {
            state.screen = QuizScreen::Question;
            state.hint_text = INFO_HINT_TEXT.to_string();
            Ok(QuizTransition::no_op(Some(
                "Closed contact form.".to_string(),
            )))
        }
        QuizAction::Cancel | QuizAction::ReconcileSelection(_) => {
            Err(QuizNavError::InvalidTransition {
                screen: state.screen,
                action,
            })
        }
    }
}

/// Number of selectable rows on the current screen.
pub fn quiz_screen_item_count(state: &NavState, session: &QuizSession) -> usize {
    match state.screen {
        QuizScreen::LeadForm => 2,
        QuizScreen::Question => session
            .current_step()
            .map(|step| match step.kind {
                StepKind::SingleChoice => step.options.len(),
                StepKind::TextInput | StepKind::Info => 1,
            })
            .unwrap_or(0),
    }
}
