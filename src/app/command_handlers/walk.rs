use crate::app::command_support::load_context;
use crate::engine::{progress_snapshot, NavigationError, QuizSession};
use crate::flow::StepKind;
use crate::lead::{submit_lead, LeadForm, WebhookSink};

#[derive(Debug, Default, PartialEq, Eq)]
struct WalkArgs {
    answers: Vec<String>,
    name: Option<String>,
    phone: Option<String>,
}

fn parse_walk_args(args: &[String]) -> Result<WalkArgs, String> {
    let mut parsed = WalkArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--name" => {
                let value = iter.next().ok_or("--name requires a value")?;
                parsed.name = Some(value.clone());
            }
            "--phone" => {
                let value = iter.next().ok_or("--phone requires a value")?;
                parsed.phone = Some(value.clone());
            }
            _ => parsed.answers.push(arg.clone()),
        }
    }
    Ok(parsed)
}

/// Feeds one answer to the current step: an option value on choice steps,
/// free text on text steps.
fn answer_step(session: &mut QuizSession, answer: &str) -> Result<(), NavigationError> {
    let (kind, id) = session.current_step().map(|step| (step.kind, step.id))?;
    match kind {
        StepKind::SingleChoice => session.choose(answer).map(|_| ()),
        StepKind::TextInput => session.submit_text(answer).map(|_| ()),
        StepKind::Info => Err(NavigationError::TerminalStep { step: id }),
    }
}

pub fn cmd_walk(args: &[String]) -> Result<String, String> {
    let walk = parse_walk_args(args)?;
    let context = load_context()?;
    let mut session = QuizSession::new(context.flow, context.rules);
    for answer in &walk.answers {
        answer_step(&mut session, answer).map_err(|err| err.to_string())?;
    }

    let state = session.state();
    let step = session.current_step().map_err(|err| err.to_string())?;
    let mut lines = vec![
        format!("current_step={}", state.current_step_id),
        format!("step_type={}", step.kind),
        format!("progress={}", progress_snapshot(state.current_step_id)),
        format!("terminal={}", step.is_terminal()),
    ];
    for visited in &state.history {
        if let Some(answer) = state.answer_for(*visited) {
            lines.push(format!("answer.{visited}={answer}"));
        }
    }

    if walk.name.is_none() && walk.phone.is_none() {
        return Ok(lines.join("\n"));
    }
    if !step.is_terminal() {
        return Err(format!(
            "--name/--phone need a walk that ends on a result step; stopped at `{}`",
            state.current_step_id
        ));
    }
    let form = LeadForm::new(
        walk.name.as_deref().unwrap_or_default(),
        walk.phone.as_deref().unwrap_or_default(),
    );
    let sink = WebhookSink::new(
        context.settings.webhook_url.clone(),
        context.settings.request_timeout(),
    );
    let outcome = submit_lead(&sink, &form, state, &context.settings.redirect_url)
        .map_err(|err| err.to_string())?;
    lines.push(format!("lead_name={}", form.name));
    lines.push(format!("lead_phone={}", form.phone));
    lines.push(format!("lead_delivered={}", outcome.delivered));
    lines.push(format!("redirect={}", outcome.redirect_url));
    Ok(lines.join("\n"))
}
