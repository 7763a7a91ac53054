use crate::app::command_support::{load_context, map_flow_err, AppContext};
use crate::engine::{enumerate_paths, progress_of};
use crate::flow::{validate_flow, BranchRules, FlowDefinition, Step, StepId};
use std::collections::BTreeMap;
use std::path::Path;

pub fn cmd_flow(args: &[String]) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("validate") => cmd_flow_validate(&args[1..]),
        Some("show") => cmd_flow_show(&args[1..]),
        Some("paths") => cmd_flow_paths(),
        Some("export") => {
            let context = load_context()?;
            context.flow.to_yaml().map_err(map_flow_err)
        }
        Some(other) => Err(format!("unknown flow subcommand `{other}`")),
        None => Err("usage: flow validate [PATH] | show [STEP] | paths | export".to_string()),
    }
}

fn cmd_flow_validate(args: &[String]) -> Result<String, String> {
    let (flow, source, rules) = match args.first() {
        Some(path) => {
            let rules = BranchRules::builtin();
            let flow = FlowDefinition::from_path(Path::new(path)).map_err(map_flow_err)?;
            validate_flow(&flow, &rules).map_err(map_flow_err)?;
            (flow, path.clone(), rules)
        }
        None => {
            let context = load_context()?;
            let source = context.flow_source();
            (context.flow, source, context.rules)
        }
    };
    Ok(format!(
        "flow=valid\nsource={source}\nsteps={}\nrules={}",
        flow.len(),
        rules.rules().len()
    ))
}

fn cmd_flow_show(args: &[String]) -> Result<String, String> {
    let context = load_context()?;
    match args.first() {
        Some(raw) => {
            let id = StepId::parse(raw)?;
            let step = context.flow.get_step(id).map_err(map_flow_err)?;
            Ok(describe_step(&context, step))
        }
        None => Ok(context
            .flow
            .steps()
            .map(|step| {
                format!(
                    "step={} type={} options={} progress={}",
                    step.id,
                    step.kind,
                    step.options.len(),
                    progress_of(step.id)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn describe_step(context: &AppContext, step: &Step) -> String {
    let mut lines = vec![
        format!("step={}", step.id),
        format!("type={}", step.kind),
        format!("question={}", step.question_text()),
    ];
    if let Some(description) = &step.description {
        lines.push(format!("description={description}"));
    }
    if let Some(placeholder) = &step.placeholder {
        lines.push(format!("placeholder={placeholder}"));
    }
    if let Some(cta_text) = &step.cta_text {
        lines.push(format!("cta_text={cta_text}"));
    }
    for option in &step.options {
        let destination = context
            .rules
            .lookup(step.id, &option.value)
            .or(option.next_step)
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string());
        lines.push(format!(
            "option.{}={} -> {}",
            option.value, option.label, destination
        ));
    }
    for rule in context.rules.for_step(step.id) {
        lines.push(format!("rule.{}={}", rule.value, rule.destination));
    }
    lines.join("\n")
}

fn cmd_flow_paths() -> Result<String, String> {
    let context = load_context()?;
    let paths = enumerate_paths(&context.flow, &context.rules).map_err(|err| err.to_string())?;
    let mut per_terminal: BTreeMap<StepId, usize> = BTreeMap::new();
    for path in &paths {
        *per_terminal.entry(path.terminal).or_default() += 1;
    }

    let mut lines = vec![format!("paths={}", paths.len())];
    lines.extend(
        per_terminal
            .iter()
            .map(|(terminal, count)| format!("terminal.{terminal}={count}")),
    );
    lines.extend(paths.iter().map(|path| {
        let route = path
            .answers
            .iter()
            .map(|(step, answer)| format!("{step}:{answer}"))
            .chain(std::iter::once(path.terminal.to_string()))
            .collect::<Vec<_>>()
            .join(" > ");
        format!("path={route}")
    }));
    Ok(lines.join("\n"))
}
