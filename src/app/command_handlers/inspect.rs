use crate::engine::progress_snapshot;
use crate::flow::StepId;
use crate::lead::{format_phone, is_phone_complete, phone_digits};

pub fn cmd_progress(args: &[String]) -> Result<String, String> {
    let [raw] = args else {
        return Err("usage: progress <STEP>".to_string());
    };
    let step = StepId::parse(raw)?;
    let progress = progress_snapshot(step);
    Ok(format!(
        "step={step}\nprogress={progress}\nratio={:.2}",
        progress.ratio()
    ))
}

pub fn cmd_phone(args: &[String]) -> Result<String, String> {
    if args.is_empty() {
        return Err("usage: phone <digits>".to_string());
    }
    let raw = args.join(" ");
    let formatted = format_phone(&raw);
    Ok(format!(
        "phone={formatted}\ndigits={}\ncomplete={}",
        phone_digits(&raw),
        is_phone_complete(&formatted)
    ))
}
