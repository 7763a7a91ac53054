use crate::app::command_support::{load_context, map_config_err};

pub fn cmd_config(args: &[String]) -> Result<String, String> {
    match args.first().map(String::as_str) {
        Some("show") if args.get(1).map(String::as_str) == Some("--yaml") => {
            let context = load_context()?;
            context.settings.to_yaml().map_err(map_config_err)
        }
        Some("show") => cmd_config_show(),
        Some(other) => Err(format!("unknown config subcommand `{other}`")),
        None => Err("usage: config show [--yaml]".to_string()),
    }
}

fn cmd_config_show() -> Result<String, String> {
    let context = load_context()?;
    let settings = &context.settings;
    Ok(format!(
        "config={}\nconfig_exists={}\nwebhook_url={}\nredirect_url={}\ntransition_delay_ms={}\nrequest_timeout_secs={}\nflow={}\nfooter_brand={}\nlog={}",
        context.paths.settings_file().display(),
        context.paths.settings_file().exists(),
        settings.webhook_url,
        settings.redirect_url,
        settings.transition_delay_ms,
        settings.request_timeout_secs,
        context.flow_source(),
        settings.footer_brand,
        context.paths.log_path().display(),
    ))
}
