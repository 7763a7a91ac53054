use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod config;
pub mod flow;
pub mod inspect;
pub mod run;
pub mod walk;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Run => run::cmd_run(),
        CliVerb::Walk => walk::cmd_walk(&args[1..]),
        CliVerb::Flow => flow::cmd_flow(&args[1..]),
        CliVerb::Progress => inspect::cmd_progress(&args[1..]),
        CliVerb::Phone => inspect::cmd_phone(&args[1..]),
        CliVerb::Config => config::cmd_config(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
