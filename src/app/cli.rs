#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Run,
    Walk,
    Flow,
    Progress,
    Phone,
    Config,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "run" => CliVerb::Run,
        "walk" => CliVerb::Walk,
        "flow" => CliVerb::Flow,
        "progress" => CliVerb::Progress,
        "phone" => CliVerb::Phone,
        "config" => CliVerb::Config,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  run                                  Take the quiz in the terminal".to_string(),
        "  walk <answer>... [--name N --phone P]".to_string(),
        "                                       Answer steps non-interactively; submit a lead at the end"
            .to_string(),
        "  flow validate [PATH]                 Validate the configured flow or a flow file"
            .to_string(),
        "  flow show [STEP]                     List steps or describe one step".to_string(),
        "  flow paths                           Enumerate every route to a result".to_string(),
        "  flow export                          Print the active flow as yaml".to_string(),
        "  progress <STEP>                      Show the progress estimate for a step".to_string(),
        "  phone <digits>                       Apply the phone mask".to_string(),
        "  config show [--yaml]                 Print effective settings".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbs_parse_and_unknown_falls_through() {
        assert_eq!(parse_cli_verb("walk"), CliVerb::Walk);
        assert_eq!(parse_cli_verb("--help"), CliVerb::Help);
        assert_eq!(parse_cli_verb("setup"), CliVerb::Unknown);
    }

    #[test]
    fn help_lists_every_command() {
        let help = help_text();
        for verb in ["run", "walk", "flow validate", "flow paths", "progress", "phone", "config show"] {
            assert!(help.contains(verb), "missing {verb}");
        }
    }
}
