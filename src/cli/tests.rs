use super::*;
use clap::CommandFactory;

fn parse_args(argv: &[&str]) -> Args {
    Args::try_parse_from(argv)
        .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
}

#[test]
fn command_definition_is_valid() {
    Args::command().debug_assert();
}

#[test]
fn no_subcommand_defaults_to_chat() {
    let args = parse_args(&["plugchat"]);
    assert!(args.command.is_none());
    assert!(!args.offline);
    assert!(!args.no_history);
}

#[test]
fn say_collects_every_word() {
    let args = parse_args(&["plugchat", "say", "what", "does", "-ish", "mean"]);
    match args.command {
        Some(Commands::Say { text }) => assert_eq!(text, ["what", "does", "-ish", "mean"]),
        _ => panic!("expected say subcommand"),
    }
}

#[test]
fn global_flags_work_after_subcommand() {
    let args = parse_args(&[
        "plugchat",
        "skills",
        "--offline",
        "--config",
        "/tmp/plugchat.toml",
        "--log",
        "/tmp/plugchat.log",
    ]);
    assert!(matches!(args.command, Some(Commands::Skills)));
    assert!(args.offline);
    assert_eq!(args.config, Some(PathBuf::from("/tmp/plugchat.toml")));
    assert_eq!(args.log, Some(PathBuf::from("/tmp/plugchat.log")));
}

#[test]
fn set_without_key_lists_settings() {
    let args = parse_args(&["plugchat", "set"]);
    match args.command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, None);
            assert!(value.is_empty());
        }
        _ => panic!("expected set subcommand"),
    }
}

#[test]
fn set_joins_multi_word_values() {
    let args = parse_args(&["plugchat", "set", "history-file", "/tmp/my", "chat.json"]);
    match args.command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key.as_deref(), Some("history-file"));
            assert_eq!(value, ["/tmp/my", "chat.json"]);
        }
        _ => panic!("expected set subcommand"),
    }
}

#[test]
fn unset_requires_key() {
    assert!(Args::try_parse_from(["plugchat", "unset"]).is_err());
    let args = parse_args(&["plugchat", "unset", "tier-timeout"]);
    assert!(matches!(
        args.command,
        Some(Commands::Unset { key }) if key == "tier-timeout"
    ));
}

#[test]
fn session_options_follow_flags() {
    let args = parse_args(&["plugchat", "--no-history", "--offline", "say", "hi"]);
    let options = args.session_options();
    assert!(options.offline);
    assert!(options.no_history);
    assert_eq!(options.config_path, None);

    let options = parse_args(&["plugchat", "chat"]).session_options();
    assert!(!options.offline);
    assert!(!options.no_history);
}

#[test]
fn clear_always_targets_the_history_file() {
    let options = parse_args(&["plugchat", "clear", "--no-history"]).session_options();
    assert!(!options.no_history);
    assert!(options.offline);
}

#[test]
fn skills_never_touches_history_or_network() {
    let options = parse_args(&["plugchat", "skills"]).session_options();
    assert!(options.no_history);
    assert!(options.offline);
}
