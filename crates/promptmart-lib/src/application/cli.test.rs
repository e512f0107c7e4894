use super::*;
use clap::Parser;

#[test]
fn test_requires_auth_gates_profile_commands_only() {
    assert!(Commands::Profile { set: vec![] }.requires_auth());
    assert!(Commands::Passwd.requires_auth());

    assert!(!Commands::Login.requires_auth());
    assert!(!Commands::Register.requires_auth());
    assert!(!Commands::Logout.requires_auth());
    assert!(
        !Commands::Tools {
            id: None,
            category: None,
            search: None,
            categories: false
        }
        .requires_auth()
    );
    assert!(
        !Commands::Prompts {
            id: None,
            category: None,
            search: None,
            categories: false,
            mine: false,
            purchased: false
        }
        .requires_auth()
    );
    assert!(
        !Commands::Purchase {
            prompt_id: "7".to_string()
        }
        .requires_auth()
    );
}

#[test]
fn test_command_names_match_cli_surface() {
    assert_eq!(Commands::Login.name(), "login");
    assert_eq!(Commands::Profile { set: vec![] }.name(), "profile");
    assert_eq!(Commands::Passwd.name(), "passwd");
}

#[test]
fn test_parse_tools_with_filters() {
    let cli = Cli::try_parse_from([
        "promptmart",
        "tools",
        "--category",
        "vision",
        "--search",
        "upscale",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Tools {
            category, search, ..
        }) => {
            assert_eq!(category.as_deref(), Some("vision"));
            assert_eq!(search.as_deref(), Some("upscale"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_profile_set_pairs() {
    let cli = Cli::try_parse_from([
        "promptmart",
        "profile",
        "--set",
        "bio=prompt enjoyer",
        "--set",
        "website=example.com",
    ])
    .unwrap();

    match cli.command {
        Some(Commands::Profile { set }) => {
            assert_eq!(set, vec!["bio=prompt enjoyer", "website=example.com"]);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_global_config_flags() {
    let cli = Cli::try_parse_from([
        "promptmart",
        "--api-url",
        "https://api.example.com/v1",
        "--net-timeout-ms",
        "2500",
        "tools",
    ])
    .unwrap();

    assert_eq!(cli.config.api_url, "https://api.example.com/v1");
    assert_eq!(cli.config.net_timeout_ms, 2500);
}

#[test]
fn test_refund_reason_requires_refund() {
    let result = Cli::try_parse_from(["promptmart", "orders", "--reason", "dup"]);
    assert!(result.is_err());
}
