use clap::{CommandFactory, Parser};
use dirnotes::config::NotesConfig;
use dirnotes::tooling::cli::{Cli, Commands};

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["dirnotes", "open", "report.txt"],
        vec!["dirnotes", "open", "--path", "/tmp/x/plan.txt"],
        vec!["dirnotes", "--dir", "/tmp", "open", "."],
        vec!["dirnotes", "open"],
        vec!["dirnotes", "goto"],
        vec!["dirnotes", "remove"],
        vec!["dirnotes", "edit"],
        vec!["dirnotes", "dirs", "--format", "json"],
        vec!["dirnotes", "--log-level", "debug", "--log-output", "stderr", "dirs"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_unknown_and_extra_arguments() {
    assert!(Cli::try_parse_from(["dirnotes"]).is_err());
    assert!(Cli::try_parse_from(["dirnotes", "delete"]).is_err());
    assert!(Cli::try_parse_from(["dirnotes", "goto", "extra"]).is_err());
}

#[test]
fn open_arguments_map_to_target_and_override() {
    let cli = Cli::try_parse_from(["dirnotes", "open", "a.txt", "--path", "/x/b.txt"]).unwrap();
    match cli.command {
        Commands::Open { target, path } => {
            assert_eq!(target.as_deref(), Some(std::path::Path::new("a.txt")));
            assert_eq!(path.as_deref(), Some(std::path::Path::new("/x/b.txt")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.dir, std::path::PathBuf::from("."));
}

#[test]
fn logging_flags_stay_separate_from_config() {
    let cli = Cli::try_parse_from([
        "dirnotes",
        "--log-level",
        "trace",
        "--log-format",
        "json",
        "--log-output",
        "stderr",
        "--log-file",
        "/tmp/dirnotes-cli.log",
        "--no-color",
        "goto",
    ])
    .unwrap();
    let overrides = cli.log_overrides();
    assert_eq!(overrides.level.as_deref(), Some("trace"));
    assert_eq!(overrides.format.as_deref(), Some("json"));
    assert_eq!(overrides.output.as_deref(), Some("stderr"));
    assert_eq!(
        overrides.file.as_deref(),
        Some(std::path::Path::new("/tmp/dirnotes-cli.log"))
    );

    let mut config = NotesConfig::default();
    cli.apply_display_overrides(&mut config);
    assert!(!config.logging.color);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.output, "file");
}

#[test]
fn absent_logging_flags_leave_overrides_empty() {
    let cli = Cli::try_parse_from(["dirnotes", "edit"]).unwrap();
    let overrides = cli.log_overrides();
    assert!(overrides.level.is_none());
    assert!(overrides.format.is_none());
    assert!(overrides.output.is_none());
    assert!(overrides.file.is_none());
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
