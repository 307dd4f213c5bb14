//! Library integration tests.

use rbdiag::RbdiagError;

#[test]
fn error_types_are_public() {
    let err = RbdiagError::UnknownGemCommand {
        name: "frobnicate".into(),
    };
    assert_eq!(err.to_string(), "frobnicate is not a valid gem command!");
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> rbdiag::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use rbdiag::cli::{Cli, Commands};
    use clap::Parser;

    let cli = Cli::parse_from(["rbdiag", "report", "ruby", "--no-redact"]);
    if let Some(Commands::Report(args)) = cli.command {
        assert_eq!(args.sections, vec!["ruby"]);
        assert!(args.no_redact);
    } else {
        panic!("Expected Report command");
    }
}

#[test]
fn selection_parsing_is_public() {
    use rbdiag::report::{parse_selection, SectionKind};

    let selection = parse_selection(&["gem", "bogus"]);
    assert!(selection.contains(&SectionKind::GemSettings));
    assert!(selection.contains(&SectionKind::GemEnv));
    assert!(selection.contains(&SectionKind::GemList));
    assert_eq!(selection.len(), 3);
}
