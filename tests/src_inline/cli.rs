use clap::Parser;

use super::*;

#[test]
fn test_run_requires_input_and_out() {
    assert!(Cli::try_parse_from(["kira-pathways", "run", "--input", "r.json"]).is_err());
    let cli = Cli::try_parse_from(["kira-pathways", "run", "--input", "r.json", "--out", "out"]).unwrap();
    assert!(!cli.verbose);
    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.input, PathBuf::from("r.json"));
            assert!(args.validate.is_none());
            let overrides = args.overrides();
            assert!(overrides.panel.is_none());
            assert!(overrides.threads.is_none());
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn test_run_flags_become_overrides() {
    let cli = Cli::parse_from([
        "kira-pathways",
        "run",
        "--input",
        "r.tsv.gz",
        "--out",
        "out",
        "--panel",
        "neuro_amino",
        "--validate",
        "strict",
        "--threads",
        "2",
        "-v",
    ]);
    assert!(cli.verbose);
    match cli.command {
        Commands::Run(args) => {
            let overrides = args.overrides();
            assert_eq!(overrides.panel.as_deref(), Some("neuro_amino"));
            assert_eq!(overrides.validation, Some(ValidationMode::Strict));
            assert_eq!(overrides.threads, Some(2));
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn test_panel_and_panel_file_conflict() {
    let parsed = Cli::try_parse_from([
        "kira-pathways",
        "run",
        "--input",
        "r.json",
        "--out",
        "out",
        "--panel",
        "neuro_amino",
        "--panel-file",
        "p.txt",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn test_registry_and_panels_subcommands() {
    let cli = Cli::parse_from(["kira-pathways", "registry", "show", "A1_TCA"]);
    match cli.command {
        Commands::Registry(RegistryArgs {
            command: RegistryCommand::Show(show),
        }) => assert_eq!(show.id, "A1_TCA"),
        _ => panic!("expected registry show"),
    }

    let cli = Cli::parse_from(["kira-pathways", "panels", "audit", "--panel", "neuro_amino"]);
    match cli.command {
        Commands::Panels(PanelsArgs {
            command: PanelsCommand::Audit(audit),
        }) => assert_eq!(audit.panel.as_deref(), Some("neuro_amino")),
        _ => panic!("expected panels audit"),
    }
}
