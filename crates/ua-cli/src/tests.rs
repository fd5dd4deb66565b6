//! Unit tests for the usim2asim binary.

#[cfg(test)]
mod args {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::cli::{Cli, Commands};

    #[test]
    fn run_with_output_override() {
        let cli = Cli::try_parse_from(["usim2asim", "run", "conf.toml", "--output-dir", "out"]).unwrap();
        match cli.command {
            Commands::Run { config, output_dir } => {
                assert_eq!(config, PathBuf::from("conf.toml"));
                assert_eq!(output_dir, Some(PathBuf::from("out")));
            }
            other => panic!("parsed as {other:?}"),
        }
    }

    #[test]
    fn run_without_override() {
        let cli = Cli::try_parse_from(["usim2asim", "run", "conf.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Run { output_dir: None, .. }));
    }

    #[test]
    fn validate_takes_a_config() {
        let cli = Cli::try_parse_from(["usim2asim", "validate", "conf.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { .. }));
        assert!(Cli::try_parse_from(["usim2asim", "validate"]).is_err());
        assert!(Cli::try_parse_from(["usim2asim"]).is_err());
    }
}

#[cfg(test)]
mod log_level {
    use log::LevelFilter;

    use crate::log::{parse_level, resolve_level};

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(parse_level("WARN").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn environment_beats_config_beats_default() {
        assert_eq!(resolve_level(Some("debug".into()), Some("warn")).unwrap(), LevelFilter::Debug);
        assert_eq!(resolve_level(None, Some("warn")).unwrap(), LevelFilter::Warn);
        assert_eq!(resolve_level(None, None).unwrap(), LevelFilter::Info);
    }
}
