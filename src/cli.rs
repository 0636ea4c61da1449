use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "fx-bar")]
#[command(about = "FX quote widget for the SwiftBar menu bar")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Settings file (dotenv format). Falls back to $FX_BAR_ENV, then ./.env
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn config_path_is_optional() {
        let cli = Cli::try_parse_from(["fx-bar"]).expect("no arguments is valid");
        assert_eq!(cli.config, None);
    }

    #[test]
    fn takes_config_path_positionally() {
        let cli = Cli::try_parse_from(["fx-bar", "/tmp/fx.env"]).expect("path is valid");
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/fx.env")));
    }

    #[test]
    fn help_is_handled_by_clap() {
        let err = Cli::try_parse_from(["fx-bar", "--help"]).expect_err("help exits early");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn rejects_unknown_flags_and_extra_paths() {
        assert!(Cli::try_parse_from(["fx-bar", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["fx-bar", "a.env", "b.env"]).is_err());
    }
}
