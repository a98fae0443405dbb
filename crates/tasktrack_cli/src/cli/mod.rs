use clap::Parser;
use std::path::PathBuf;
use tasktrack_core::config::ConfigOverrides;

/// Interactive task tracker backed by a local JSON file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Task file to use instead of the configured or default one
    #[arg(long, value_name = "PATH", env = "TASKTRACK_STORE_PATH")]
    pub store: Option<PathBuf>,

    /// Colour theme for the task table (default, noir, solarized)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            theme: self.theme.clone(),
            store_path: self
                .store
                .clone()
                .filter(|path| !path.as_os_str().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::try_parse_from(["tasktrack", "--store", "/tmp/t.json", "--theme", "noir"])
            .unwrap();
        let overrides = cli.overrides();

        assert_eq!(overrides.store_path, Some(PathBuf::from("/tmp/t.json")));
        assert_eq!(overrides.theme.as_deref(), Some("noir"));
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["tasktrack", "add"]).is_err());
    }
}
