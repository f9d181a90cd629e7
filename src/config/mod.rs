pub mod local;
pub mod toml_config;

pub const DEFAULT_REFERENCE_PATH: &str = "chroma74.bin";
pub const DEFAULT_CANDIDATE_PATH: &str = "last_compressed_img.bin";

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, EncodeArgs};

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::TomlConfig;
    use super::{DEFAULT_CANDIDATE_PATH, DEFAULT_REFERENCE_PATH};
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::{Args, Parser, Subcommand};
    use serde::{Deserialize, Serialize};

    /// Paths given on the command line win over the configuration file, which
    /// wins over the built-in defaults.
    #[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
    #[command(name = "bincmp")]
    #[command(about = "Compare two binary files byte by byte")]
    #[command(args_conflicts_with_subcommands = true)]
    pub struct CliConfig {
        #[command(subcommand)]
        pub command: Option<Command>,

        #[arg(help = "Reference file [default: chroma74.bin]")]
        pub reference_path: Option<String>,

        #[arg(help = "Candidate file [default: last_compressed_img.bin]")]
        pub candidate_path: Option<String>,

        #[arg(long, global = true, help = "Directory relative input paths are resolved against [default: .]")]
        pub base_dir: Option<String>,

        #[arg(short, long, global = true, help = "TOML configuration file")]
        pub config: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Log CPU and memory usage per phase")]
        pub monitor: bool,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
    pub enum Command {
        /// Encode a 1bpp BMP into a framed, arithmetic-coded image
        Encode(EncodeArgs),
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Args)]
    pub struct EncodeArgs {
        #[arg(help = "Uncompressed 1bpp BMP")]
        pub input: String,

        #[arg(default_value = DEFAULT_CANDIDATE_PATH, help = "Framed output file")]
        pub output: String,
    }

    impl CliConfig {
        /// Loads `--config` when given and fills in whatever the command line left unset.
        pub fn load_config_file(&mut self) -> Result<()> {
            if let Some(path) = &self.config {
                let toml = TomlConfig::from_file(path)?;
                toml.validate()?;
                self.merge_toml(toml);
            }
            Ok(())
        }

        pub fn merge_toml(&mut self, toml: TomlConfig) {
            self.monitor |= toml.monitoring_enabled();
            let inputs = toml.inputs;
            self.reference_path = self.reference_path.take().or(inputs.reference_path);
            self.candidate_path = self.candidate_path.take().or(inputs.candidate_path);
            self.base_dir = self.base_dir.take().or(inputs.base_dir);
        }

        pub fn base_dir(&self) -> &str {
            self.base_dir.as_deref().unwrap_or(".")
        }
    }

    impl ConfigProvider for CliConfig {
        fn reference_path(&self) -> &str {
            self.reference_path.as_deref().unwrap_or(DEFAULT_REFERENCE_PATH)
        }

        fn candidate_path(&self) -> &str {
            self.candidate_path.as_deref().unwrap_or(DEFAULT_CANDIDATE_PATH)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("reference_path", self.reference_path())?;
            validation::validate_path("candidate_path", self.candidate_path())?;
            validation::validate_path("base_dir", self.base_dir())?;
            if let Some(Command::Encode(args)) = &self.command {
                validation::validate_path("input", &args.input)?;
                validation::validate_path("output", &args.output)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::utils::error::CompareError;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_no_arguments_uses_fixed_paths() {
            let config = CliConfig::parse_from(["bincmp"]);

            assert_eq!(config.reference_path(), "chroma74.bin");
            assert_eq!(config.candidate_path(), "last_compressed_img.bin");
            assert_eq!(config.base_dir(), ".");
            assert!(!config.verbose);
            assert!(!config.monitor);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_positional_paths_and_flags() {
            let config = CliConfig::parse_from([
                "bincmp",
                "a.bin",
                "b.bin",
                "--base-dir",
                "/tmp/data",
                "-v",
                "--monitor",
            ]);

            assert_eq!(config.reference_path(), "a.bin");
            assert_eq!(config.candidate_path(), "b.bin");
            assert_eq!(config.base_dir(), "/tmp/data");
            assert!(config.verbose);
            assert!(config.monitor);
        }

        #[test]
        fn test_command_line_wins_over_config_file() {
            let toml = TomlConfig::from_toml_str(
                r#"
[inputs]
reference_path = "toml_ref.bin"
candidate_path = "toml_cand.bin"
base_dir = "/srv"

[monitoring]
enabled = true
"#,
            )
            .unwrap();

            let mut config = CliConfig::parse_from(["bincmp", "cli_ref.bin"]);
            config.merge_toml(toml);

            assert_eq!(config.reference_path(), "cli_ref.bin");
            assert_eq!(config.candidate_path(), "toml_cand.bin");
            assert_eq!(config.base_dir(), "/srv");
            assert!(config.monitor);
        }

        #[test]
        fn test_empty_path_fails_validation() {
            let config = CliConfig::parse_from(["bincmp", "", "b.bin"]);
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_config_file_values_are_validated_on_load() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(b"[inputs]\nreference_path = \"\"\n").unwrap();

            let mut config = CliConfig::parse_from(["bincmp", "a.bin", "b.bin"]);
            config.config = Some(file.path().display().to_string());

            match config.load_config_file() {
                Err(CompareError::InvalidConfigValueError { field, .. }) => {
                    assert_eq!(field, "inputs.reference_path");
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }

        #[test]
        fn test_encode_subcommand_with_global_flags() {
            let config = CliConfig::parse_from([
                "bincmp",
                "encode",
                "img.bmp",
                "-v",
                "--base-dir",
                "data",
            ]);

            match &config.command {
                Some(Command::Encode(args)) => {
                    assert_eq!(args.input, "img.bmp");
                    assert_eq!(args.output, "last_compressed_img.bin");
                }
                None => panic!("encode subcommand not parsed"),
            }
            assert!(config.verbose);
            assert_eq!(config.base_dir(), "data");
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_encode_output_path_is_validated() {
            let config = CliConfig::parse_from(["bincmp", "encode", "img.bmp", ""]);
            assert!(config.validate().is_err());
        }
    }
}
