use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `cropcast` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cropcast",
    version,
    about = "Crop production and yield prediction"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, text, raw
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the model, encoder, and categorical column artifacts
    #[arg(long, global = true)]
    pub artifacts_dir: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            artifacts_dir: self.artifacts_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["cropcast", "--format", "json", "--verbose", "schema"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["cropcast", "schema", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["cropcast", "--format", "xml", "schema"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn predict_accepts_individual_fields() {
        let cli = Cli::try_parse_from([
            "cropcast",
            "predict",
            "--state",
            "X",
            "--district",
            "Y",
            "--crop",
            "Rice",
            "--season",
            "Kharif",
            "--area",
            "10",
        ])
        .expect("cli should parse");

        let Commands::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.crop.as_deref(), Some("Rice"));
        assert!((args.area - 10.0).abs() < f64::EPSILON);
        assert!(args.record.is_none());
    }

    #[test]
    fn predict_requires_fields_without_record() {
        let parsed = Cli::try_parse_from(["cropcast", "predict", "--state", "X"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn predict_record_conflicts_with_fields() {
        let parsed = Cli::try_parse_from([
            "cropcast",
            "predict",
            "--record",
            "{}",
            "--crop",
            "Rice",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn predict_record_alone_is_enough() {
        let cli = Cli::try_parse_from(["cropcast", "predict", "--record", r#"{"Crop":"Rice"}"#])
            .expect("cli should parse");
        assert!(matches!(cli.command, Commands::Predict(ref args) if args.record.is_some()));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["cropcast", "--artifacts-dir", "/srv/models", "schema"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.artifacts_dir.as_deref(), Some("/srv/models"));
        assert_eq!(flags.format, OutputFormat::Text);
    }
}
