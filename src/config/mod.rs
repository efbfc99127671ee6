pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::core::{ConfigProvider, FailurePolicy, Projection};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "book-catalog")]
    #[command(about = "Validate a JSON catalog of books and show field projections")]
    pub struct CliConfig {
        /// JSON file holding an array of book objects, relative to --base-dir
        #[arg(long, default_value = "data.json")]
        pub data: String,

        #[arg(long, default_value = ".")]
        pub base_dir: String,

        /// Directory (relative to --base-dir) to write the validated books to
        #[arg(long)]
        pub output: Option<String>,

        #[arg(long, value_enum, default_value_t = FailurePolicy::Abort)]
        pub on_invalid: FailurePolicy,

        /// Index of the record whose title and projections are printed
        #[arg(long, default_value = "1")]
        pub featured: usize,

        /// Fields to leave out of the featured record.
        /// Without --exclude or --include, shows "exclude price" and "include price,publisher"
        #[arg(long, value_delimiter = ',')]
        pub exclude: Option<Vec<String>>,

        /// Fields to keep in the featured record
        #[arg(long, value_delimiter = ',')]
        pub include: Option<Vec<String>>,

        /// TOML configuration file; replaces the other catalog flags
        #[arg(long)]
        pub config: Option<String>,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn data_path(&self) -> &str {
            &self.data
        }

        fn output_path(&self) -> Option<&str> {
            self.output.as_deref()
        }

        fn failure_policy(&self) -> FailurePolicy {
            self.on_invalid
        }

        fn featured_index(&self) -> usize {
            self.featured
        }

        fn projections(&self) -> Result<Vec<Projection>> {
            if self.exclude.is_none() && self.include.is_none() {
                return Ok(vec![
                    Projection::exclude(["price"]),
                    Projection::include(["price", "publisher"]),
                ]);
            }

            let mut projections = Vec::new();
            if let Some(fields) = &self.exclude {
                projections.push(Projection::from_parts(None, Some(fields.clone()))?);
            }
            if let Some(fields) = &self.include {
                projections.push(Projection::from_parts(Some(fields.clone()), None)?);
            }
            Ok(projections)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("data", &self.data)?;
            validation::validate_file_extension("data", &self.data, &["json"])?;
            validation::validate_path("base_dir", &self.base_dir)?;
            if let Some(output) = &self.output {
                validation::validate_path("output", output)?;
            }
            for projection in self.projections()? {
                let flag = match projection {
                    Projection::Include(_) => "include",
                    Projection::Exclude(_) => "exclude",
                };
                validation::validate_projection(flag, &projection)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_mirror_demo_projections() {
            let config = CliConfig::parse_from(["book-catalog"]);
            assert_eq!(config.data, "data.json");
            assert_eq!(config.featured, 1);
            assert_eq!(config.on_invalid, FailurePolicy::Abort);
            assert_eq!(
                config.projections().unwrap(),
                vec![
                    Projection::exclude(["price"]),
                    Projection::include(["price", "publisher"]),
                ]
            );
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_flags() {
            let config = CliConfig::parse_from([
                "book-catalog",
                "--data",
                "books.json",
                "--on-invalid",
                "skip",
                "--include",
                "title,author",
            ]);
            assert_eq!(config.failure_policy(), FailurePolicy::Skip);
            assert_eq!(
                config.projections().unwrap(),
                vec![Projection::include(["title", "author"])]
            );
        }

        #[test]
        fn test_unknown_projection_field_fails_validation() {
            let config = CliConfig::parse_from(["book-catalog", "--exclude", "isbn"]);
            assert!(config.validate().is_err());
        }
    }
}
