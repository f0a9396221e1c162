use clap::Subcommand;

/// Configuration management commands.
#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print JSON Schema for the configuration file
    Schema,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                let schema = crate::shared::config::generate_schema();
                println!("{}", serde_json::to_string_pretty(&schema)?);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    fn schema() -> serde_json::Value {
        serde_json::to_value(crate::shared::config::generate_schema()).unwrap()
    }

    #[test]
    fn schema_is_object_schema() {
        let value = schema();
        assert_eq!(value["title"], "Config");
        assert_eq!(value["type"], "object");
    }

    #[rstest]
    #[case("ApiConfig", &["base_url", "page_size", "timeout_secs", "token"])]
    #[case("VenueConfig", &["invitation", "name"])]
    #[case("StorageConfig", &["data_dir", "flush_interval"])]
    #[case("LogConfig", &["file"])]
    fn schema_contains_section_properties(#[case] def: &str, #[case] keys: &[&str]) {
        let value = schema();
        let props = value["properties"].as_object().unwrap();
        for section in ["api", "venue", "storage", "log"] {
            assert!(props.contains_key(section), "missing {section}");
        }

        let def_props = value["$defs"][def]["properties"].as_object().unwrap();
        for key in keys {
            assert!(def_props.contains_key(*key), "{def} missing {key}");
        }
    }
}
