//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed env var and cwd manipulation.

use campus_config::CampusConfig;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/campus/campus.db"

[storage]
upload_dir = "/var/lib/campus/uploads"
journal_dir = "/var/log/campus"

[openai]
api_key = "sk-toml"
grading_model = "gpt-4.1"
timeout_secs = 15

[general]
default_limit = 50
"#,
        )?;

        let config: CampusConfig = Figment::from(Serialized::defaults(CampusConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/campus/campus.db");
        assert_eq!(config.storage.upload_dir, "/var/lib/campus/uploads");
        assert!(config.storage.journal_path().is_some());
        assert_eq!(config.openai.api_key, "sk-toml");
        assert_eq!(config.openai.grading_model, "gpt-4.1");
        assert_eq!(config.openai.flashcard_model, "gpt-4o-mini");
        assert_eq!(config.openai.timeout_secs, 15);
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[openai]
base_url = "http://localhost:8080/v1"
"#,
        )?;

        let config: CampusConfig = Figment::from(Serialized::defaults(CampusConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.openai.base_url, "http://localhost:8080/v1");
        assert_eq!(config.database.path, ".campus/campus.db");
        assert_eq!(config.storage.upload_dir, ".campus/uploads");
        assert_eq!(config.general.default_limit, 20);
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".campus")?;
        jail.create_file(
            ".campus/config.toml",
            r#"
[database]
path = "project.db"
"#,
        )?;

        let config = CampusConfig::load().expect("config loads");
        assert_eq!(config.database.path, "project.db");
        Ok(())
    });
}

#[test]
fn invalid_value_is_rejected_on_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".campus")?;
        jail.create_file(
            ".campus/config.toml",
            r#"
[general]
default_limit = 0
"#,
        )?;

        let err = CampusConfig::load().unwrap_err();
        assert!(err.to_string().contains("default_limit"));
        Ok(())
    });
}
