use campus_config::CampusConfig;
use figment::Jail;

#[test]
fn env_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("CAMPUS_DATABASE__PATH", ":memory:");
        jail.set_env("CAMPUS_GENERAL__DEFAULT_LIMIT", "5");
        jail.set_env("CAMPUS_STORAGE__JOURNAL_DIR", "journal");

        let config = CampusConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        assert_eq!(config.general.default_limit, 5);
        assert_eq!(
            config.storage.journal_path(),
            Some(std::path::PathBuf::from("journal"))
        );
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".campus")?;
        jail.create_file(
            ".campus/config.toml",
            r#"
[openai]
grading_model = "from-toml"
"#,
        )?;
        jail.set_env("CAMPUS_OPENAI__GRADING_MODEL", "from-env");

        let config = CampusConfig::load().expect("config loads");
        assert_eq!(config.openai.grading_model, "from-env");
        Ok(())
    });
}

#[test]
fn openai_api_key_fallback() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "sk-plain");

        let config = CampusConfig::load().expect("config loads");
        assert_eq!(config.openai.api_key, "sk-plain");
        assert!(config.require_openai().is_ok());
        Ok(())
    });
}

#[test]
fn prefixed_key_beats_plain_key() {
    Jail::expect_with(|jail| {
        jail.set_env("OPENAI_API_KEY", "sk-plain");
        jail.set_env("CAMPUS_OPENAI__API_KEY", "sk-prefixed");

        let config = CampusConfig::load().expect("config loads");
        assert_eq!(config.openai.api_key, "sk-prefixed");
        Ok(())
    });
}
