use header_transform::config::{Config, ConfigError};
use header_transform::middleware::{HeaderTransformation, Request, Response};
use header_transform::rules::{Rule, RuleType};

// 테스트용 임시 설정 파일 생성 헬퍼
fn create_test_file(name: &str, content: &str) -> (std::path::PathBuf, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join(name);
    std::fs::write(&file_path, content).unwrap();
    (file_path, dir)
}

const TOML_CONFIG: &str = r#"
    [[Rules]]
    Name = "rename referer"
    Type = "Rename"
    Header = "Referer"
    Value = "Origin"

    [[Rules]]
    Name = "join"
    Type = "Join"
    Header = "X-Joined"
    Values = ["a", "b", "c"]
    Sep = "-"

    [[Rules]]
    Name = "cookie"
    Type = "Add"
    Header = "Set-Cookie"
    Value = "session=abc123; Path=/"
    SetOnResponse = true
"#;

#[test]
fn test_config_from_toml() {
    let config = Config::from_toml(TOML_CONFIG).unwrap();

    assert_eq!(config.rules.len(), 3);
    assert_eq!(
        config.rules[0],
        Rule::new(RuleType::Rename, "Referer")
            .with_name("rename referer")
            .with_value("Origin")
    );
    assert_eq!(config.rules[1].values, vec!["a", "b", "c"]);
    assert_eq!(config.rules[1].sep, "-");
    assert!(config.rules[2].set_on_response);
    assert!(!config.rules[0].set_on_response);
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "rules": [
            {
                "Name": "rewrite",
                "Type": "RewriteValueRule",
                "Header": "Header-A",
                "Value": "value([\\w\\W]+)",
                "ValueReplace": "newValue-$1"
            },
            { "Type": "Del", "Header": "Server", "SetOnResponse": true }
        ]
    }"#;

    let config = Config::from_json(json).unwrap();

    assert_eq!(config.rules.len(), 2);
    assert_eq!(config.rules[0].value, r"value([\w\W]+)");
    assert_eq!(config.rules[1].rule_type, "Del");
    assert_eq!(config.rules[1].name, "");
}

#[test]
fn test_config_empty() {
    let config = Config::from_toml("").unwrap();
    assert!(config.rules.is_empty());
}

#[test]
fn test_config_invalid_toml() {
    let result = Config::from_toml("[[Rules]]\nSetOnResponse = \"yes\"");
    assert!(matches!(result, Err(ConfigError::TomlError { .. })));
}

#[test]
fn test_config_from_file() {
    let (path, _dir) = create_test_file("rules.toml", TOML_CONFIG);
    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.rules.len(), 3);

    let (path, _dir) = create_test_file("rules.json", r#"{"Rules": [{"Type": "Set", "Header": "X", "Value": "v"}]}"#);
    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.rules[0].rule_type, "Set");

    let (path, _dir) = create_test_file("rules.yaml", "Rules: []");
    assert!(matches!(
        Config::from_file(&path),
        Err(ConfigError::UnsupportedFormat { .. })
    ));

    assert!(matches!(
        Config::from_file("/nonexistent/rules.toml"),
        Err(ConfigError::FileError { .. })
    ));
}

#[test]
fn test_config_builds_transformation() {
    let config = Config::from_toml(TOML_CONFIG).unwrap();
    let next = |_req: Request| async { Response::new(Default::default()) };

    let transform = HeaderTransformation::build(&config, next).unwrap();

    assert_eq!(transform.chain().request_handlers().len(), 2);
    assert_eq!(transform.chain().response_handlers().len(), 1);
}
