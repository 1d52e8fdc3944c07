use crate::rules::Rule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// 헤더 변환 미들웨어 설정
///
/// ```toml
/// [[Rules]]
/// Name = "add cookie"
/// Type = "Add"
/// Header = "Set-Cookie"
/// Value = "session=abc123; Path=/"
/// SetOnResponse = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// 선언 순서대로 적용되는 규칙 목록
    #[serde(default, rename = "Rules", alias = "rules")]
    pub rules: Vec<Rule>,
}

impl Config {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// TOML 설정에서 규칙 목록을 파싱합니다.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::TomlError { source })
    }

    /// JSON 설정에서 규칙 목록을 파싱합니다.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::JsonError { source })
    }

    /// 확장자(`.toml`, `.json`)에 따라 설정 파일을 읽습니다.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::FileError {
            path: path.display().to_string(),
            error,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvVarInvalid {
        var_name: String,
        value: String,
        reason: String,
    },
    FileError {
        path: String,
        error: std::io::Error,
    },
    UnsupportedFormat {
        path: String,
    },
    TomlError {
        source: toml::de::Error,
    },
    JsonError {
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvVarInvalid { var_name, value, reason } =>
                write!(f, "환경 변수 {} 값 {} 오류: {}", var_name, value, reason),
            Self::FileError { path, error } =>
                write!(f, "설정 파일 {} 오류: {}", path, error),
            Self::UnsupportedFormat { path } =>
                write!(f, "지원하지 않는 설정 파일 형식: {}", path),
            Self::TomlError { source } =>
                write!(f, "TOML 설정 파싱 오류: {}", source),
            Self::JsonError { source } =>
                write!(f, "JSON 설정 파싱 오류: {}", source),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileError { error, .. } => Some(error),
            Self::TomlError { source } => Some(source),
            Self::JsonError { source } => Some(source),
            _ => None,
        }
    }
}
