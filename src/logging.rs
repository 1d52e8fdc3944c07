use crate::config::ConfigError;
use crate::middleware::HandlerChain;
use serde::Deserialize;
use std::env;
use tracing::{error, info, warn, Level, span};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: Level,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
        }
    }
}

impl LogSettings {
    /// `HTRANSFORM_LOG_FORMAT`, `HTRANSFORM_LOG_LEVEL` 환경 변수에서 읽습니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        let format = match env::var("HTRANSFORM_LOG_FORMAT") {
            Ok(value) => value.parse().map_err(|reason| ConfigError::EnvVarInvalid {
                var_name: "HTRANSFORM_LOG_FORMAT".to_string(),
                value,
                reason,
            })?,
            Err(_) => LogFormat::default(),
        };

        let level = env::var("HTRANSFORM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            format,
            level: parse_log_level(level)?,
        })
    }
}

fn parse_log_level(level: String) -> Result<Level, ConfigError> {
    match level.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err(ConfigError::EnvVarInvalid {
            var_name: "HTRANSFORM_LOG_LEVEL".to_string(),
            value: level,
            reason: "유효하지 않은 로그 레벨".to_string(),
        }),
    }
}

/// 전역 tracing 구독자를 설치합니다. 이미 설치되어 있으면 에러를 반환합니다.
pub fn init_logging(settings: &LogSettings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::from_default_env().add_directive(settings.level.into());

    match settings.format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .try_init(),
    }
}

/// 요청 하나에 대한 변환 기록
#[derive(Debug)]
pub struct TransformLog {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub request_rules: usize,
    pub response_rules: usize,
    pub status_code: u16,
    pub duration_ms: u64,
    pub error: Option<String>,
}

impl TransformLog {
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            method: String::new(),
            path: String::new(),
            request_rules: 0,
            response_rules: 0,
            status_code: 0,
            duration_ms: 0,
            error: None,
        }
    }

    pub fn with_request<B>(&mut self, req: &hyper::Request<B>) {
        self.method = req.method().to_string();
        self.path = req.uri().path().to_string();
    }

    pub fn with_chain(&mut self, chain: &HandlerChain) {
        self.request_rules = chain.request_handlers().len();
        self.response_rules = chain.response_handlers().len();
    }

    pub fn with_response(&mut self, status: hyper::StatusCode) {
        self.status_code = status.as_u16();
    }

    pub fn with_error(&mut self, error: impl std::fmt::Display) {
        let error_msg = error.to_string();
        error!(
            request_id = %self.request_id,
            error = %error_msg,
            "헤더 변환 실패"
        );
        self.error = Some(error_msg);
    }
}

pub fn log_request(log: &TransformLog) {
    let level = if log.error.is_some() {
        Level::ERROR
    } else if log.status_code >= 500 {
        Level::WARN
    } else {
        Level::INFO
    };

    let span = span!(
        Level::INFO,
        "transform",
        request_id = %log.request_id,
        method = %log.method,
        path = %log.path,
        status = %log.status_code,
        duration_ms = %log.duration_ms
    );
    let _enter = span.enter();

    match level {
        Level::ERROR => error!(
            request_rules = log.request_rules,
            response_rules = log.response_rules,
            error = ?log.error,
            "Request failed"
        ),
        Level::WARN => warn!(
            request_rules = log.request_rules,
            response_rules = log.response_rules,
            "Request completed with server error"
        ),
        _ => info!(
            request_rules = log.request_rules,
            response_rules = log.response_rules,
            "Request completed successfully"
        ),
    }
}
