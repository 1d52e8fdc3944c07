use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 규칙 타입
///
/// 설정에는 문자열로 들어오며 핸들러 생성 시점에 파싱됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    Add,
    Delete,
    Rename,
    Join,
    RewriteValue,
    Set,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Add => "Add",
            RuleType::Delete => "Del",
            RuleType::Rename => "Rename",
            RuleType::Join => "Join",
            RuleType::RewriteValue => "RewriteValueRule",
            RuleType::Set => "Set",
        }
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Add" => Ok(RuleType::Add),
            "Del" | "Delete" => Ok(RuleType::Delete),
            "Rename" => Ok(RuleType::Rename),
            "Join" => Ok(RuleType::Join),
            "RewriteValueRule" => Ok(RuleType::RewriteValue),
            "Set" => Ok(RuleType::Set),
            _ => Err(format!("Invalid rule type: {}", s)),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 헤더 변환 규칙 하나
///
/// 필드 이름은 Traefik 플러그인 설정과 같은 PascalCase를 사용합니다.
///
/// ```toml
/// [[rules]]
/// Name = "rename referer"
/// Type = "Rename"
/// Header = "Referer"
/// Value = "Origin"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Rule {
    /// 진단용 이름 (중복 허용)
    pub name: String,

    /// 규칙 타입 문자열
    #[serde(rename = "Type")]
    pub rule_type: String,

    /// 대상 헤더 이름
    pub header: String,

    /// 값 또는 정규식 패턴
    pub value: String,

    /// 값이 이 접두사로 시작하면 나머지를 헤더 이름으로 해석
    pub header_prefix: String,

    /// Join 대상 값 목록
    pub values: Vec<String>,

    /// Join 구분자
    pub sep: String,

    /// RewriteValueRule 치환 템플릿
    pub value_replace: String,

    /// true이면 응답 헤더에 적용
    pub set_on_response: bool,
}

impl Rule {
    pub fn new(rule_type: RuleType, header: impl Into<String>) -> Self {
        Self {
            rule_type: rule_type.as_str().to_string(),
            header: header.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = prefix.into();
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sep(mut self, sep: impl Into<String>) -> Self {
        self.sep = sep.into();
        self
    }

    pub fn with_value_replace(mut self, template: impl Into<String>) -> Self {
        self.value_replace = template.into();
        self
    }

    pub fn on_response(mut self) -> Self {
        self.set_on_response = true;
        self
    }

    /// 로그와 에러 메시지에 쓸 이름. 이름이 없으면 헤더 이름을 사용합니다.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.header
        } else {
            &self.name
        }
    }
}
