use super::{header_name, Target};
use crate::header;
use crate::rules::{Rule, RuleError};
use hyper::header::{HeaderName, HOST};
use tracing::debug;

/// 헤더 삭제 핸들러
///
/// 빈 `Header`도 허용하며 이 경우 아무것도 지우지 않습니다.
#[derive(Debug)]
pub struct Delete {
    rule: Rule,
    header: Option<HeaderName>,
}

impl Delete {
    pub fn new(rule: Rule) -> Result<Self, RuleError> {
        let header = if rule.header.is_empty() {
            None
        } else {
            Some(header_name(&rule, &rule.header)?)
        };

        Ok(Self { rule, header })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn handle(&self, target: Target<'_>) {
        let Some(name) = &self.header else {
            return;
        };

        match target {
            // Host는 헤더 테이블과 요청 대상 양쪽에서 지워야 합니다
            Target::Request { headers, uri } if *name == HOST => {
                header::clear_host(headers, uri);
                debug!(rule = %self.rule.display_name(), "요청 호스트 삭제");
            }
            Target::Request { headers, .. } | Target::Response { headers, .. } => {
                let removed = header::delete(headers, name);
                debug!(rule = %self.rule.display_name(), header = %name, removed, "헤더 삭제");
            }
        }
    }
}
