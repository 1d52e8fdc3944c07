use super::{header_name, header_value, missing, Target};
use crate::rules::{Rule, RuleError, RuleType};
use hyper::header::{HeaderName, HeaderValue};

/// 값 목록을 구분자로 이어 헤더를 덮어쓰는 핸들러
#[derive(Debug)]
pub struct Join {
    rule: Rule,
    header: HeaderName,
    joined: HeaderValue,
}

impl Join {
    pub fn new(rule: Rule) -> Result<Self, RuleError> {
        if rule.header.is_empty() || rule.values.is_empty() || rule.sep.is_empty() {
            return Err(missing(&rule, RuleType::Join, "Header, Values, Sep"));
        }

        let header = header_name(&rule, &rule.header)?;
        let joined = header_value(&rule, &rule.values.join(&rule.sep))?;

        Ok(Self { rule, header, joined })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn handle(&self, mut target: Target<'_>) {
        target.headers_mut().insert(self.header.clone(), self.joined.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderMap;
    use hyper::Uri;

    #[test]
    fn test_join_replaces_prior_values() {
        let mut headers = HeaderMap::new();
        headers.append("x-joined", HeaderValue::from_static("old1"));
        headers.append("x-joined", HeaderValue::from_static("old2"));
        let mut uri = Uri::from_static("/");

        let handler = Join::new(
            Rule::new(RuleType::Join, "X-Joined")
                .with_values(["a", "b", "c"])
                .with_sep("-"),
        )
        .unwrap();
        handler.handle(Target::Request { headers: &mut headers, uri: &mut uri });

        let values: Vec<_> = headers.get_all("x-joined").iter().collect();
        assert_eq!(values, vec!["a-b-c"]);
    }

    #[test]
    fn test_validation() {
        let cases = vec![
            Rule::new(RuleType::Join, "").with_values(["a"]).with_sep(","),
            Rule::new(RuleType::Join, "X").with_sep(","),
            Rule::new(RuleType::Join, "X").with_values(["a"]),
        ];
        for rule in cases {
            assert!(matches!(
                Join::new(rule),
                Err(RuleError::MissingRequiredFields { .. })
            ));
        }

        assert!(matches!(
            Join::new(Rule::new(RuleType::Join, "X").with_values(["a", "b"]).with_sep("\r\n")),
            Err(RuleError::InvalidHeaderValue { .. })
        ));
    }
}
