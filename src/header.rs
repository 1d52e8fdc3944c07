//! 헤더 테이블 기본 연산
//!
//! `HeaderMap`은 대소문자를 구분하지 않고 같은 이름의 값들을 추가 순서대로 보관합니다.
//! 모든 핸들러는 이 모듈을 통해 헤더를 추가하고 삭제합니다.

use hyper::header::{self, Entry, HeaderMap, HeaderName, HeaderValue};
use hyper::Uri;

/// 기존 값을 유지한 채 값을 하나 추가합니다.
pub fn add(headers: &mut HeaderMap, name: &HeaderName, value: HeaderValue) {
    headers.append(name.clone(), value);
}

/// 이름에 해당하는 모든 값을 삭제하고 삭제한 값의 개수를 반환합니다.
pub fn delete(headers: &mut HeaderMap, name: &HeaderName) -> usize {
    match headers.entry(name) {
        Entry::Occupied(entry) => entry.remove_entry_mult().1.count(),
        Entry::Vacant(_) => 0,
    }
}

/// 이름에 해당하는 값들을 추가 순서대로 복사합니다.
pub fn values(headers: &HeaderMap, name: &HeaderName) -> Vec<HeaderValue> {
    headers.get_all(name).iter().cloned().collect()
}

/// 요청의 호스트
///
/// `Host` 헤더가 있으면 그 값을, 없으면 URI authority를 사용합니다.
pub fn request_host(headers: &HeaderMap, uri: &Uri) -> Option<HeaderValue> {
    if let Some(host) = headers.get(header::HOST) {
        return Some(host.clone());
    }

    uri.authority()
        .and_then(|authority| HeaderValue::from_str(authority.as_str()).ok())
}

/// `Host` 헤더와 URI authority를 함께 지웁니다.
///
/// 이후 URI는 origin-form(경로와 쿼리만)이 됩니다.
pub fn clear_host(headers: &mut HeaderMap, uri: &mut Uri) {
    delete(headers, &header::HOST);

    if uri.authority().is_some() {
        let path = uri.path_and_query().map_or("/", |pq| pq.as_str()).to_string();
        if let Ok(origin) = Uri::builder().path_and_query(path).build() {
            *uri = origin;
        }
    }
}
