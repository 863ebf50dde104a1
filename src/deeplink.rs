//! Deep-link 처리
//!
//! `appdb.*://...&deeplink=<percent-encoded>&...` 형태의 URL을 다룹니다.
//!
//! 스킴 판별은 `url` 크레이트로 하지만, 인자 분해는 기존 동작을 그대로 유지합니다:
//! `://` 뒤 문자열을 `&`로 자르고 각 조각을 `=`로 나눠 첫 조각을 키, 마지막 조각을 값으로 씁니다.
//! 값 안의 `=`나 `&`는 이스케이프되지 않으므로 `a=b=c`는 `{a: "c"}`가 됩니다 (알려진 한계).

use std::collections::HashMap;

use url::Url;

/// SDK로 넘길 URL 스킴 접두사
pub const APPDB_SCHEME_PREFIX: &str = "appdb.";

/// 사용자에게 보여줄 값이 담긴 인자 이름
pub const DEEPLINK_KEY: &str = "deeplink";

const UNKNOWN: &str = "Unknown";

/// URL 문자열을 인자 맵으로 분해
///
/// 같은 키가 여러 번 나오면 마지막 값이 남습니다. `=`가 없는 조각은 키와 값이 같습니다.
pub fn deeplink_url_to_map(url: &str) -> HashMap<String, String> {
    let path = url.rsplit("://").next().unwrap_or(url);

    path.split('&')
        .map(|arg| {
            let key = arg.split('=').next().unwrap_or(arg);
            let value = arg.rsplit('=').next().unwrap_or(arg);
            (key.to_string(), value.to_string())
        })
        .collect()
}

/// appdb SDK가 처리해야 하는 URL인지
pub fn is_appdb_url(url: &Url) -> bool {
    url.scheme().starts_with(APPDB_SCHEME_PREFIX)
}

// `urlencoding::decode`는 잘못된 `%` 시퀀스를 그대로 통과시킴
fn has_valid_escapes(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            if !matches!(hex, Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// 외부에서 열린 URL 하나에 대한 해석 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenUrlRequest {
    pub raw: String,
    pub source_application: String,
    pub url: Option<Url>,
    pub args: HashMap<String, String>,
}

impl OpenUrlRequest {
    pub fn parse(raw: &str, source_application: Option<&str>) -> Self {
        let url = match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!(url = raw, error = %e, "opened URL is not a valid absolute URL");
                None
            }
        };

        Self {
            raw: raw.to_string(),
            source_application: source_application.unwrap_or(UNKNOWN).to_string(),
            url,
            args: deeplink_url_to_map(raw),
        }
    }

    /// SDK로 전달할 URL (appdb 스킴일 때만)
    pub fn appdb_url(&self) -> Option<&Url> {
        self.url.as_ref().filter(|url| is_appdb_url(url))
    }

    /// percent-decoding된 deeplink 값
    ///
    /// 키가 없으면 `None`, 디코딩에 실패하면 `"Unknown"`.
    /// 잘못된 이스케이프(`%` 뒤에 hex 두 자리가 없음)와 UTF-8이 아닌 결과 모두 실패입니다.
    pub fn deeplink(&self) -> Option<String> {
        self.args.get(DEEPLINK_KEY).map(|value| {
            if !has_valid_escapes(value) {
                return UNKNOWN.to_string();
            }
            match urlencoding::decode(value) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => UNKNOWN.to_string(),
            }
        })
    }

    /// 알림 본문: `(<source>) <deeplink>`
    pub fn alert_message(&self) -> Option<String> {
        self.deeplink()
            .map(|deeplink| format!("({}) {}", self.source_application, deeplink))
    }
}
