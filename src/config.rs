//! 앱 설정
//!
//! 환경 변수에서 읽습니다. 개발 환경에서는 `.env.local`을 먼저 로드합니다.
//! 앱 전용 저장소 경로가 없으면 시작 단계에서 실패하고, 나머지 값은 기본값이 있거나
//! 호출 시점의 복구 가능한 오류로 처리됩니다.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DATA_DIR: &str = "APPDB_SAMPLE_DATA_DIR";
pub const ENV_VENDOR_ID: &str = "APPDB_VENDOR_ID";
pub const ENV_APP_VERSION: &str = "APPDB_APP_VERSION";
pub const ENV_PUSH_ENDPOINT: &str = "APPDB_PUSH_ENDPOINT";
pub const ENV_BACKUP_SALT: &str = "APPDB_BACKUP_SALT";
pub const ENV_ACCESS_GROUP: &str = "APPDB_KEYCHAIN_ACCESS_GROUP";
pub const ENV_VAULT_BACKEND: &str = "APPDB_VAULT_BACKEND";
pub const ENV_ALERT_DELAY_MS: &str = "APPDB_ALERT_DELAY_MS";

pub const DEFAULT_PUSH_ENDPOINT: &str = "https://dbservices.to/delayed_push_for_sample_app/";
pub const DEFAULT_BACKUP_SALT: &str = "lorem ipsum";
pub const DEFAULT_ALERT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// 자격 증명 저장소 백엔드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultBackend {
    Keyring,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 앱 전용 저장소 (install marker 위치)
    pub data_dir: PathBuf,
    pub vendor_identifier: Option<String>,
    pub app_version: String,
    pub push_endpoint: url::Url,
    pub backup_salt: String,
    pub access_group: Option<String>,
    pub vault_backend: VaultBackend,
    /// 실행 직후 안내/딥링크 알림 지연
    pub alert_delay: Duration,
}

impl AppConfig {
    /// 기본값으로 채운 설정
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            data_dir: data_dir.into(),
            vendor_identifier: None,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            push_endpoint: parse_endpoint(DEFAULT_PUSH_ENDPOINT)?,
            backup_salt: DEFAULT_BACKUP_SALT.to_string(),
            access_group: None,
            vault_backend: VaultBackend::Keyring,
            alert_delay: DEFAULT_ALERT_DELAY,
        })
    }

    /// `.env.local`/`.env` 로드 후 환경 변수에서 설정 구성
    pub fn from_env() -> Result<Self, ConfigError> {
        load_env_files();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정 구성 (빈 문자열은 미설정으로 취급)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let data_dir = get(ENV_DATA_DIR).ok_or(ConfigError::Missing(ENV_DATA_DIR))?;
        let mut config = Self::new(data_dir)?;

        config.vendor_identifier = get(ENV_VENDOR_ID);
        config.access_group = get(ENV_ACCESS_GROUP);

        if let Some(version) = get(ENV_APP_VERSION) {
            config.app_version = version;
        }
        if let Some(endpoint) = get(ENV_PUSH_ENDPOINT) {
            config.push_endpoint = parse_endpoint(&endpoint)?;
        }
        if let Some(salt) = get(ENV_BACKUP_SALT) {
            config.backup_salt = salt;
        }
        if let Some(backend) = get(ENV_VAULT_BACKEND) {
            config.vault_backend = match backend.to_ascii_lowercase().as_str() {
                "keyring" => VaultBackend::Keyring,
                "memory" => VaultBackend::Memory,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: ENV_VAULT_BACKEND,
                        value: backend,
                    })
                }
            };
        }
        if let Some(delay) = get(ENV_ALERT_DELAY_MS) {
            let millis = delay.parse::<u64>().map_err(|_| ConfigError::Invalid {
                key: ENV_ALERT_DELAY_MS,
                value: delay.clone(),
            })?;
            config.alert_delay = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

fn parse_endpoint(value: &str) -> Result<url::Url, ConfigError> {
    url::Url::parse(value).map_err(|_| ConfigError::Invalid {
        key: ENV_PUSH_ENDPOINT,
        value: value.to_string(),
    })
}

/// 느슨한 로더가 받아들이는 키 접두사
const ENV_PREFIX: &str = "APPDB_";

// 같은 `.env.local`을 다른 도구와 공유하므로 이 크레이트가 읽는 키만 받음
fn is_app_env_key(key: &str) -> bool {
    let shaped = key
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
    let ours = (key.starts_with(ENV_PREFIX) && key.len() > ENV_PREFIX.len()) || key == "RUST_LOG";
    shaped && ours
}

// `[export ]KEY=VALUE` 한 줄 해석. 값을 감싼 따옴표 한 쌍은 벗김
fn parse_env_line(raw_line: &str) -> Option<(&str, &str)> {
    let line = raw_line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if !is_app_env_key(key) {
        return None;
    }

    let value = value.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)));
    Some((key, unquoted.unwrap_or(value)))
}

/// dotenvy가 거부하는 파일(마크다운 펜스, 설명 문장이 섞인 파일)용 로더
///
/// `APPDB_*`와 `RUST_LOG`만 설정하며, 이미 비어 있지 않은 값은 덮어쓰지 않습니다.
/// 설정한 키 개수를 돌려줍니다.
fn try_load_env_lenient(path: &Path) -> std::io::Result<usize> {
    let text = std::fs::read_to_string(path)?;
    let mut loaded = 0usize;

    for (key, value) in text.lines().filter_map(parse_env_line) {
        let already_set = std::env::var(key).map(|v| !v.trim().is_empty()).unwrap_or(false);
        if already_set {
            continue;
        }
        std::env::set_var(key, value);
        loaded += 1;
    }

    Ok(loaded)
}

// 시작 디렉토리부터 부모 쪽으로 최대 max_hops 단계까지 탐색
fn find_upwards(start: PathBuf, filename: &str, max_hops: usize) -> Option<PathBuf> {
    let mut cur = start;
    for _ in 0..=max_hops {
        let candidate = cur.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }
        if !cur.pop() {
            break;
        }
    }
    None
}

/// `.env.local` (CWD → 상위 → 실행 파일 위치 순) 그리고 `.env` 로드
pub fn load_env_files() {
    let mut candidates: Vec<PathBuf> = vec![];
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(p) = find_upwards(cwd, ".env.local", 6) {
            candidates.push(p);
        }
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            if let Some(p) = find_upwards(dir.to_path_buf(), ".env.local", 8) {
                candidates.push(p);
            }
        }
    }

    for p in candidates {
        if dotenvy::from_path(&p).is_ok() {
            tracing::debug!(path = %p.display(), "loaded env file");
            break;
        }
        match try_load_env_lenient(&p) {
            Ok(loaded) if loaded > 0 => {
                tracing::debug!(path = %p.display(), loaded, "loaded env file leniently");
                break;
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(path = %p.display(), error = %e, "failed to read env file"),
        }
    }

    // 없어도 무방
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_data_dir_is_startup_failure() {
        let result = AppConfig::from_lookup(lookup(&[(ENV_VENDOR_ID, "abc")]));
        assert!(matches!(result, Err(ConfigError::Missing(ENV_DATA_DIR))));

        let blank = AppConfig::from_lookup(lookup(&[(ENV_DATA_DIR, "   ")]));
        assert!(matches!(blank, Err(ConfigError::Missing(ENV_DATA_DIR))));
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DATA_DIR, "/tmp/appdb")])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/appdb"));
        assert_eq!(config.vendor_identifier, None);
        assert_eq!(config.app_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.push_endpoint.as_str(), DEFAULT_PUSH_ENDPOINT);
        assert_eq!(config.backup_salt, DEFAULT_BACKUP_SALT);
        assert_eq!(config.vault_backend, VaultBackend::Keyring);
        assert_eq!(config.alert_delay, DEFAULT_ALERT_DELAY);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DATA_DIR, "/data"),
            (ENV_VENDOR_ID, "6F9619FF-8B86-D011-B42D-00C04FC964FF"),
            (ENV_APP_VERSION, "3.1"),
            (ENV_VAULT_BACKEND, "Memory"),
            (ENV_ALERT_DELAY_MS, "0"),
            (ENV_ACCESS_GROUP, "group.sample"),
        ]))
        .unwrap();
        assert_eq!(config.app_version, "3.1");
        assert_eq!(config.vault_backend, VaultBackend::Memory);
        assert_eq!(config.alert_delay, Duration::ZERO);
        assert_eq!(config.access_group.as_deref(), Some("group.sample"));
    }

    #[test]
    fn test_invalid_values() {
        let backend = AppConfig::from_lookup(lookup(&[(ENV_DATA_DIR, "/d"), (ENV_VAULT_BACKEND, "sqlite")]));
        assert!(matches!(backend, Err(ConfigError::Invalid { key: ENV_VAULT_BACKEND, .. })));

        let endpoint = AppConfig::from_lookup(lookup(&[(ENV_DATA_DIR, "/d"), (ENV_PUSH_ENDPOINT, "not a url")]));
        assert!(matches!(endpoint, Err(ConfigError::Invalid { key: ENV_PUSH_ENDPOINT, .. })));
    }

    #[test]
    fn test_lenient_loader_skips_non_env_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.local");
        std::fs::write(
            &path,
            "# comment\n```\nexport APPDB_TEST_LENIENT_A=\"quoted\"\nnot a pair\nlower_case=x\n",
        )
        .unwrap();

        let loaded = try_load_env_lenient(&path).unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(std::env::var("APPDB_TEST_LENIENT_A").unwrap(), "quoted");
    }

    #[test]
    fn test_lenient_loader_only_sets_app_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.local");
        std::fs::write(
            &path,
            "OTHER_TOOL_TEST_TOKEN=secret\nAPPDB_=empty-suffix\nAPPDB_TEST_LENIENT_B='single'\n",
        )
        .unwrap();

        let loaded = try_load_env_lenient(&path).unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(std::env::var("APPDB_TEST_LENIENT_B").unwrap(), "single");
        assert!(std::env::var("OTHER_TOOL_TEST_TOKEN").is_err());
        assert!(std::env::var("APPDB_").is_err());
    }

    #[test]
    fn test_env_line_parsing() {
        assert_eq!(
            parse_env_line("export APPDB_VENDOR_ID = \"abc\" "),
            Some(("APPDB_VENDOR_ID", "abc"))
        );
        assert_eq!(parse_env_line("RUST_LOG=debug"), Some(("RUST_LOG", "debug")));
        assert_eq!(parse_env_line("APPDB_BACKUP_SALT=\""), Some(("APPDB_BACKUP_SALT", "\"")));
        assert_eq!(parse_env_line("# APPDB_VENDOR_ID=x"), None);
        assert_eq!(parse_env_line("```"), None);
        assert_eq!(parse_env_line("PATH=/tmp"), None);
    }
}
