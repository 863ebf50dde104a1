//! Install Marker
//!
//! 설치 단위 식별자 `<random-uuid>$<vendor-identifier>`를 앱 전용 저장소의
//! `sessionData.val` 파일에 한 번만 기록하고, 첫 로드 이후에는 메모리에 캐시합니다.
//!
//! 캐시와 파일 접근은 FIFO 공정성을 갖는 단일 mutex(`tokio::sync::Mutex`)로 직렬화됩니다.
//! 파일 작업 자체는 `spawn_blocking`으로 런타임 워커 밖에서 실행됩니다.
//! 앱 시작 직후 여러 호출자가 동시에 marker를 요청해도 파일이 두 번 생성되지 않습니다.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use uuid::Uuid;

/// marker 파일 이름
pub const MARKER_FILE_NAME: &str = "sessionData.val";

/// marker 구성 요소 구분자
pub const MARKER_SEPARATOR: char = '$';

#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Vendor identifier unavailable")]
    VendorIdentifierUnavailable,

    #[error("Marker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct InstallMarkerProvider {
    path: PathBuf,
    vendor_identifier: Option<String>,
    cached: Mutex<Option<String>>,
}

impl InstallMarkerProvider {
    pub fn new(data_dir: &Path, vendor_identifier: Option<String>) -> Self {
        Self {
            path: marker_path(data_dir),
            vendor_identifier,
            cached: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// marker 파일이 없으면 생성
    ///
    /// 실패는 로그만 남기고 그대로 돌려줍니다. 재시도하지 않습니다.
    pub async fn ensure(&self) -> Result<(), MarkerError> {
        let _guard = self.cached.lock().await;
        let path = self.path.clone();
        let vendor = self.vendor_identifier.clone();
        run_blocking(move || ensure_file(&path, vendor.as_deref())).await
    }

    /// marker 값 조회 (캐시 → 파일 순)
    pub async fn get(&self) -> Result<String, MarkerError> {
        let mut cached = self.cached.lock().await;
        if let Some(value) = cached.as_ref() {
            return Ok(value.clone());
        }

        let path = self.path.clone();
        let vendor = self.vendor_identifier.clone();
        let value = run_blocking(move || {
            // 생성 실패는 ensure_file 안에서 이미 로그됨. 읽기 결과가 최종 판단.
            let _ = ensure_file(&path, vendor.as_deref());
            fs::read_to_string(&path).map_err(|e| {
                tracing::debug!(path = %path.display(), error = %e, "failed to read install marker");
                MarkerError::Io(e)
            })
        })
        .await?;

        *cached = Some(value.clone());
        Ok(value)
    }
}

// 파일 작업은 blocking 풀에서. 호출자는 mutex를 잡은 채 기다림
async fn run_blocking<T, F>(work: F) -> Result<T, MarkerError>
where
    F: FnOnce() -> Result<T, MarkerError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

fn ensure_file(path: &Path, vendor_identifier: Option<&str>) -> Result<(), MarkerError> {
    if path.exists() {
        return Ok(());
    }

    let result = vendor_identifier
        .ok_or(MarkerError::VendorIdentifierUnavailable)
        .and_then(|vendor| write_marker_atomically(path, &generate_marker(vendor)));

    match &result {
        Ok(()) => tracing::info!(path = %path.display(), "install marker created"),
        Err(e) => tracing::debug!(path = %path.display(), error = %e, "failed to create install marker"),
    }
    result
}

/// 앱 데이터 디렉토리 기반 marker 경로
pub fn marker_path(data_dir: &Path) -> PathBuf {
    data_dir.join(MARKER_FILE_NAME)
}

/// 새 marker 값 생성
pub fn generate_marker(vendor_identifier: &str) -> String {
    let random = Uuid::new_v4().to_string().to_uppercase();
    format!("{}{}{}", random, MARKER_SEPARATOR, vendor_identifier)
}

// Atomic write: 임시 파일에 쓰고 rename
fn write_marker_atomically(path: &Path, value: &str) -> Result<(), MarkerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("val.tmp");
    let mut file = open_protected(&tmp_path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

// 소유자만 읽고 쓸 수 있는 파일
#[cfg(unix)]
fn open_protected(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_protected(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}
