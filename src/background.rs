//! 백그라운드 작업 실행기
//!
//! UI 스레드의 동기 명령이 지연 작업(푸시 요청, deep-link 알림)을 예약하는 곳입니다.
//! 생성 시점에 tokio 런타임 안이면 그 런타임을 쓰고, 아니면 전용 런타임을 만들어 소유합니다.

use std::future::Future;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

pub struct Background {
    handle: Handle,
    owned: Option<Runtime>,
}

impl Background {
    /// 현재 런타임을 쓰거나, 없으면 전용 런타임 생성
    pub fn current_or_dedicated() -> std::io::Result<Self> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self {
                handle,
                owned: None,
            });
        }

        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("appdb-background")
            .enable_all()
            .build()?;
        tracing::debug!("no ambient tokio runtime, started dedicated background runtime");

        Ok(Self {
            handle: runtime.handle().clone(),
            owned: Some(runtime),
        })
    }

    /// 전용 런타임을 소유하는지
    pub fn is_dedicated(&self) -> bool {
        self.owned.is_some()
    }

    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }
}

impl Drop for Background {
    fn drop(&mut self) {
        // 비동기 컨텍스트 안에서 drop되어도 블로킹하지 않음
        if let Some(runtime) = self.owned.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedicated_runtime_without_ambient_one() {
        let background = Background::current_or_dedicated().unwrap();
        assert!(background.is_dedicated());

        let (tx, rx) = std::sync::mpsc::channel();
        background.spawn(async move {
            tx.send(7).unwrap();
        });
        assert_eq!(rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap(), 7);
    }

    #[tokio::test]
    async fn test_reuses_ambient_runtime() {
        let background = Background::current_or_dedicated().unwrap();
        assert!(!background.is_dedicated());
        assert_eq!(background.spawn(async { 1 + 1 }).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_dedicated_runtime_can_drop_inside_async_context() {
        let background = std::thread::spawn(|| Background::current_or_dedicated().unwrap())
            .join()
            .unwrap();
        assert!(background.is_dedicated());
        drop(background);
    }
}
