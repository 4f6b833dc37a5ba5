//! Request supersession
//!
//! Each session holds one slot per [`RequestKind`]. Starting a request bumps
//! the slot's generation; a request still in flight when the generation moves
//! on resolves to [`ClientError::Superseded`] and its result is dropped.

use std::future::Future;
use tokio::sync::watch;

use super::error::{ClientError, ClientResult};

/// Kinds of backend request that supersede each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Login,
    Register,
    Predict,
    Config,
}

impl RequestKind {
    const ALL: [RequestKind; 4] = [
        RequestKind::Login,
        RequestKind::Register,
        RequestKind::Predict,
        RequestKind::Config,
    ];

    fn index(self) -> usize {
        match self {
            RequestKind::Login => 0,
            RequestKind::Register => 1,
            RequestKind::Predict => 2,
            RequestKind::Config => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Login => "login",
            RequestKind::Register => "register",
            RequestKind::Predict => "predict",
            RequestKind::Config => "config",
        }
    }
}

/// Per-session supersession slots
#[derive(Debug)]
pub struct RequestGuards {
    slots: [watch::Sender<u64>; 4],
}

impl Default for RequestGuards {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestGuards {
    pub fn new() -> Self {
        Self {
            slots: RequestKind::ALL.map(|_| watch::channel(0).0),
        }
    }

    /// Current generation of `kind`
    pub fn generation(&self, kind: RequestKind) -> u64 {
        *self.slots[kind.index()].borrow()
    }

    /// Start a request of `kind`, superseding any in flight
    pub fn begin(&self, kind: RequestKind) -> RequestToken {
        let slot = &self.slots[kind.index()];
        slot.send_modify(|g| *g += 1);
        let generation = *slot.borrow();
        RequestToken {
            kind,
            generation,
            rx: slot.subscribe(),
        }
    }

    /// Run `fut` as the latest request of `kind`
    pub async fn run<T, F>(&self, kind: RequestKind, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        self.begin(kind).run(fut).await
    }
}

/// Handle for one in-flight request
#[derive(Debug)]
pub struct RequestToken {
    kind: RequestKind,
    generation: u64,
    rx: watch::Receiver<u64>,
}

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        *self.rx.borrow() == self.generation
    }

    /// Drive `fut` unless a newer request of the same kind starts first
    pub async fn run<T, F>(mut self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let generation = self.generation;
        let kind = self.kind;

        let result = tokio::select! {
            result = fut => result,
            _ = self.rx.wait_for(|g| *g != generation) => Err(ClientError::Superseded),
        };

        match result {
            Ok(_) if !self.is_current() => {
                tracing::debug!(kind = kind.as_str(), generation, "Dropping superseded response");
                Err(ClientError::Superseded)
            }
            Err(ClientError::Superseded) => {
                tracing::debug!(kind = kind.as_str(), generation, "Request superseded");
                Err(ClientError::Superseded)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_single_request_completes() {
        let guards = RequestGuards::new();
        let result = guards.run(RequestKind::Predict, async { Ok(7) }).await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(guards.generation(RequestKind::Predict), 1);
    }

    #[tokio::test]
    async fn test_newer_request_supersedes_older() {
        let guards = Arc::new(RequestGuards::new());

        let older = {
            let guards = Arc::clone(&guards);
            tokio::spawn(async move {
                guards
                    .run(RequestKind::Predict, async {
                        tokio::time::sleep(Duration::from_secs(5)).await;
                        Ok("old")
                    })
                    .await
            })
        };

        // Let the older request register before starting the newer one
        tokio::time::sleep(Duration::from_millis(20)).await;
        let newer = guards.run(RequestKind::Predict, async { Ok("new") }).await;

        assert_eq!(newer.unwrap(), "new");
        let older = older.await.unwrap();
        assert!(matches!(older, Err(ClientError::Superseded)));
    }

    #[tokio::test]
    async fn test_kinds_are_independent() {
        let guards = RequestGuards::new();
        let login = guards.begin(RequestKind::Login);
        let _predict = guards.begin(RequestKind::Predict);

        assert!(login.is_current());
        let result = login.run(async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_stale_token_discards_result() {
        let guards = RequestGuards::new();
        let first = guards.begin(RequestKind::Config);
        let _second = guards.begin(RequestKind::Config);

        assert!(!first.is_current());
        let result = first.run(async { Ok(1) }).await;
        assert!(matches!(result, Err(ClientError::Superseded)));
    }
}
