use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::StoreError;

/// Opens one connection: a client handle plus the task driving it.
#[async_trait]
pub(crate) trait Connector: Send + Sync {
    type Client: Send + Sync;

    async fn connect(&self) -> Result<(Self::Client, JoinHandle<()>), StoreError>;

    /// True once the driving task has ended and `client` can no longer be used.
    fn is_closed(client: &Self::Client) -> bool;
}

struct Session<T> {
    client: Arc<T>,
    driver: JoinHandle<()>,
}

/// A single shared connection, re-opened on first use after it dropped.
/// Requests made while the peer is down fail; the next one dials again.
pub(crate) struct Reconnecting<C: Connector> {
    connector: C,
    session: Mutex<Option<Session<C::Client>>>,
}

impl<C: Connector> Reconnecting<C> {
    /// Connects eagerly so that an unreachable store fails at startup.
    pub(crate) async fn open(connector: C) -> Result<Self, StoreError> {
        let (client, driver) = connector.connect().await?;
        Ok(Self {
            connector,
            session: Mutex::new(Some(Session {
                client: Arc::new(client),
                driver,
            })),
        })
    }

    pub(crate) async fn client(&self) -> Result<Arc<C::Client>, StoreError> {
        let mut session = self.session.lock().await;
        let Some(current) = session.as_mut() else {
            return Err(StoreError::Unavailable("spot store is closed".to_owned()));
        };

        if C::is_closed(&current.client) {
            warn!("spot store connection lost, reconnecting");
            let (client, driver) = self.connector.connect().await?;
            *current = Session {
                client: Arc::new(client),
                driver,
            };
            info!("spot store connection re-established");
        }

        Ok(Arc::clone(&current.client))
    }

    /// Releases the client and waits for its connection task to end. Every
    /// later [`Reconnecting::client`] call fails.
    pub(crate) async fn close(&self) {
        let Some(Session { client, driver }) = self.session.lock().await.take() else {
            return;
        };

        drop(client);
        if let Err(e) = driver.await {
            warn!("spot store connection task failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, Default)]
    struct FakeClient {
        closed: AtomicBool,
    }

    #[derive(Default)]
    struct FakeConnector {
        connects: AtomicUsize,
        refuse: AtomicBool,
    }

    #[async_trait]
    impl Connector for FakeConnector {
        type Client = FakeClient;

        async fn connect(&self) -> Result<(FakeClient, JoinHandle<()>), StoreError> {
            if self.refuse.load(Ordering::SeqCst) {
                return Err(StoreError::Unavailable("connection refused".to_owned()));
            }
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok((FakeClient::default(), tokio::spawn(async {})))
        }

        fn is_closed(client: &FakeClient) -> bool {
            client.closed.load(Ordering::SeqCst)
        }
    }

    fn connects(session: &Reconnecting<FakeConnector>) -> usize {
        session.connector.connects.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn live_client_is_reused() {
        let session = Reconnecting::open(FakeConnector::default()).await.unwrap();
        let first = session.client().await.unwrap();
        let second = session.client().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(connects(&session), 1);
    }

    #[tokio::test]
    async fn dropped_connection_is_reopened_on_next_use() {
        let session = Reconnecting::open(FakeConnector::default()).await.unwrap();
        let lost = session.client().await.unwrap();
        lost.closed.store(true, Ordering::SeqCst);

        let fresh = session.client().await.unwrap();
        assert!(!Arc::ptr_eq(&lost, &fresh));
        assert!(!fresh.closed.load(Ordering::SeqCst));
        assert_eq!(connects(&session), 2);
    }

    #[tokio::test]
    async fn failed_reconnect_is_retried_by_later_requests() {
        let session = Reconnecting::open(FakeConnector::default()).await.unwrap();
        session.client().await.unwrap().closed.store(true, Ordering::SeqCst);

        session.connector.refuse.store(true, Ordering::SeqCst);
        let err = session.client().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(reason) if reason == "connection refused"));

        session.connector.refuse.store(false, Ordering::SeqCst);
        assert!(session.client().await.is_ok());
        assert_eq!(connects(&session), 2);
    }

    #[tokio::test]
    async fn unreachable_store_fails_open() {
        let connector = FakeConnector {
            refuse: AtomicBool::new(true),
            ..FakeConnector::default()
        };
        assert!(Reconnecting::open(connector).await.is_err());
    }

    #[tokio::test]
    async fn closed_session_stays_closed() {
        let session = Reconnecting::open(FakeConnector::default()).await.unwrap();
        session.close().await;
        session.close().await;

        let err = session.client().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(reason) if reason == "spot store is closed"));
        assert_eq!(connects(&session), 1);
    }
}
