//! PostgreSQL implementation of the database seam.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls};

use crate::probe::driver::{Connection, Connector, DbError};

/// How long a closing session may take to say goodbye before it is aborted.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

const TEST_QUERY: &str = "SELECT 1";

/// Opens plaintext PostgreSQL connections from URI or key/value strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresConnector;

impl Connector for PostgresConnector {
    type Conn = PostgresConnection;

    fn open(&self, uri: &str) -> Result<Self::Conn, DbError> {
        let config = Config::from_str(uri).map_err(|e| DbError::InvalidUri(e.to_string()))?;
        Ok(PostgresConnection {
            config,
            session: None,
        })
    }
}

struct Session {
    client: Client,
    driver: JoinHandle<()>,
}

/// A lazily established PostgreSQL session.
pub struct PostgresConnection {
    config: Config,
    session: Option<Session>,
}

impl PostgresConnection {
    async fn establish(&mut self) -> Result<&Client, DbError> {
        if self.session.is_none() {
            let (client, connection) = self
                .config
                .connect(NoTls)
                .await
                .map_err(|e| DbError::Connect(e.to_string()))?;

            let driver = tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::debug!(error = %e, "PostgreSQL connection closed with error");
                }
            });

            self.session = Some(Session { client, driver });
        }

        self.client()
    }

    fn client(&self) -> Result<&Client, DbError> {
        self.session
            .as_ref()
            .map(|s| &s.client)
            .ok_or(DbError::NotConnected)
    }
}

#[async_trait]
impl Connection for PostgresConnection {
    async fn ping(&mut self) -> Result<(), DbError> {
        let client = self.establish().await?;
        client
            .batch_execute(";")
            .await
            .map_err(|e| DbError::Connect(e.to_string()))
    }

    async fn test_query(&mut self) -> Result<(), DbError> {
        let client = self.client()?;
        let row = client
            .query_one(TEST_QUERY, &[])
            .await
            .map_err(|e| DbError::Query(e.to_string()))?;

        let value: i32 = row.try_get(0).map_err(|e| DbError::Query(e.to_string()))?;
        if value != 1 {
            return Err(DbError::Query(format!("unexpected test query result {value}")));
        }
        Ok(())
    }
}

impl Drop for PostgresConnection {
    fn drop(&mut self) {
        let Some(Session { client, mut driver }) = self.session.take() else {
            return;
        };

        // Dropping the client lets the driver send Terminate and finish.
        drop(client);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if tokio::time::timeout(CLOSE_GRACE, &mut driver).await.is_err() {
                        driver.abort();
                    }
                });
            }
            Err(_) => driver.abort(),
        }
    }
}
