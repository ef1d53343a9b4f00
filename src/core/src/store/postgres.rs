use std::fmt;

use async_trait::async_trait;
use futures::{TryStreamExt, pin_mut};
use tokio::task::JoinHandle;
use tokio_postgres::types::Type;
use tokio_postgres::{Client, Config, NoTls, Row};
use tracing::{debug, error, warn};

use super::reconnect::{Connector, Reconnecting};
use super::{SpotStore, StoreError};
use crate::query::SpotQuery;
use crate::spot::Spot;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;
const DEFAULT_USER: &str = "postgres";
const DEFAULT_PASSWORD: &str = "secret";
const DEFAULT_DBNAME: &str = "postgres";

/// Connection settings for the spatial store. TLS is not negotiated.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_owned(),
            password: DEFAULT_PASSWORD.to_owned(),
            dbname: DEFAULT_DBNAME.to_owned(),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("dbname", &self.dbname)
            .finish()
    }
}

impl StoreConfig {
    /// Reads `SPOTS_PG_*` variables; unset or unparsable values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            host: lookup("SPOTS_PG_HOST").unwrap_or(defaults.host),
            port: lookup("SPOTS_PG_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            user: lookup("SPOTS_PG_USER").unwrap_or(defaults.user),
            password: lookup("SPOTS_PG_PASSWORD").unwrap_or(defaults.password),
            dbname: lookup("SPOTS_PG_DBNAME").unwrap_or(defaults.dbname),
        }
    }

    pub fn to_pg_config(&self) -> Config {
        let mut config = Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .user(&self.user)
            .password(&self.password)
            .dbname(&self.dbname);
        config
    }
}

/// Dials PostgreSQL and spawns the task driving the connection.
struct PgConnector {
    config: Config,
}

#[async_trait]
impl Connector for PgConnector {
    type Client = Client;

    async fn connect(&self) -> Result<(Client, JoinHandle<()>), StoreError> {
        let (client, conn) = self.config.connect(NoTls).await.map_err(StoreError::Connect)?;
        let connection = tokio::spawn(async move {
            if let Err(e) = conn.await {
                error!("connection error: {e}");
            }
        });

        Ok((client, connection))
    }

    fn is_closed(client: &Client) -> bool {
        client.is_closed()
    }
}

/// Spatial store backed by a single PostGIS connection shared by all
/// requests. A dropped connection is re-dialled by the next request.
pub struct PostgresSpotStore {
    session: Reconnecting<PgConnector>,
}

impl PostgresSpotStore {
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::connect_with(&config.to_pg_config()).await
    }

    pub async fn connect_with(config: &Config) -> Result<Self, StoreError> {
        let session = Reconnecting::open(PgConnector {
            config: config.clone(),
        })
        .await?;

        Ok(Self { session })
    }

    /// Drops the client and waits for the connection task to finish.
    pub async fn close(&self) {
        self.session.close().await;
    }
}

#[async_trait]
impl SpotStore for PostgresSpotStore {
    async fn find_spots(&self, query: &SpotQuery) -> Result<Vec<Spot>, StoreError> {
        debug!("spot query: kind={}, params={:?}", query.kind(), query.params());

        let client = self.session.client().await?;
        let statement = client
            .prepare_typed(query.sql(), &[Type::FLOAT8, Type::FLOAT8, Type::FLOAT8])
            .await
            .map_err(StoreError::Query)?;
        let rows = client
            .query_raw(&statement, query.params())
            .await
            .map_err(StoreError::Query)?;
        pin_mut!(rows);

        let mut spots = Vec::new();
        while let Some(row) = rows.try_next().await.map_err(StoreError::Scan)? {
            match spot_from_row(&row) {
                Ok(spot) => spots.push(spot),
                Err(e) => warn!("skipping spot row: {e}"),
            }
        }

        Ok(spots)
    }
}

fn spot_from_row(row: &Row) -> Result<Spot, tokio_postgres::Error> {
    // ranking input only, never returned
    row.try_get::<_, f64>("distance")?;

    Ok(Spot {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        website: row.try_get("website")?,
        description: row.try_get("description")?,
        rating: row.try_get("rating")?,
        coordinates: row.try_get("coordinates")?,
    })
}
