//! HTTP server command
//!
//! Resolves configuration from flags and environment, connects the storage
//! gateway once, then serves until Ctrl+C/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use librero_server::db::{DEFAULT_COLLECTION, DEFAULT_DATABASE};
use librero_server::{run_server, BookStore, MemoryBookStore, MongoBookStore, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "LIBRERO_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Port to listen on (overrides the port of --bind)
    #[arg(long, short = 'p', env = "PORT")]
    pub port: Option<u16>,

    /// MongoDB connection string
    #[arg(long, env = "MONGO_URL", hide_env_values = true)]
    pub mongo_url: Option<String>,

    /// Database holding the books collection
    #[arg(long, env = "MONGO_DB", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Collection holding the books
    #[arg(long, env = "MONGO_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Keep books in memory instead of MongoDB (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

/// Where books are stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo {
        url: String,
        database: String,
        collection: String,
    },
    InMemory,
}

/// Fully resolved serve configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
}

impl ServeArgs {
    /// Resolve flags into a config, failing when no store is configured.
    pub fn resolve(self) -> Result<ServeConfig> {
        let mut bind_addr = self.bind;
        if let Some(port) = self.port {
            bind_addr.set_port(port);
        }

        let backend = if self.in_memory {
            StoreBackend::InMemory
        } else {
            match self.mongo_url.filter(|url| !url.trim().is_empty()) {
                Some(url) => StoreBackend::Mongo {
                    url,
                    database: self.database,
                    collection: self.collection,
                },
                None => bail!("MONGO_URL is not set. Set via --mongo-url, MONGO_URL env, or .env"),
            }
        };

        Ok(ServeConfig { bind_addr, backend })
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.resolve()?;

    let store: Arc<dyn BookStore> = match config.backend {
        StoreBackend::Mongo {
            url,
            database,
            collection,
        } => Arc::new(
            MongoBookStore::connect(&url, &database, &collection)
                .await
                .context("Failed to connect to MongoDB")?,
        ),
        StoreBackend::InMemory => {
            tracing::warn!("Serving from in-memory store; books are lost on exit");
            Arc::new(MemoryBookStore::new())
        }
    };

    tracing::info!("Starting librero server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(
        store,
        ServerConfig {
            bind_addr: config.bind_addr,
        },
    )
    .await
    .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServeArgs {
        ServeArgs {
            bind: "0.0.0.0:3000".parse().unwrap(),
            port: None,
            mongo_url: None,
            database: DEFAULT_DATABASE.to_owned(),
            collection: DEFAULT_COLLECTION.to_owned(),
            in_memory: false,
        }
    }

    #[test]
    fn missing_mongo_url_fails() {
        let err = args().resolve().unwrap_err();
        assert!(err.to_string().starts_with("MONGO_URL is not set"));
    }

    #[test]
    fn blank_mongo_url_counts_as_missing() {
        let err = ServeArgs {
            mongo_url: Some("  ".into()),
            ..args()
        }
        .resolve()
        .unwrap_err();
        assert!(err.to_string().starts_with("MONGO_URL is not set"));
    }

    #[test]
    fn mongo_backend_uses_defaults() {
        let config = ServeArgs {
            mongo_url: Some("mongodb://localhost:27017".into()),
            ..args()
        }
        .resolve()
        .unwrap();

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(
            config.backend,
            StoreBackend::Mongo {
                url: "mongodb://localhost:27017".into(),
                database: "coleccion".into(),
                collection: "books".into(),
            }
        );
    }

    #[test]
    fn port_overrides_bind_port_only() {
        let config = ServeArgs {
            bind: "127.0.0.1:3000".parse().unwrap(),
            port: Some(8080),
            in_memory: true,
            ..args()
        }
        .resolve()
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.backend, StoreBackend::InMemory);
    }

    #[test]
    fn parses_flags() {
        let args = ServeArgs::try_parse_from([
            "serve",
            "--bind",
            "127.0.0.1:4000",
            "--mongo-url",
            "mongodb://db:27017",
            "--database",
            "biblioteca",
        ])
        .unwrap();

        assert_eq!(args.bind.port(), 4000);
        assert_eq!(args.database, "biblioteca");
        assert_eq!(args.mongo_url.as_deref(), Some("mongodb://db:27017"));
    }
}
