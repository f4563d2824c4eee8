#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories::SqliteStorage;
use sso_service::proto::auth_client::AuthClient;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;

pub const APP_ID: i32 = 2;
pub const APP_SECRET: &str = "test-secret";
pub const TOKEN_TTL_SECS: i64 = 3600;
pub const DELTA_SECONDS: i64 = 1;

/// Test application that spawns a real gRPC server
pub struct TestApp {
    pub address: String,
    pub storage: Arc<SqliteStorage>,
    pub client: AuthClient<Channel>,
}

impl TestApp {
    /// Spawn the server in a background task and return a connected client
    pub async fn spawn() -> Self {
        let storage = Arc::new(test_storage().await);

        sqlx::query("INSERT INTO apps (id, name, secret) VALUES (?, ?, ?)")
            .bind(APP_ID)
            .bind("test")
            .bind(APP_SECRET)
            .execute(storage.pool())
            .await
            .expect("Failed to seed test application");

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&storage),
            Arc::clone(&storage),
            Arc::clone(&storage),
            chrono::Duration::seconds(TOKEN_TTL_SECS),
        ));
        let grpc_service = AuthGrpcService::new(auth_service, Duration::from_secs(5));

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            Server::builder()
                .add_service(grpc_service.into_server())
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Server error");
        });

        let client = AuthClient::connect(address.clone())
            .await
            .expect("Failed to connect gRPC client");

        Self {
            address,
            storage,
            client,
        }
    }

    /// Grant administrative privileges to a user
    pub async fn make_admin(&self, user_id: i64) {
        sqlx::query("INSERT INTO admins (user_id) VALUES (?)")
            .bind(user_id)
            .execute(self.storage.pool())
            .await
            .expect("Failed to insert admin");
    }
}

/// Fresh migrated in-memory database.
///
/// A single long-lived connection keeps the in-memory database alive.
pub async fn test_storage() -> SqliteStorage {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    let storage = SqliteStorage::new(pool);
    storage.migrate().await.expect("Failed to run migrations");
    storage
}

/// Unique email per call so tests never collide
pub fn new_email() -> String {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    format!("user{}@example.com", COUNTER.fetch_add(1, Ordering::Relaxed))
}
