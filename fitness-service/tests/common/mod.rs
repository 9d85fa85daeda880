use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;
use fitness_service::domain::profile::errors::ProfileError;
use fitness_service::domain::profile::models::HealthProfile;
use fitness_service::domain::profile::ports::ProfileRepository;
use fitness_service::domain::profile::service::ProfileService;
use fitness_service::domain::user::errors::UserError;
use fitness_service::domain::user::models::NewUser;
use fitness_service::domain::user::models::User;
use fitness_service::domain::user::models::UserId;
use fitness_service::domain::user::models::Username;
use fitness_service::domain::user::ports::UserRepository;
use fitness_service::domain::user::service::AccountService;
use fitness_service::inbound::http::router::create_router;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryUserRepository::default()),
            Arc::clone(&authenticator),
        ));
        let profile_service = Arc::new(ProfileService::new(Arc::new(
            InMemoryProfileRepository::default(),
        )));

        let router = create_router(account_service, profile_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the response body
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an account and return its session token
    pub async fn register_token(&self, username: &str, password: &str) -> String {
        let body: serde_json::Value = self
            .register(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}

/// Test database helper
///
/// Each instance owns a freshly migrated database on the server named by
/// `DATABASE_URL`. Without that variable the Postgres tests are skipped.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    postgres_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name
    pub async fn new() -> Option<Self> {
        let Ok(postgres_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres test");
            return None;
        };

        let db_name = format!(
            "test_fitness_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        // Create test database
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        // Connect to the new test database
        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            postgres_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let postgres_url = self.postgres_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&postgres_url).await {
                // Terminate existing connections
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                // Drop database
                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}

/// User store kept in process memory; mirrors the unique username constraint
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        let stored = User {
            id: UserId(users.len() as i64 + 1),
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == *username).cloned())
    }
}

/// Profile store kept in process memory, keyed by owner
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, HealthProfile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<HealthProfile>, ProfileError> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.get(user_id).cloned())
    }

    async fn upsert(&self, profile: HealthProfile) -> Result<HealthProfile, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();
        profiles.insert(profile.user_id, profile.clone());
        Ok(profile)
    }
}
