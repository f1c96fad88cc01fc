use std::{net::SocketAddr, time::Duration};

use rust_decimal::Decimal;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub starting_cash: Option<Decimal>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("PF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid PF_LISTEN_ADDR");
        let db_path = std::env::var("PF_DB_PATH").unwrap_or_else(|_| "./db/paperfolio.db".into());
        let cors_allow = std::env::var("PF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("PF_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let jwt_secret = std::env::var("PF_JWT_SECRET").expect("PF_JWT_SECRET is not set");
        let token_ttl_secs: u64 = std::env::var("PF_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .unwrap_or(3600);
        let starting_cash = std::env::var("PF_STARTING_CASH")
            .ok()
            .map(|raw| raw.parse().expect("Invalid PF_STARTING_CASH"));
        Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            jwt_secret,
            token_ttl: Duration::from_secs(token_ttl_secs),
            starting_cash,
        }
    }
}
