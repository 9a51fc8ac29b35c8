fn required(key: &str) -> String {
    std::env::var(key)
        .unwrap_or_else(|_| panic!("{key} must be set in .env file or environment variable"))
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: std::str::FromStr>(key: &str, default: &str) -> T {
    optional(key, default)
        .parse::<T>()
        .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>()))
}

/// Process configuration, read once at startup into a `LazyLock` in main.
pub struct Env {
    pub jwt_secret: String,
    pub access_token_expiration: u64,
    pub refresh_token_expiration: u64,
    pub database_url: String,
    pub redis_url: String,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

impl Default for Env {
    fn default() -> Self {
        Env {
            jwt_secret: required("SECRET_KEY"),
            // 15 minutes / 7 days
            access_token_expiration: parsed("ACCESS_TOKEN_EXPIRATION", "900"),
            refresh_token_expiration: parsed("REFRESH_TOKEN_EXPIRATION", "604800"),
            database_url: required("DATABASE_URL"),
            redis_url: required("REDIS_URL"),
            frontend_url: optional("FRONTEND_URL", "http://localhost:5173"),
            ip: optional("IP", "127.0.0.1"),
            port: parsed("PORT", "8080"),
        }
    }
}
