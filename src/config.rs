use std::env;

/// Process configuration, read once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// When set, the relational backend is used; otherwise content lives in
    /// an in-process store and is lost on restart.
    pub database_url: Option<String>,
    pub upload_dir: String,
    pub admin_email: String,
    pub admin_password: String,
    pub cors_allow_origin: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
        let admin_password =
            env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        let cors_allow_origin = env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".to_string());

        Ok(Config {
            host,
            port,
            database_url,
            upload_dir,
            admin_email,
            admin_password,
            cors_allow_origin,
        })
    }
}
