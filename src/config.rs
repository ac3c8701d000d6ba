use serde::Deserialize;

/// Parameters for validating bearer tokens issued by the external
/// identity provider. This service never signs tokens itself.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "chefgpt-idp".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "chefgpt-users".into()),
        };
        Ok(Self { database_url, jwt })
    }
}
