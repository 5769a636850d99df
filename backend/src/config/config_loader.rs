use anyhow::{Context, Result};
use std::str::FromStr;

use super::config_model::{BackendServer, Database, DotEnvyConfig, Supabase};

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECTION_TIMEOUT: u64 = 30;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: required("SERVER_PORT_BACKEND")?,
        body_limit: required("SERVER_BODY_LIMIT")?,
        timeout: required("SERVER_TIMEOUT")?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").context("DATABASE_URL is invalid")?,
        max_connections: optional("DATABASE_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
        connection_timeout: optional(
            "DATABASE_CONNECTION_TIMEOUT",
            DEFAULT_DB_CONNECTION_TIMEOUT,
        )?,
        disable_prepared_statements: optional("DATABASE_DISABLE_PREPARED_STATEMENTS", true)?,
    };

    let supabase = Supabase {
        jwt_secret: std::env::var("SUPABASE_JWT_SECRET")
            .context("SUPABASE_JWT_SECRET is invalid")?,
    };

    Ok(DotEnvyConfig {
        backend_server,
        database,
        supabase,
    })
}

fn required<T>(key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::var(key)
        .with_context(|| format!("{key} is invalid"))?
        .trim()
        .parse()
        .with_context(|| format!("{key} could not be parsed"))
}

fn optional<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} could not be parsed")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_falls_back_when_unset() {
        let value: u32 = optional("RECORDINGS_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn required_reports_the_missing_key() {
        let err = required::<u16>("RECORDINGS_TEST_MISSING_PORT").unwrap_err();
        assert!(err.to_string().contains("RECORDINGS_TEST_MISSING_PORT"));
    }

    #[test]
    fn optional_rejects_unparsable_values() {
        unsafe {
            std::env::set_var("RECORDINGS_TEST_BAD_BOOL", "maybe");
        }
        assert!(optional("RECORDINGS_TEST_BAD_BOOL", true).is_err());
    }
}
