use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_BIND: &str = "0.0.0.0:8010";
const DEFAULT_STORE_PATH: &str = "./blog-store";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8010";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    File,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ImageKitConfig {
    pub private_key: String,
    pub url_endpoint: String,
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    /// Argon2 PHC string, see `blog hash-password`.
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub store: StoreKind,
    pub store_path: PathBuf,
    pub cors_origin: Option<String>,
    pub public_url: String,
    pub admin: AdminCredentials,
    pub imagekit: Option<ImageKitConfig>,
    pub genai_model: String,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let bind = get("BLOG_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                name: "BLOG_BIND",
                reason: err.to_string(),
            })?;

        let store = match get("BLOG_STORE").as_deref() {
            None | Some("file") => StoreKind::File,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "BLOG_STORE",
                    reason: format!("expected `file` or `memory`, got {other:?}"),
                })
            }
        };

        let imagekit = match (get("IMAGEKIT_PRIVATE_KEY"), get("IMAGEKIT_URL_ENDPOINT")) {
            (Some(private_key), Some(url_endpoint)) => Some(ImageKitConfig {
                private_key,
                url_endpoint,
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("IMAGEKIT_URL_ENDPOINT")),
            (None, Some(_)) => return Err(ConfigError::Missing("IMAGEKIT_PRIVATE_KEY")),
        };

        Ok(Config {
            bind,
            store,
            store_path: get("BLOG_STORE_PATH")
                .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string())
                .into(),
            cors_origin: get("BLOG_CORS_ORIGIN"),
            public_url: get("BLOG_PUBLIC_URL").unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
            admin: AdminCredentials {
                email: require("ADMIN_EMAIL")?,
                password_hash: require("ADMIN_PASSWORD_HASH")?,
            },
            imagekit,
            genai_model: get("GENAI_MODEL")
                .unwrap_or_else(|| crate::generate::DEFAULT_MODEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |name: &str| vars.get(name).cloned()
    }

    const ADMIN: [(&str, &str); 2] = [
        ("ADMIN_EMAIL", "admin@example.com"),
        ("ADMIN_PASSWORD_HASH", "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
    ];

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&ADMIN)).unwrap();

        assert_eq!(config.bind, "0.0.0.0:8010".parse().unwrap());
        assert_eq!(config.store, StoreKind::File);
        assert_eq!(config.store_path, PathBuf::from("./blog-store"));
        assert!(config.imagekit.is_none());
        assert!(config.cors_origin.is_none());
        assert_eq!(config.genai_model, "gemini-2.0-flash");
    }

    #[test]
    fn admin_credentials_are_required() {
        let err = Config::from_lookup(lookup(&[("ADMIN_EMAIL", "admin@example.com")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("ADMIN_PASSWORD_HASH")));
    }

    #[test]
    fn imagekit_needs_both_values() {
        let mut vars = ADMIN.to_vec();
        vars.push(("IMAGEKIT_PRIVATE_KEY", "private_x"));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("IMAGEKIT_URL_ENDPOINT")));

        vars.push(("IMAGEKIT_URL_ENDPOINT", "https://ik.imagekit.io/demo"));
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(
            config.imagekit.unwrap().url_endpoint,
            "https://ik.imagekit.io/demo"
        );
    }

    #[test]
    fn rejects_unknown_store_kind() {
        let mut vars = ADMIN.to_vec();
        vars.push(("BLOG_STORE", "postgres"));
        assert!(matches!(
            Config::from_lookup(lookup(&vars)),
            Err(ConfigError::Invalid { name: "BLOG_STORE", .. })
        ));
    }
}
