use crate::config::AdminCredentials;
use argon2::{PasswordHasher, PasswordVerifier};
use rand::SeedableRng;
use thiserror::Error;

// dummy unit tuple so `Auth`s can't be instantiated outside of this file
pub struct Auth(());

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] argon2::password_hash::Error),

    #[error("password check did not finish: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub fn hash_password(password: &str) -> argon2::password_hash::Result<String> {
    let salt =
        argon2::password_hash::SaltString::generate(&mut rand_chacha::ChaCha20Rng::from_entropy());

    Ok(argon2::Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

fn verify_password(password: &str, hash: &str) -> argon2::password_hash::Result<bool> {
    let hash = argon2::password_hash::PasswordHash::new(hash)?;

    match argon2::Argon2::default().verify_password(password.as_bytes(), &hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(err),
    }
}

impl Auth {
    /// `Ok(Some(Auth))` if valid, `Ok(None)` if invalid, `Err` if the configured
    /// hash could not be parsed/argon2 verifying failed
    pub async fn validate(
        admin: &AdminCredentials,
        email: &str,
        password: String,
    ) -> Result<Option<Auth>, AuthError> {
        if email != admin.email {
            return Ok(None);
        }

        let hash = admin.password_hash.clone();
        let password_is_valid =
            tokio::task::spawn_blocking(move || verify_password(&password, &hash))
                .await??;

        if password_is_valid {
            Ok(Some(Auth(())))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(password: &str) -> AdminCredentials {
        AdminCredentials {
            email: "admin@example.com".to_string(),
            password_hash: hash_password(password).unwrap(),
        }
    }

    #[tokio::test]
    async fn accepts_the_admin_password() {
        let admin = admin("hunter2");
        let auth = Auth::validate(&admin, "admin@example.com", "hunter2".into())
            .await
            .unwrap();
        assert!(auth.is_some());
    }

    #[tokio::test]
    async fn rejects_wrong_password_or_email() {
        let admin = admin("hunter2");

        let wrong_password = Auth::validate(&admin, "admin@example.com", "hunter3".into())
            .await
            .unwrap();
        assert!(wrong_password.is_none());

        let wrong_email = Auth::validate(&admin, "someone@example.com", "hunter2".into())
            .await
            .unwrap();
        assert!(wrong_email.is_none());
    }

    #[tokio::test]
    async fn panicked_check_is_an_error() {
        let join_error = tokio::spawn(async { panic!("verifier crashed") })
            .await
            .unwrap_err();

        assert!(matches!(AuthError::from(join_error), AuthError::Task(_)));
    }

    #[tokio::test]
    async fn broken_hash_is_an_error() {
        let admin = AdminCredentials {
            email: "admin@example.com".to_string(),
            password_hash: "not a phc string".to_string(),
        };

        assert!(Auth::validate(&admin, "admin@example.com", "x".into())
            .await
            .is_err());
    }
}
