use std::sync::Arc;
use std::time::Duration;

use crate::auth::password::{hash_password, verify_password};
use crate::database::models::NewUser;
use crate::database::{StoreError, UserStore};
use crate::services::ServiceError;

/// Validated registration input. Field rules are enforced by the HTTP layer.
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub age: i32,
}

/// Persists identities and checks login credentials
pub struct CredentialService {
    users: Arc<dyn UserStore>,
    bcrypt_cost: u32,
    write_timeout: Duration,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserStore>, bcrypt_cost: u32, write_timeout: Duration) -> Self {
        Self {
            users,
            bcrypt_cost,
            write_timeout,
        }
    }

    /// Create an account and return its id
    pub async fn register(&self, registration: Registration) -> Result<i64, ServiceError> {
        let password_hash = hash_password(registration.password, self.bcrypt_cost).await?;

        let new_user = NewUser {
            full_name: registration.full_name,
            email: registration.email,
            username: registration.username,
            password_hash,
            age: registration.age,
        };

        let inserted = tokio::time::timeout(self.write_timeout, self.users.insert_user(new_user))
            .await
            .map_err(|_| ServiceError::StorageFailure("user insert timed out".to_string()))?;

        match inserted {
            Ok(id) => Ok(id),
            Err(StoreError::UniqueViolation(constraint)) => {
                tracing::info!("Registration rejected by unique constraint {}", constraint);
                Err(ServiceError::DuplicateIdentity)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check an email/password pair. Unknown email and wrong password fail identically.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(i64, String), ServiceError> {
        let user = self
            .users
            .find_user_by_email(email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(password.to_string(), user.password_hash.clone()).await {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok((user.id, user.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::User;
    use crate::database::MemoryStore;
    use async_trait::async_trait;

    /// Accepts inserts but never finishes them in time
    struct StalledUsers;

    #[async_trait]
    impl UserStore for StalledUsers {
        async fn insert_user(&self, _: NewUser) -> Result<i64, StoreError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(1)
        }

        async fn find_user_by_email(&self, _: &str) -> Result<Option<User>, StoreError> {
            Ok(None)
        }
    }

    fn service(store: Arc<MemoryStore>) -> CredentialService {
        CredentialService::new(store, 4, Duration::from_secs(5))
    }

    fn registration(email: &str, username: &str) -> Registration {
        Registration {
            full_name: "Grace Hopper".to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password: "c0bol-rules".to_string(),
            age: 85,
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let store = Arc::new(MemoryStore::new());
        let credentials = service(store.clone());

        let id = credentials
            .register(registration("grace@example.com", "grace"))
            .await
            .unwrap();
        let (user_id, email) = credentials
            .verify_credentials("grace@example.com", "c0bol-rules")
            .await
            .unwrap();

        assert_eq!(user_id, id);
        assert_eq!(email, "grace@example.com");

        let stored = store.find_user_by_email("grace@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "c0bol-rules");
    }

    #[tokio::test]
    async fn duplicate_registration_keeps_original_account() {
        let store = Arc::new(MemoryStore::new());
        let credentials = service(store.clone());
        let first = credentials
            .register(registration("grace@example.com", "grace"))
            .await
            .unwrap();

        let mut dup = registration("grace@example.com", "someone-else");
        dup.password = "different-pass1".to_string();
        assert!(matches!(
            credentials.register(dup).await,
            Err(ServiceError::DuplicateIdentity)
        ));
        assert!(matches!(
            credentials.register(registration("other@example.com", "grace")).await,
            Err(ServiceError::DuplicateIdentity)
        ));

        let (user_id, _) = credentials
            .verify_credentials("grace@example.com", "c0bol-rules")
            .await
            .unwrap();
        assert_eq!(user_id, first);
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_are_indistinguishable() {
        let credentials = service(Arc::new(MemoryStore::new()));
        credentials
            .register(registration("grace@example.com", "grace"))
            .await
            .unwrap();

        let wrong_password = credentials
            .verify_credentials("grace@example.com", "nope-nope1")
            .await
            .unwrap_err();
        let unknown_email = credentials
            .verify_credentials("nobody@example.com", "c0bol-rules")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
        assert!(matches!(unknown_email, ServiceError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn slow_insert_hits_write_deadline() {
        let credentials =
            CredentialService::new(Arc::new(StalledUsers), 4, Duration::from_millis(10));

        let result = credentials
            .register(registration("grace@example.com", "grace"))
            .await;
        assert!(matches!(result, Err(ServiceError::StorageFailure(_))));
    }
}
