use std::sync::Mutex;

use async_trait::async_trait;
use baas_domain::backend::{IdentityService, ServiceError, ServiceResult};
use baas_domain::model::{UserId, UserSession};
use chrono::Utc;
use hex::encode as hex_encode;

const UID_BYTES: usize = 14;

/// Single-session identity service; anonymous users get random uids.
#[derive(Default)]
pub struct LocalIdentity {
    session: Mutex<Option<UserSession>>,
}

#[async_trait]
impl IdentityService for LocalIdentity {
    async fn sign_in_anonymously(&self) -> ServiceResult<UserSession> {
        let mut bytes = [0u8; UID_BYTES];
        getrandom::fill(&mut bytes).map_err(ServiceError::from_source)?;
        let session = UserSession {
            uid: UserId::new(hex_encode(bytes)),
            anonymous: true,
            signed_in_at: Utc::now(),
        };
        *self.session.lock().expect("mutex poisoned") = Some(session.clone());
        Ok(session)
    }

    async fn current_user(&self) -> ServiceResult<Option<UserId>> {
        let guard = self.session.lock().expect("mutex poisoned");
        Ok(guard.as_ref().map(|session| session.uid.clone()))
    }

    async fn sign_out(&self) -> ServiceResult<()> {
        let mut guard = self.session.lock().expect("mutex poisoned");
        if guard.take().is_none() {
            return Err(ServiceError::NotSignedIn);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn anonymous_sign_in_round_trip() {
        let identity = LocalIdentity::default();
        assert_eq!(identity.current_user().await.unwrap(), None);

        let session = identity.sign_in_anonymously().await.unwrap();
        assert!(session.anonymous);
        assert_eq!(session.uid.as_str().len(), UID_BYTES * 2);
        assert_eq!(
            identity.current_user().await.unwrap(),
            Some(session.uid.clone())
        );

        identity.sign_out().await.unwrap();
        assert_eq!(identity.current_user().await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_out_without_session_fails() {
        let identity = LocalIdentity::default();
        assert_eq!(
            identity.sign_out().await.unwrap_err(),
            ServiceError::NotSignedIn
        );
    }

    #[tokio::test]
    async fn each_sign_in_issues_a_new_uid() {
        let identity = LocalIdentity::default();
        let first = identity.sign_in_anonymously().await.unwrap();
        let second = identity.sign_in_anonymously().await.unwrap();
        assert_ne!(first.uid, second.uid);
    }
}
