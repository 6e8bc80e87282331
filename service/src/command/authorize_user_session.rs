//! [`Command`] for authorizing a [`User`].

use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`User`].
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

/// Authorization is a pure token check: the signature and the expiration are
/// verified without any infrastructure round trips, so a [`Session`] remains
/// valid until it expires.
impl<Db, Ctl> Command<AuthorizeUserSession> for Service<Db, Ctl> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUserSession { token } = cmd;

        let session = jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config.jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims;

        Ok(session)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use secrecy::SecretBox;

    use crate::{
        command::{tests, CreateUser, CreateUserSession},
        domain::{
            user::{self, session, Session},
            User,
        },
    };

    use super::{AuthorizeUserSession, Command as _};

    async fn registered(service: &crate::Service<tests::InMemory, tests::FakeCatalog>) -> User {
        service
            .execute(CreateUser {
                name: user::Name::new("Ana").unwrap(),
                email: user::Email::new("ana@x.com").unwrap(),
                password: SecretBox::new(
                    user::Password::new("Abcdefg1").unwrap().into(),
                ),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_freshly_issued_token() {
        let service = tests::service();
        let user = registered(&service).await;

        let out = service
            .execute(CreateUserSession {
                email: user::Email::new("ana@x.com").unwrap(),
                password: SecretBox::new(
                    user::Password::new("Abcdefg1").unwrap().into(),
                ),
            })
            .await
            .unwrap();
        let session = service
            .execute(AuthorizeUserSession { token: out.token })
            .await
            .unwrap();

        assert_eq!(session.user_id, user.id);
    }

    #[tokio::test]
    async fn rejects_expired_token() {
        let service = tests::service();
        let user = registered(&service).await;

        let expired = jsonwebtoken::encode::<Session>(
            &jsonwebtoken::Header::default(),
            &Session {
                user_id: user.id,
                expires_at: (DateTime::now()
                    - Duration::from_secs(60 * 60))
                .coerce(),
            },
            &service.config().jwt_encoding_key,
        )
        .unwrap();
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token = unsafe { session::Token::new_unchecked(expired) };

        assert!(service
            .execute(AuthorizeUserSession { token })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let service = tests::service();

        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token =
            unsafe { session::Token::new_unchecked("not-a-jwt".into()) };

        assert!(service
            .execute(AuthorizeUserSession { token })
            .await
            .is_err());
    }
}
