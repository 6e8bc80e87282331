//! [`Command`] for creating a [`Session`].

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{session::Token, Email, Password};
use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`] by [`User`] credentials.
#[derive(Debug)]
pub struct CreateUserSession {
    /// [`Email`] of a [`User`].
    pub email: user::Email,

    /// [`Password`] of a [`User`].
    pub password: SecretBox<user::Password>,
}

/// Output of [`CreateUserSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    pub token: session::Token,

    /// [`User`] whose [`Session`] has been created.
    pub user: User,

    /// [`DateTime`] when the [`Session`] expires.
    pub expires_at: session::ExpirationDateTime,
}

impl<Db, Ctl> Command<CreateUserSession> for Service<Db, Ctl>
where
    Db: for<'l> Database<
        Select<By<Option<User>, &'l user::Email>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUserSession { email, password } = cmd;

        // An unknown email and a wrong password are indistinguishable on
        // purpose.
        let user = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::WrongCredentials)
            .map_err(tracerr::wrap!())?;
        if !user.password_hash.verify(password.expose_secret()) {
            return Err(tracerr::new!(E::WrongCredentials));
        }

        let expires_at =
            (DateTime::now() + self.config.session_ttl).coerce();
        let token = jsonwebtoken::encode::<Session>(
            &jsonwebtoken::Header::default(),
            &Session {
                user_id: user.id,
                expires_at,
            },
            &self.config.jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        // SAFETY: `jsonwebtoken::encode` always returns a valid
        //         `session::Token`.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token = unsafe { session::Token::new_unchecked(token) };

        Ok(Output {
            token,
            user,
            expires_at,
        })
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// [`CreateUserSession`] contains wrong credentials.
    #[display("Wrong `User` credentials")]
    WrongCredentials,
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        command::{tests, CreateUser},
        domain::user,
    };

    use super::{Command as _, CreateUserSession, ExecutionError};

    fn credentials(email: &str, password: &str) -> CreateUserSession {
        CreateUserSession {
            email: user::Email::new(email).unwrap(),
            password: SecretBox::new(
                user::Password::new(password).unwrap().into(),
            ),
        }
    }

    #[tokio::test]
    async fn issues_token_for_valid_credentials() {
        let service = tests::service();
        drop(
            service
                .execute(CreateUser {
                    name: user::Name::new("Ana").unwrap(),
                    email: user::Email::new("ana@x.com").unwrap(),
                    password: SecretBox::new(
                        user::Password::new("Abcdefg1").unwrap().into(),
                    ),
                })
                .await
                .unwrap(),
        );

        let out = service
            .execute(credentials("ana@x.com", "Abcdefg1"))
            .await
            .unwrap();

        assert!(!out.token.as_ref().is_empty());
        assert_eq!(out.user.email.to_string(), "ana@x.com");
    }

    #[tokio::test]
    async fn rejects_wrong_password() {
        let service = tests::service();
        drop(
            service
                .execute(CreateUser {
                    name: user::Name::new("Ana").unwrap(),
                    email: user::Email::new("ana@x.com").unwrap(),
                    password: SecretBox::new(
                        user::Password::new("Abcdefg1").unwrap().into(),
                    ),
                })
                .await
                .unwrap(),
        );

        let err = service
            .execute(credentials("ana@x.com", "Abcdefg2"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::WrongCredentials));
    }

    #[tokio::test]
    async fn rejects_unknown_email() {
        let service = tests::service();

        let err = service
            .execute(credentials("ghost@x.com", "Abcdefg1"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::WrongCredentials));
    }
}
