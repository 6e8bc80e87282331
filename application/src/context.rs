//! Request authentication definitions.

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use common::DateTime;
use service::{
    command::{self, Command as _},
    domain::user::{self, session},
};

use crate::{define_error, AsError, Error, Service};

/// Authenticated user session of an HTTP request.
///
/// Extracting a [`Session`] verifies the `Authorization: Bearer` token of the
/// request. No infrastructure is touched, so a stolen token stays valid until
/// it expires.
#[derive(Clone, Debug)]
pub struct Session {
    /// ID of the [`User`] this [`Session`] belongs to.
    ///
    /// [`User`]: service::domain::User
    pub user_id: user::Id,

    /// Authentication token.
    pub token: session::Token,

    /// [`DateTime`] when this [`Session`] expires.
    pub expires_at: DateTime,
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service =
            parts.extensions.get::<Service>().cloned().ok_or_else(|| {
                Error::internal(&"missing `Service` extension")
            })?;

        let bearer = match parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
        {
            Ok(TypedHeader(Authorization(bearer))) => bearer,
            Err(e) => {
                return Err(if e.is_missing() {
                    AuthError::AuthorizationRequired.into()
                } else {
                    e.into_error()
                });
            }
        };

        #[expect(unsafe_code, reason = "specified in correct header")]
        let token =
            unsafe { session::Token::new_unchecked(bearer.token().to_owned()) };
        service
            .execute(command::AuthorizeUserSession {
                token: token.clone(),
            })
            .await
            .map(|s| Self {
                user_id: s.user_id,
                token,
                expires_at: s.expires_at.coerce(),
            })
            .map_err(AsError::into_error)
    }
}

impl AsError for command::authorize_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::JsonWebTokenDecodeError(_) => {
                Some(AuthError::InvalidAuthToken.into())
            }
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        AuthorizationRequired,

        #[code = "INVALID_AUTH_TOKEN"]
        #[status = UNAUTHORIZED]
        #[message = "Invalid or expired authentication token"]
        InvalidAuthToken,
    }
}
