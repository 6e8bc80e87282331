//! Authentication endpoints of the REST API.

use axum::{Extension, Json};
use http::StatusCode;
use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{self, user},
};
use uuid::Uuid;

#[cfg(doc)]
use service::domain::User;

use crate::{define_error, AsError, Error, Service};

/// Request body of the registration endpoint.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Name of a new [`User`].
    pub username: String,

    /// Email address of a new [`User`].
    pub email: String,

    /// Password of a new [`User`].
    pub password: String,
}

/// Request body of the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address of a [`User`].
    pub email: String,

    /// Password of a [`User`].
    pub password: String,
}

/// Representation of a [`User`] in responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    /// ID of the [`User`].
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Name of the [`User`].
    pub username: String,

    /// Email address of the [`User`].
    pub email: String,

    /// Time when the [`User`] was registered, as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://datatracker.ietf.org/doc/html/rfc3339
    pub created_at: String,
}

impl From<domain::User> for UserBody {
    fn from(user: domain::User) -> Self {
        Self {
            id: user.id.into(),
            username: user.name.to_string(),
            email: user.email.to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Response body of the login endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Issued authentication token.
    pub token: String,

    /// [`User`] the token was issued for.
    pub user: UserBody,

    /// Time when the token expires, as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://datatracker.ietf.org/doc/html/rfc3339
    pub expires_at: String,
}

/// `POST /api/auth/register` endpoint registering a new [`User`].
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_USERNAME`, `INVALID_EMAIL`, `INVALID_PASSWORD` - if the
///   provided fields are malformed;
/// - `EMAIL_OCCUPIED` - if a `User` with the provided email is registered
///   already.
pub async fn register(
    Extension(service): Extension<Service>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserBody>), Error> {
    let RegisterRequest {
        username,
        email,
        password,
    } = req;

    let name =
        user::Name::new(username).ok_or(RequestError::InvalidUsername)?;
    let email = user::Email::new(email).ok_or(RequestError::InvalidEmail)?;
    let password =
        user::Password::new(password).ok_or(RequestError::InvalidPassword)?;

    let user = service
        .execute(command::CreateUser {
            name,
            email,
            password: SecretBox::new(password.into()),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `POST /api/auth/login` endpoint exchanging [`User`] credentials for an
/// authentication token.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_EMAIL`, `INVALID_PASSWORD` - if the provided fields are
///   malformed;
/// - `WRONG_CREDENTIALS` - if no `User` matches the provided credentials.
pub async fn login(
    Extension(service): Extension<Service>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Error> {
    let LoginRequest { email, password } = req;

    let email = user::Email::new(email).ok_or(RequestError::InvalidEmail)?;
    let password =
        user::Password::new(password).ok_or(RequestError::InvalidPassword)?;

    let out = service
        .execute(command::CreateUserSession {
            email,
            password: SecretBox::new(password.into()),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(LoginResponse {
        token: out.token.to_string(),
        user: out.user.into(),
        expires_at: out.expires_at.to_rfc3339(),
    }))
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error {
                code: "EMAIL_OCCUPIED",
                status_code: http::StatusCode::BAD_REQUEST,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::WrongCredentials => Some(Error {
                code: "WRONG_CREDENTIALS",
                status_code: http::StatusCode::UNAUTHORIZED,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

define_error! {
    enum RequestError {
        #[code = "INVALID_USERNAME"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `username` provided"]
        InvalidUsername,

        #[code = "INVALID_EMAIL"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `email` provided"]
        InvalidEmail,

        #[code = "INVALID_PASSWORD"]
        #[status = BAD_REQUEST]
        #[message = "Invalid `password` provided"]
        InvalidPassword,
    }
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use super::{RegisterRequest, UserBody};

    #[test]
    fn register_body_uses_username_field() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"ana","email":"ana@x.com","password":"Abcdefg1"}"#,
        )
        .unwrap();

        assert_eq!(req.username, "ana");
        assert_eq!(req.email, "ana@x.com");
    }

    #[test]
    fn user_body_serializes_username_field() {
        let body = serde_json::to_value(UserBody {
            id: Uuid::nil(),
            username: "ana".into(),
            email: "ana@x.com".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
        })
        .unwrap();

        assert_eq!(body["username"], "ana");
        assert_eq!(body["_id"], Uuid::nil().to_string());
        assert!(body.get("name").is_none());
    }
}
