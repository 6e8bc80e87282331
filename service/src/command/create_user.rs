//! [`Command`] for registering a new [`User`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Password};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`User`].
#[derive(Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,
}

impl<Db, Ctl> Command<CreateUser> for Service<Db, Ctl>
where
    Db: for<'l> Database<
            Select<By<Option<User>, &'l user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            email,
            password,
        } = cmd;

        let u = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if u.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let user = User {
            id: user::Id::new(),
            name,
            email,
            password_hash: user::PasswordHash::new(password.expose_secret()),
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        // A concurrent registration may slip past the `Select` above, in
        // which case the unique constraint on the email catches it here.
        tx.execute(Insert(user.clone()))
            .await
            .map_err(|e| {
                if e.as_ref()
                    .is_unique_violation(Some("users_email_key"))
                {
                    tracerr::new!(E::EmailOccupied(user.email.clone()))
                } else {
                    tracerr::map_from_and_wrap!(=> E)(e)
                }
            })
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Email`] is already occupied.
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] user::Email),
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{command::tests, domain::user};

    use super::{Command as _, CreateUser, ExecutionError};

    fn cmd(email: &str) -> CreateUser {
        CreateUser {
            name: user::Name::new("Ana").unwrap(),
            email: user::Email::new(email).unwrap(),
            password: SecretBox::new(
                user::Password::new("Abcdefg1").unwrap().into(),
            ),
        }
    }

    #[tokio::test]
    async fn registers_new_user() {
        let service = tests::service();

        let user = service.execute(cmd("ana@x.com")).await.unwrap();

        assert_eq!(user.email.to_string(), "ana@x.com");
    }

    #[tokio::test]
    async fn rejects_occupied_email() {
        let service = tests::service();
        drop(service.execute(cmd("ana@x.com")).await.unwrap());

        let err = service.execute(cmd("ana@x.com")).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::EmailOccupied(_)
        ));
    }
}
