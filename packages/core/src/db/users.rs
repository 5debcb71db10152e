//! User operations

use super::blog_repository::{
    detach_statements, new_uid, timestamp_now, BlogRepository, NoBindings, UidBindings,
};
use super::error::RepositoryError;
use super::schema::USERS;
use crate::models::{NewUser, User, UserUpdate};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct UserRow {
    uid: String,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.uid,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Serialize)]
struct CreateUserBindings {
    uid: String,
    name: String,
    email: String,
    created_at: String,
}

impl<C> BlogRepository<C>
where
    C: Connection,
{
    /// Create a user and return its id
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the email is already taken; nothing is stored.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, user: NewUser) -> Result<String, RepositoryError> {
        let uid = new_uid();

        self.execute(
            "CREATE type::thing('users', $uid) CONTENT {
                uid: $uid,
                name: $name,
                email: $email,
                created_at: $created_at
            };",
            CreateUserBindings {
                uid: uid.clone(),
                name: user.name,
                email: user.email,
                created_at: timestamp_now(),
            },
            "creating user",
        )
        .await?;

        debug!("Created user {}", uid);
        Ok(uid)
    }

    /// All users, in no particular order
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = self
            .fetch(
                "SELECT uid, name, email FROM users;",
                NoBindings {},
                "listing users",
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let rows: Vec<UserRow> = self
            .fetch(
                "SELECT uid, name, email FROM users WHERE uid = $uid LIMIT 1;",
                UidBindings::new(id),
                "fetching user",
            )
            .await?;
        Ok(rows.into_iter().map(Into::into).next())
    }

    /// Merge the supplied fields onto the user
    ///
    /// # Errors
    ///
    /// `ConstraintViolation` if the new email belongs to another user.
    #[instrument(skip(self, update))]
    pub async fn update_user(&self, id: &str, update: UserUpdate) -> Result<(), RepositoryError> {
        self.merge_properties(USERS, id, update, "updating user")
            .await
    }

    /// Delete a user along with every article and comment they wrote
    ///
    /// Authored nodes are removed outright, not just detached. Comments other
    /// users left on the removed articles survive without an article edge.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<(), RepositoryError> {
        let query = format!(
            "BEGIN TRANSACTION;\n\
             LET $user = (SELECT VALUE id FROM users WHERE uid = $uid);\n\
             LET $authored = (SELECT VALUE out FROM wrote WHERE in INSIDE $user);\n\
             LET $doomed = array::concat($user, $authored);\n\
             {}\
             DELETE $doomed;\n\
             COMMIT TRANSACTION;",
            detach_statements("$doomed")
        );

        self.execute(query, UidBindings::new(id), "deleting user")
            .await?;

        debug!("Deleted user {} and authored content", id);
        Ok(())
    }
}
