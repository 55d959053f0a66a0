use crate::database::{users, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{DomainError, User, UserRepository};

// Database model
#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserModel {
    id: String,
    username: String,
    email: String,
    admin: bool,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::with_id(model.id, model.username, model.email, model.admin)
    }
}

impl From<&User> for UserModel {
    fn from(user: &User) -> Self {
        UserModel {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            admin: user.admin,
        }
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_one<F>(&self, query: F) -> Result<Option<User>, DomainError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<Option<UserModel>> + Send + 'static,
    {
        let pool = self.pool.clone();

        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DomainError::RepositoryError(e.to_string()))?;
            query(&mut *conn).map_err(|e| DomainError::RepositoryError(e.to_string()))
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))??;

        Ok(result.map(|model| model.into()))
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let id = id.to_string();
        self.find_one(move |conn| {
            users::table
                .filter(users::id.eq(id))
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let username = username.to_string();
        self.find_one(move |conn| {
            users::table
                .filter(users::username.eq(username))
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email = email.to_string();
        self.find_one(move |conn| {
            users::table
                .filter(users::email.eq(email))
                .select(UserModel::as_select())
                .first::<UserModel>(conn)
                .optional()
        })
        .await
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let pool = self.pool.clone();
        let new_user = UserModel::from(user);
        let user_id = user.id.clone();

        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

            diesel::insert_into(users::table)
                .values(&new_user)
                .execute(&mut conn)
                .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

            // Read back what was stored
            users::table
                .filter(users::id.eq(user_id))
                .select(UserModel::as_select())
                .first::<UserModel>(&mut conn)
                .map_err(|e| DomainError::RepositoryError(e.to_string()))
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))??;

        Ok(result.into())
    }
}
