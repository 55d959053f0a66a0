use crate::database::{contents, ratings, PooledSqliteConnection, SqlitePool};
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::prelude::*;
use domain::{
    Content, ContentRepository, DomainError, Rating, RatingRepository, UnitOfWork,
    UnitOfWorkFactory,
};
use std::collections::HashSet;
use tracing::warn;

// Database models
#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = contents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ContentModel {
    id: String,
    title: String,
    description: String,
    video: String,
}

#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = ratings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct RatingModel {
    id: String,
    content_id: String,
    user_id: String,
    score: i32,
}

impl From<ContentModel> for Content {
    fn from(model: ContentModel) -> Self {
        Content::with_id(model.id, model.title, model.description, model.video)
    }
}

impl From<&Content> for ContentModel {
    fn from(content: &Content) -> Self {
        ContentModel {
            id: content.id.clone(),
            title: content.title.clone(),
            description: content.description.clone(),
            video: content.video.clone(),
        }
    }
}

impl From<RatingModel> for Rating {
    fn from(model: RatingModel) -> Self {
        Rating {
            id: model.id,
            content_id: model.content_id,
            user_id: model.user_id,
            score: model.score,
        }
    }
}

impl From<&Rating> for RatingModel {
    fn from(rating: &Rating) -> Self {
        RatingModel {
            id: rating.id.clone(),
            content_id: rating.content_id.clone(),
            user_id: rating.user_id.clone(),
            score: rating.score,
        }
    }
}

fn repository_error(e: diesel::result::Error) -> DomainError {
    DomainError::RepositoryError(e.to_string())
}

/// A pooled connection holding an open transaction.
///
/// The transaction is rolled back on drop unless `commit` succeeded.
pub struct SqliteUnitOfWork {
    conn: PooledSqliteConnection,
    committed: bool,
}

impl SqliteUnitOfWork {
    /// Takes the write lock up front. A deferred transaction that read under
    /// WAL cannot upgrade once another writer committed, and fails with
    /// SQLITE_BUSY without waiting on the busy timeout.
    pub fn begin(mut conn: PooledSqliteConnection) -> Result<Self, DomainError> {
        AnsiTransactionManager::begin_transaction_sql(&mut *conn, "BEGIN IMMEDIATE")
            .map_err(repository_error)?;

        Ok(Self {
            conn,
            committed: false,
        })
    }
}

impl Drop for SqliteUnitOfWork {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        if let Err(e) = AnsiTransactionManager::rollback_transaction(&mut *self.conn) {
            warn!(error = %e, "Failed to roll back unit of work");
        }
    }
}

impl UnitOfWork for SqliteUnitOfWork {
    fn commit(mut self: Box<Self>) -> Result<(), DomainError> {
        AnsiTransactionManager::commit_transaction(&mut *self.conn).map_err(repository_error)?;
        self.committed = true;
        Ok(())
    }
}

impl ContentRepository for SqliteUnitOfWork {
    fn create(&mut self, content: &Content) -> Result<(), DomainError> {
        diesel::insert_into(contents::table)
            .values(&ContentModel::from(content))
            .execute(&mut *self.conn)
            .map_err(repository_error)?;

        Ok(())
    }

    fn retrieve(&mut self, id: &str) -> Result<Option<Content>, DomainError> {
        let result = contents::table
            .filter(contents::id.eq(id))
            .select(ContentModel::as_select())
            .first::<ContentModel>(&mut *self.conn)
            .optional()
            .map_err(repository_error)?;

        Ok(result.map(|model| model.into()))
    }

    fn update(&mut self, content: &Content) -> Result<(), DomainError> {
        diesel::update(contents::table.filter(contents::id.eq(&content.id)))
            .set((
                contents::title.eq(&content.title),
                contents::description.eq(&content.description),
                contents::video.eq(&content.video),
            ))
            .execute(&mut *self.conn)
            .map_err(repository_error)?;

        Ok(())
    }

    fn delete(&mut self, content: &Content) -> Result<(), DomainError> {
        diesel::delete(contents::table.filter(contents::id.eq(&content.id)))
            .execute(&mut *self.conn)
            .map_err(repository_error)?;

        Ok(())
    }

    fn retrieve_all(&mut self) -> Result<HashSet<Content>, DomainError> {
        let result = contents::table
            .select(ContentModel::as_select())
            .load::<ContentModel>(&mut *self.conn)
            .map_err(repository_error)?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }
}

impl RatingRepository for SqliteUnitOfWork {
    fn save(&mut self, rating: &Rating) -> Result<(), DomainError> {
        rating.validate()?;

        diesel::insert_into(ratings::table)
            .values(&RatingModel::from(rating))
            .execute(&mut *self.conn)
            .map_err(repository_error)?;

        Ok(())
    }

    fn find_by_content(&mut self, content_id: &str) -> Result<Vec<Rating>, DomainError> {
        let result = ratings::table
            .filter(ratings::content_id.eq(content_id))
            .select(RatingModel::as_select())
            .load::<RatingModel>(&mut *self.conn)
            .map_err(repository_error)?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }

    fn delete_all_by_content(&mut self, content_id: &str) -> Result<usize, DomainError> {
        diesel::delete(ratings::table.filter(ratings::content_id.eq(content_id)))
            .execute(&mut *self.conn)
            .map_err(repository_error)
    }
}

pub struct SqliteUnitOfWorkFactory {
    pool: SqlitePool,
}

impl SqliteUnitOfWorkFactory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UnitOfWorkFactory for SqliteUnitOfWorkFactory {
    fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError> {
        let conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(Box::new(SqliteUnitOfWork::begin(conn)?))
    }
}
