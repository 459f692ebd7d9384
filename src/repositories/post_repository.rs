// src/repositories/post_repository.rs
//
// Post persistence. Posts are the dependents removed first when a blog
// is deleted.

use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::types::Type;
use rusqlite::{params, Row};

use crate::db::{ConnectionProvider, DatabaseConnector};
use crate::domain::Post;
use crate::error::AppResult;
use crate::repositories::Repository;

pub trait PostRepository: Repository<Post> {
    fn get_by_blog(&self, blog_id: i64) -> AppResult<Vec<Post>>;
}

pub struct SqlitePostRepository<P = DatabaseConnector> {
    provider: P,
}

impl SqlitePostRepository {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            provider: DatabaseConnector::new(connection_string),
        }
    }
}

impl<P: ConnectionProvider> SqlitePostRepository<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    fn row_to_post(row: &Row) -> Result<Post, rusqlite::Error> {
        let published_str: String = row.get("PublishDateTime")?;
        let publish_date_time = DateTime::parse_from_rfc3339(&published_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        Ok(Post {
            id: row.get("Id")?,
            title: row.get("Title")?,
            url: row.get("Url")?,
            publish_date_time,
            blog_id: row.get("BlogId")?,
        })
    }
}

impl<P: ConnectionProvider> Repository<Post> for SqlitePostRepository<P> {
    fn get(&self, id: i64) -> AppResult<Option<Post>> {
        let conn = self.provider.connect()?;

        let mut stmt = conn.prepare(
            "SELECT Id, Title, Url, PublishDateTime, BlogId FROM Post WHERE Id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;

        let post = match rows.next()? {
            Some(row) => Some(Self::row_to_post(row)?),
            None => None,
        };

        Ok(post)
    }

    fn get_all(&self) -> AppResult<Vec<Post>> {
        let conn = self.provider.connect()?;

        let mut stmt = conn.prepare("SELECT Id, Title, Url, PublishDateTime, BlogId FROM Post")?;

        let posts: Vec<Post> = stmt
            .query_map([], Self::row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }

    fn insert(&self, post: &mut Post) -> AppResult<()> {
        let conn = self.provider.connect()?;

        let id: i64 = conn.query_row(
            "INSERT INTO Post (Title, Url, PublishDateTime, BlogId)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING Id",
            params![
                post.title,
                post.url,
                post.publish_date_time.to_rfc3339(),
                post.blog_id,
            ],
            |row| row.get(0),
        )?;

        post.id = id;
        debug!("Inserted post {} for blog {}", id, post.blog_id);

        Ok(())
    }

    fn update(&self, post: &Post) -> AppResult<()> {
        let conn = self.provider.connect()?;

        conn.execute(
            "UPDATE Post
                SET Title = ?1,
                    Url = ?2,
                    PublishDateTime = ?3,
                    BlogId = ?4
              WHERE Id = ?5",
            params![
                post.title,
                post.url,
                post.publish_date_time.to_rfc3339(),
                post.blog_id,
                post.id,
            ],
        )?;

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.provider.connect()?;
        conn.execute("DELETE FROM Post WHERE Id = ?1", params![id])?;
        Ok(())
    }
}

impl<P: ConnectionProvider> PostRepository for SqlitePostRepository<P> {
    fn get_by_blog(&self, blog_id: i64) -> AppResult<Vec<Post>> {
        let conn = self.provider.connect()?;

        let mut stmt = conn.prepare(
            "SELECT Id, Title, Url, PublishDateTime, BlogId
             FROM Post
             WHERE BlogId = ?1
             ORDER BY PublishDateTime",
        )?;

        let posts: Vec<Post> = stmt
            .query_map(params![blog_id], Self::row_to_post)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(posts)
    }
}
