// src/repositories/tag_repository.rs

use log::debug;
use rusqlite::{params, Row};

use crate::db::{ConnectionProvider, DatabaseConnector};
use crate::domain::Tag;
use crate::error::AppResult;
use crate::repositories::Repository;

pub struct SqliteTagRepository<P = DatabaseConnector> {
    provider: P,
}

impl SqliteTagRepository {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            provider: DatabaseConnector::new(connection_string),
        }
    }
}

impl<P: ConnectionProvider> SqliteTagRepository<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    fn row_to_tag(row: &Row) -> Result<Tag, rusqlite::Error> {
        Ok(Tag {
            id: row.get("Id")?,
            name: row.get("Name")?,
        })
    }
}

impl<P: ConnectionProvider> Repository<Tag> for SqliteTagRepository<P> {
    fn get(&self, id: i64) -> AppResult<Option<Tag>> {
        let conn = self.provider.connect()?;

        let mut stmt = conn.prepare("SELECT Id, Name FROM Tag WHERE Id = ?1")?;
        let mut rows = stmt.query(params![id])?;

        let tag = match rows.next()? {
            Some(row) => Some(Self::row_to_tag(row)?),
            None => None,
        };

        Ok(tag)
    }

    fn get_all(&self) -> AppResult<Vec<Tag>> {
        let conn = self.provider.connect()?;

        let mut stmt = conn.prepare("SELECT Id, Name FROM Tag")?;

        let tags: Vec<Tag> = stmt
            .query_map([], Self::row_to_tag)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tags)
    }

    fn insert(&self, tag: &mut Tag) -> AppResult<()> {
        let conn = self.provider.connect()?;

        let id: i64 = conn.query_row(
            "INSERT INTO Tag (Name) VALUES (?1) RETURNING Id",
            params![tag.name],
            |row| row.get(0),
        )?;

        tag.id = id;
        debug!("Inserted tag {}", id);

        Ok(())
    }

    fn update(&self, tag: &Tag) -> AppResult<()> {
        let conn = self.provider.connect()?;

        conn.execute(
            "UPDATE Tag SET Name = ?1 WHERE Id = ?2",
            params![tag.name, tag.id],
        )?;

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.provider.connect()?;

        // Links go first or the foreign key on BlogTag rejects the delete.
        let links = conn.execute("DELETE FROM BlogTag WHERE TagId = ?1", params![id])?;
        conn.execute("DELETE FROM Tag WHERE Id = ?1", params![id])?;

        debug!("Deleted tag {} and {} blog link(s)", id, links);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::create_test_database;
    use crate::domain::Blog;
    use crate::repositories::{BlogRepository, SqliteBlogRepository};

    #[test]
    fn test_insert_assigns_id_and_get_finds_it() {
        let (_dir, connector) = create_test_database();
        let repo = SqliteTagRepository::new(connector.connection_string());

        let mut tag = Tag::new("rust");
        repo.insert(&mut tag).unwrap();

        assert!(tag.id > 0);
        assert_eq!(repo.get(tag.id).unwrap(), Some(tag));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let (_dir, connector) = create_test_database();
        let repo = SqliteTagRepository::new(connector.connection_string());

        assert_eq!(repo.get(3).unwrap(), None);
    }

    #[test]
    fn test_update_renames() {
        let (_dir, connector) = create_test_database();
        let repo = SqliteTagRepository::new(connector.connection_string());

        let mut tag = Tag::new("rsut");
        repo.insert(&mut tag).unwrap();
        tag.name = "rust".to_string();
        repo.update(&tag).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all, vec![tag]);
    }

    #[test]
    fn test_delete_removes_blog_links_first() {
        let (_dir, connector) = create_test_database();
        let tags = SqliteTagRepository::new(connector.connection_string());
        let blogs = SqliteBlogRepository::new(connector.connection_string());

        let mut blog = Blog::new("A", "http://a");
        blogs.insert(&mut blog).unwrap();
        let mut tag = Tag::new("x");
        tags.insert(&mut tag).unwrap();
        blogs.insert_tag(&blog, &tag).unwrap();

        tags.delete(tag.id).unwrap();

        assert!(tags.get(tag.id).unwrap().is_none());
        let loaded = blogs.get(blog.id).unwrap().unwrap();
        assert!(loaded.tags.is_empty());
    }
}
