// src/repositories/blog_repository.rs
//
// Blog persistence and the Blog <-> Tag association (BlogTag)

use log::debug;
use rusqlite::{params, Row};

use crate::db::{ConnectionProvider, DatabaseConnector};
use crate::domain::{Blog, Tag};
use crate::error::AppResult;
use crate::repositories::Repository;

/// Blog storage plus management of the tags linked to a blog.
pub trait BlogRepository: Repository<Blog> {
    /// Link `tag` to `blog`. A duplicate link surfaces the store's
    /// constraint error untouched.
    fn insert_tag(&self, blog: &Blog, tag: &Tag) -> AppResult<()>;

    /// Unlink a tag from a blog. No-op when the link does not exist.
    fn delete_tag(&self, blog_id: i64, tag_id: i64) -> AppResult<()>;
}

pub struct SqliteBlogRepository<P = DatabaseConnector> {
    provider: P,
}

impl SqliteBlogRepository {
    /// Every call opens its own connection using `connection_string`.
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            provider: DatabaseConnector::new(connection_string),
        }
    }
}

impl<P: ConnectionProvider> SqliteBlogRepository<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// Map one joined row to the blog it belongs to and its tag, if any.
    /// A blog without tags comes back as a single row with NULL tag columns.
    fn row_to_blog_and_tag(row: &Row) -> Result<(Blog, Option<Tag>), rusqlite::Error> {
        let blog = Blog {
            id: row.get("BlogId")?,
            title: row.get("Title")?,
            url: row.get("Url")?,
            tags: Vec::new(),
        };

        let tag_id: Option<i64> = row.get("TagId")?;
        let tag = match tag_id {
            Some(id) => Some(Tag {
                id,
                name: row.get("Name")?,
            }),
            None => None,
        };

        Ok((blog, tag))
    }

    fn row_to_blog(row: &Row) -> Result<Blog, rusqlite::Error> {
        Ok(Blog {
            id: row.get("Id")?,
            title: row.get("Title")?,
            url: row.get("Url")?,
            tags: Vec::new(),
        })
    }
}

impl<P: ConnectionProvider> Repository<Blog> for SqliteBlogRepository<P> {
    fn get(&self, id: i64) -> AppResult<Option<Blog>> {
        let conn = self.provider.connect()?;

        let mut stmt = conn.prepare(
            "SELECT blog.Id AS BlogId, blog.Title, blog.Url, tag.Id AS TagId, tag.Name
             FROM Blog blog
             LEFT JOIN BlogTag blogtag ON blog.Id = blogtag.BlogId
             LEFT JOIN Tag tag ON tag.Id = blogtag.TagId
             WHERE blog.Id = ?1",
        )?;

        // First row seeds the blog, every row may contribute a tag.
        let blog = stmt
            .query_map(params![id], Self::row_to_blog_and_tag)?
            .try_fold(None, |acc: Option<Blog>, row| {
                let (parent, tag) = row?;
                let mut blog = acc.unwrap_or(parent);
                blog.tags.extend(tag);
                Ok::<_, rusqlite::Error>(Some(blog))
            })?;

        debug!("Blog {} lookup: found={}", id, blog.is_some());

        Ok(blog)
    }

    fn get_all(&self) -> AppResult<Vec<Blog>> {
        let conn = self.provider.connect()?;

        let mut stmt = conn.prepare("SELECT Id, Title, Url FROM Blog")?;

        let blogs: Vec<Blog> = stmt
            .query_map([], Self::row_to_blog)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(blogs)
    }

    fn insert(&self, blog: &mut Blog) -> AppResult<()> {
        let conn = self.provider.connect()?;

        let id: i64 = conn.query_row(
            "INSERT INTO Blog (Title, Url)
             VALUES (?1, ?2)
             RETURNING Id",
            params![blog.title, blog.url],
            |row| row.get(0),
        )?;

        blog.id = id;
        debug!("Inserted blog {}", id);

        Ok(())
    }

    fn update(&self, blog: &Blog) -> AppResult<()> {
        let conn = self.provider.connect()?;

        let rows_affected = conn.execute(
            "UPDATE Blog
                SET Title = ?1,
                    Url = ?2
              WHERE Id = ?3",
            params![blog.title, blog.url, blog.id],
        )?;

        debug!("Updated blog {}: {} row(s)", blog.id, rows_affected);

        Ok(())
    }

    fn delete(&self, id: i64) -> AppResult<()> {
        let conn = self.provider.connect()?;

        // Dependents first: Post, then BlogTag, then the blog itself.
        let posts = conn.execute("DELETE FROM Post WHERE BlogId = ?1", params![id])?;
        let links = conn.execute("DELETE FROM BlogTag WHERE BlogId = ?1", params![id])?;
        let blogs = conn.execute("DELETE FROM Blog WHERE Id = ?1", params![id])?;

        debug!(
            "Deleted blog {}: {} blog, {} post(s), {} tag link(s)",
            id, blogs, posts, links
        );

        Ok(())
    }
}

impl<P: ConnectionProvider> BlogRepository for SqliteBlogRepository<P> {
    fn insert_tag(&self, blog: &Blog, tag: &Tag) -> AppResult<()> {
        let conn = self.provider.connect()?;

        conn.execute(
            "INSERT INTO BlogTag (BlogId, TagId)
             VALUES (?1, ?2)",
            params![blog.id, tag.id],
        )?;

        debug!("Linked tag {} to blog {}", tag.id, blog.id);

        Ok(())
    }

    fn delete_tag(&self, blog_id: i64, tag_id: i64) -> AppResult<()> {
        let conn = self.provider.connect()?;

        conn.execute(
            "DELETE FROM BlogTag
              WHERE BlogId = ?1 AND TagId = ?2",
            params![blog_id, tag_id],
        )?;

        Ok(())
    }
}
