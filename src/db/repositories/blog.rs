use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::domain::{BlogChanges, BlogId, NewBlog};
use crate::entities::{blogs, prelude::*};

pub struct BlogRepository {
    conn: DatabaseConnection,
}

impl BlogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<blogs::Model>> {
        Blogs::find()
            .order_by_asc(blogs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list blogs")
    }

    pub async fn get(&self, id: BlogId) -> Result<Option<blogs::Model>> {
        Blogs::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query blog by ID")
    }

    pub async fn count(&self) -> Result<u64> {
        Blogs::find()
            .count(&self.conn)
            .await
            .context("Failed to count blogs")
    }

    pub async fn insert(&self, blog: NewBlog) -> Result<blogs::Model> {
        let active = blogs::ActiveModel {
            title: Set(blog.title),
            author: Set(blog.author),
            url: Set(blog.url),
            likes: Set(blog.likes),
            version: Set(0),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert blog")
    }

    /// Read-modify-write of a single row by primary key.
    /// Returns `None` when no blog has the given id.
    pub async fn update(&self, id: BlogId, changes: BlogChanges) -> Result<Option<blogs::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let next_version = existing.version + 1;
        let mut active: blogs::ActiveModel = existing.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(author) = changes.author {
            active.author = Set(author);
        }
        if let Some(url) = changes.url {
            active.url = Set(url);
        }
        if let Some(likes) = changes.likes {
            active.likes = Set(likes);
        }
        active.version = Set(next_version);

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update blog")?;

        Ok(Some(updated))
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: BlogId) -> Result<bool> {
        let result = Blogs::delete_by_id(id.value())
            .exec(&self.conn)
            .await
            .context("Failed to delete blog")?;

        Ok(result.rows_affected > 0)
    }
}
