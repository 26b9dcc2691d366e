//! Database operations for posts.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::DatabaseID,
    post::{Post, PostBuilder, PostWithCategory, ValidatedPost},
    query::PostQuery,
};

/// Insert a post and return it with its generated ID.
pub fn create_post(post: PostBuilder, connection: &Connection) -> Result<Post, Error> {
    connection.execute(
        "INSERT INTO post (title, content, category_id, created_at) VALUES (?1, ?2, ?3, ?4);",
        (
            &post.title,
            &post.content,
            post.category_id,
            post.created_at,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Post {
        id,
        title: post.title,
        content: post.content,
        category_id: post.category_id,
        created_at: post.created_at,
    })
}

/// Retrieve a single post by ID.
pub fn get_post(post_id: DatabaseID, connection: &Connection) -> Result<Post, Error> {
    connection
        .prepare(
            "SELECT id, title, content, category_id, created_at FROM post WHERE id = :id;",
        )?
        .query_row(&[(":id", &post_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve the posts matching `query`, joined with their category names.
pub fn search_posts(
    query: &PostQuery,
    connection: &Connection,
) -> Result<Vec<PostWithCategory>, Error> {
    let prepared = query.to_sql();

    connection
        .prepare(&prepared.statement)?
        .query_map(&prepared.params()[..], map_joined_row)?
        .map(|maybe_post| maybe_post.map_err(|error| error.into()))
        .collect()
}

/// Update a post's fields. Returns an error if the post doesn't exist.
pub fn update_post(
    post_id: DatabaseID,
    fields: ValidatedPost,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE post SET title = ?1, content = ?2, category_id = ?3 WHERE id = ?4",
        (&fields.title, &fields.content, fields.category_id, post_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingPost);
    }

    Ok(())
}

/// Delete a post by ID. Returns an error if the post doesn't exist.
pub fn delete_post(post_id: DatabaseID, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM post WHERE id = ?1", [post_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingPost);
    }

    Ok(())
}

/// Initialize the post table and indexes.
///
/// The foreign key to category is restrict-on-delete, which blocks the
/// deletion of any category that still has posts.
pub fn create_post_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS post (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            category_id INTEGER NOT NULL REFERENCES category(id) ON DELETE RESTRICT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_post_category_id ON post(category_id);
        CREATE INDEX IF NOT EXISTS idx_post_created_at ON post(created_at);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Post, rusqlite::Error> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        category_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn map_joined_row(row: &Row) -> Result<PostWithCategory, rusqlite::Error> {
    Ok(PostWithCategory {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
        category_name: row.get(4)?,
    })
}
