//! Comments on feed posts

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreate {
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
}

impl Comment {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            post_id: row.get("post_id")?,
            user_id: row.get("user_id")?,
            author_name: row.get("author_name")?,
            content: row.get("content")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, data: &CommentCreate) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO comments (post_id, user_id, content) VALUES (?1, ?2, ?3)",
            params![data.post_id, data.user_id, data.content],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT c.*, u.name AS author_name
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.id = ?1
            "#,
        )?;

        match stmt.query_row([id], Self::from_row) {
            Ok(comment) => Ok(Some(comment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Comments on a post in the order they were written
    pub fn list_for_post(conn: &Connection, post_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT c.*, u.name AS author_name
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = ?1
            ORDER BY c.created_at, c.id
            "#,
        )?;
        let comments = stmt
            .query_map([post_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use crate::models::user::test_support::create_reference_user;
    use crate::models::{Post, PostCreate, PostType};

    #[test]
    fn test_comments_in_order_and_cascade_with_post() {
        let conn = test_connection();
        let jin = create_reference_user(&conn, "Jin");
        let cha = create_reference_user(&conn, "Cha");
        let post = Post::create(&conn, &PostCreate {
            user_id: jin.id,
            post_type: PostType::Achievement,
            title: "New PR".to_string(),
            content: "100kg squat".to_string(),
            image_url: None,
        })
        .unwrap();

        for (user, text) in [(cha.id, "Nice!"), (jin.id, "Thanks")] {
            Comment::create(&conn, &CommentCreate {
                post_id: post.id,
                user_id: user,
                content: text.to_string(),
            })
            .unwrap();
        }

        let comments = Comment::list_for_post(&conn, post.id).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].author_name, "Cha");
        assert_eq!(comments[1].content, "Thanks");

        Post::delete(&conn, post.id).unwrap();
        assert!(Comment::list_for_post(&conn, post.id).unwrap().is_empty());
    }
}
