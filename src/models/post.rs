//! Social feed posts and likes

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// What a post is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Workout,
    Meal,
    Achievement,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Workout => "workout",
            PostType::Meal => "meal",
            PostType::Achievement => "achievement",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "workout" | "training" => Some(PostType::Workout),
            "meal" | "food" => Some(PostType::Meal),
            "achievement" => Some(PostType::Achievement),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreate {
    pub user_id: i64,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// A post as seen by a particular viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPost {
    pub id: i64,
    pub user_id: i64,
    pub author_name: String,
    pub post_type: PostType,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub likes: i64,
    pub is_liked: bool,
    pub comment_count: i64,
    pub created_at: String,
}

const FEED_SELECT: &str = r#"
    SELECT
        p.*,
        u.name AS author_name,
        (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS likes,
        EXISTS(SELECT 1 FROM post_likes l WHERE l.post_id = p.id AND l.user_id = ?1) AS is_liked,
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count
    FROM posts p
    JOIN users u ON u.id = p.user_id
"#;

fn parse_post_type(row: &Row) -> rusqlite::Result<PostType> {
    let s: String = row.get("post_type")?;
    Ok(PostType::from_str(&s).unwrap_or(PostType::Achievement))
}

impl Post {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            post_type: parse_post_type(row)?,
            title: row.get("title")?,
            content: row.get("content")?,
            image_url: row.get("image_url")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn create(conn: &Connection, data: &PostCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO posts (user_id, post_type, title, content, image_url)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![data.user_id, data.post_type.as_str(), data.title, data.content, data.image_url],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM posts WHERE id = ?1")?;

        match stmt.query_row([id], Self::from_row) {
            Ok(post) => Ok(Some(post)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Newest posts first, annotated for the viewer
    pub fn list_feed(conn: &Connection, viewer_id: i64, limit: i64, offset: i64) -> DbResult<Vec<FeedPost>> {
        let sql = format!("{FEED_SELECT} ORDER BY p.created_at DESC, p.id DESC LIMIT ?2 OFFSET ?3");
        let mut stmt = conn.prepare(&sql)?;
        let posts = stmt
            .query_map(params![viewer_id, limit, offset], FeedPost::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(posts)
    }

    pub fn get_for_viewer(conn: &Connection, id: i64, viewer_id: i64) -> DbResult<Option<FeedPost>> {
        let sql = format!("{FEED_SELECT} WHERE p.id = ?2");
        let post = conn
            .query_row(&sql, params![viewer_id, id], FeedPost::from_row)
            .optional()?;
        Ok(post)
    }

    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM posts WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

impl FeedPost {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            author_name: row.get("author_name")?,
            post_type: parse_post_type(row)?,
            title: row.get("title")?,
            content: row.get("content")?,
            image_url: row.get("image_url")?,
            likes: row.get("likes")?,
            is_liked: row.get::<_, i64>("is_liked")? != 0,
            comment_count: row.get("comment_count")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Per-user like on a post
pub struct PostLike;

impl PostLike {
    /// Flip the user's like on a post; returns whether it is now liked
    pub fn toggle(conn: &Connection, post_id: i64, user_id: i64) -> DbResult<bool> {
        let removed = conn.execute(
            "DELETE FROM post_likes WHERE post_id = ?1 AND user_id = ?2",
            params![post_id, user_id],
        )?;
        if removed > 0 {
            return Ok(false);
        }

        conn.execute(
            "INSERT INTO post_likes (post_id, user_id) VALUES (?1, ?2)",
            params![post_id, user_id],
        )?;
        Ok(true)
    }

    pub fn count(conn: &Connection, post_id: i64) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM post_likes WHERE post_id = ?1",
            [post_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
