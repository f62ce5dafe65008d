//! Social Feed MCP Tools
//!
//! Posts, likes, and comments.

use serde::Serialize;

use crate::db::Database;
use crate::models::{Comment, CommentCreate, FeedPost, Post, PostCreate, PostLike, PostType, User};

#[derive(Debug, Serialize)]
pub struct ListFeedResponse {
    pub posts: Vec<FeedPost>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Serialize)]
pub struct ToggleLikeResponse {
    pub post_id: i64,
    pub is_liked: bool,
    pub likes: i64,
}

#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub post: FeedPost,
    pub comments: Vec<Comment>,
}

fn require_user(conn: &rusqlite::Connection, user_id: i64) -> Result<(), String> {
    User::get_by_id(conn, user_id)
        .map_err(|e| format!("Failed to get profile: {}", e))?
        .map(|_| ())
        .ok_or_else(|| format!("Profile not found with id: {}", user_id))
}

fn require_post(conn: &rusqlite::Connection, post_id: i64) -> Result<(), String> {
    Post::get_by_id(conn, post_id)
        .map_err(|e| format!("Failed to get post: {}", e))?
        .map(|_| ())
        .ok_or_else(|| format!("Post not found with id: {}", post_id))
}

pub fn create_post(
    db: &Database,
    user_id: i64,
    post_type: &str,
    title: &str,
    content: &str,
    image_url: Option<String>,
) -> Result<FeedPost, String> {
    let post_type = PostType::from_str(post_type)
        .ok_or_else(|| format!("Unknown post type: {} (expected workout, meal, or achievement)", post_type))?;
    if title.trim().is_empty() {
        return Err("Post title must not be empty".to_string());
    }
    if content.trim().is_empty() {
        return Err("Post content must not be empty".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    require_user(&conn, user_id)?;

    let post = Post::create(&conn, &PostCreate {
        user_id,
        post_type,
        title: title.trim().to_string(),
        content: content.trim().to_string(),
        image_url: image_url.filter(|u| !u.trim().is_empty()),
    })
    .map_err(|e| format!("Failed to create post: {}", e))?;

    Post::get_for_viewer(&conn, post.id, user_id)
        .map_err(|e| format!("Failed to get post: {}", e))?
        .ok_or_else(|| "Post not found after insert".to_string())
}

pub fn list_feed(db: &Database, viewer_id: i64, limit: i64, offset: i64) -> Result<ListFeedResponse, String> {
    let limit = limit.clamp(1, 100);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let posts = Post::list_feed(&conn, viewer_id, limit, offset)
        .map_err(|e| format!("Failed to list feed: {}", e))?;

    Ok(ListFeedResponse { posts, limit, offset })
}

pub fn get_post(db: &Database, post_id: i64, viewer_id: i64) -> Result<Option<PostDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let Some(post) = Post::get_for_viewer(&conn, post_id, viewer_id)
        .map_err(|e| format!("Failed to get post: {}", e))?
    else {
        return Ok(None);
    };
    let comments = Comment::list_for_post(&conn, post_id)
        .map_err(|e| format!("Failed to list comments: {}", e))?;

    Ok(Some(PostDetail { post, comments }))
}

pub fn toggle_like(db: &Database, post_id: i64, user_id: i64) -> Result<ToggleLikeResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    require_user(&conn, user_id)?;
    require_post(&conn, post_id)?;

    let is_liked = PostLike::toggle(&conn, post_id, user_id)
        .map_err(|e| format!("Failed to toggle like: {}", e))?;
    let likes = PostLike::count(&conn, post_id).map_err(|e| format!("Failed to count likes: {}", e))?;

    Ok(ToggleLikeResponse { post_id, is_liked, likes })
}

pub fn add_comment(db: &Database, post_id: i64, user_id: i64, content: &str) -> Result<Comment, String> {
    if content.trim().is_empty() {
        return Err("Comment must not be empty".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    require_user(&conn, user_id)?;
    require_post(&conn, post_id)?;

    Comment::create(&conn, &CommentCreate {
        post_id,
        user_id,
        content: content.trim().to_string(),
    })
    .map_err(|e| format!("Failed to add comment: {}", e))
}

pub fn list_comments(db: &Database, post_id: i64) -> Result<Vec<Comment>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Comment::list_for_post(&conn, post_id).map_err(|e| format!("Failed to list comments: {}", e))
}

pub fn delete_post(db: &Database, post_id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Post::delete(&conn, post_id).map_err(|e| format!("Failed to delete post: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::profiles::onboard;
    use crate::tools::profiles::test_support::{reference_input, temp_database};

    #[test]
    fn test_post_like_comment_flow() {
        let (_dir, db) = temp_database();
        let jin = onboard(&db, reference_input()).unwrap().user.id;
        let mut other = reference_input();
        other.name = "Cha Hae-In".to_string();
        let cha = onboard(&db, other).unwrap().user.id;

        let post = create_post(&db, jin, "achievement", "E-Rank cleared", "First week done", None).unwrap();
        assert_eq!(post.author_name, "Sung Jin-Woo");
        assert_eq!(post.likes, 0);

        let liked = toggle_like(&db, post.id, cha).unwrap();
        assert!(liked.is_liked);
        assert_eq!(liked.likes, 1);

        add_comment(&db, post.id, cha, "Congrats!").unwrap();

        let feed = list_feed(&db, cha, 20, 0).unwrap();
        assert_eq!(feed.posts.len(), 1);
        assert!(feed.posts[0].is_liked);
        assert_eq!(feed.posts[0].comment_count, 1);

        let unliked = toggle_like(&db, post.id, cha).unwrap();
        assert!(!unliked.is_liked);
        assert_eq!(unliked.likes, 0);

        let detail = get_post(&db, post.id, jin).unwrap().unwrap();
        assert_eq!(detail.comments[0].author_name, "Cha Hae-In");
    }

    #[test]
    fn test_validation() {
        let (_dir, db) = temp_database();
        let jin = onboard(&db, reference_input()).unwrap().user.id;

        assert!(create_post(&db, jin, "selfie", "t", "c", None).is_err());
        assert!(create_post(&db, jin, "meal", " ", "c", None).is_err());
        assert!(create_post(&db, 999, "meal", "t", "c", None).is_err());
        assert!(toggle_like(&db, 123, jin).unwrap_err().contains("Post not found"));
        assert!(add_comment(&db, 123, jin, "hi").is_err());
    }

    #[test]
    fn test_delete_post() {
        let (_dir, db) = temp_database();
        let jin = onboard(&db, reference_input()).unwrap().user.id;
        let post = create_post(&db, jin, "meal", "Lunch", "Rice and chicken", None).unwrap();

        assert!(delete_post(&db, post.id).unwrap());
        assert!(get_post(&db, post.id, jin).unwrap().is_none());
    }
}
