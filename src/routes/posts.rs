use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::models::Post;
use crate::error::{AppError, AppResult};
use crate::repo::NewPost;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list).post(create))
        .route("/posts/{id}", get(get_post).put(update).delete(delete_post))
}

// -- Form handling --

/// Multipart fields of the create/update forms. The `image` part is
/// optional on both.
#[derive(Default)]
struct PostForm {
    title: Option<String>,
    author: Option<String>,
    content: Option<String>,
    fulltext: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

impl PostForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            match field.name().unwrap_or_default() {
                "title" => form.title = Some(field.text().await?),
                "author" => form.author = Some(field.text().await?),
                "content" => form.content = Some(field.text().await?),
                "fulltext" => form.fulltext = Some(field.text().await?),
                "image" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let data = field.bytes().await?;
                    // Browsers submit an empty part when no file was chosen
                    if !file_name.is_empty() && !data.is_empty() {
                        form.image = Some((file_name, data.to_vec()));
                    }
                }
                _ => {
                    // Drain and ignore unknown parts
                    let _ = field.bytes().await?;
                }
            }
        }

        Ok(form)
    }

    fn require_text_fields(&self) -> AppResult<(String, String, String, String)> {
        match (&self.title, &self.author, &self.content, &self.fulltext) {
            (Some(title), Some(author), Some(content), Some(fulltext)) => {
                Ok((
                    title.clone(),
                    author.clone(),
                    content.clone(),
                    fulltext.clone(),
                ))
            }
            _ => Err(AppError::Validation("All fields are required".into())),
        }
    }
}

// -- Handlers --

/// GET /posts — every row, storage order
async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Post>>> {
    let posts = state.posts.list().await?;
    Ok(Json(posts))
}

/// GET /posts/{id}
async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Post>> {
    let post = state
        .posts
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

    Ok(Json(post))
}

/// POST /posts — insert one row; persist the image first (if any) so its
/// store-relative path lands in `image_url`.
async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Post>)> {
    let form = PostForm::read(multipart).await?;
    let (title, author, content, fulltext) = form.require_text_fields()?;

    let image_url = match &form.image {
        Some((name, data)) => Some(state.files.save(name, data).await?),
        None => None,
    };

    let post = state
        .posts
        .create(NewPost {
            title,
            author,
            content,
            fulltext,
            image_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /posts/{id} — full-row overwrite. Without a new file the previous
/// `image_url` is re-read and reused; the two-step read-then-update is
/// not atomic, which mirrors the upstream contract.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<Post>> {
    let form = PostForm::read(multipart).await?;
    let (title, author, content, fulltext) = form.require_text_fields()?;

    let image_url = match &form.image {
        Some((name, data)) => Some(state.files.save(name, data).await?),
        None => match state.posts.find(id).await? {
            Some(prev) => prev.image_url,
            // No matching row: the reused value degrades to an empty string
            None => Some(String::new()),
        },
    };

    let post = state
        .posts
        .update(
            id,
            NewPost {
                title,
                author,
                content,
                fulltext,
                image_url,
            },
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".into()))?;

    Ok(Json(post))
}

/// DELETE /posts/{id} — existence check, then remove. The stored image
/// file stays behind.
async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !state.posts.delete(id).await? {
        return Err(AppError::NotFound("Post not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}
