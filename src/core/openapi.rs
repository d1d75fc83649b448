use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{self, dtos as auth_dtos};
use crate::features::media::handlers as media_handlers;
use crate::features::posts::{dtos as posts_dtos, handlers as posts_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::auth_handler::signup,
        auth::handlers::auth_handler::login,
        auth::handlers::auth_handler::get_me,
        // Users
        users_handlers::user_handler::subscribe,
        users_handlers::user_handler::unsubscribe,
        // Posts
        posts_handlers::post_handler::create_post,
        posts_handlers::post_handler::list_posts,
        posts_handlers::post_handler::toggle_like,
        // Comments
        posts_handlers::comment_handler::create_comment,
        posts_handlers::comment_handler::list_comments,
        posts_handlers::comment_handler::delete_comment,
        // Media
        media_handlers::media_handler::get_media,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_dtos::SignupRequestDto,
            auth_dtos::LoginRequestDto,
            auth_dtos::TokenResponseDto,
            ApiResponse<auth_dtos::TokenResponseDto>,
            // Users
            users_dtos::UserResponseDto,
            ApiResponse<users_dtos::UserResponseDto>,
            // Posts
            posts_dtos::CreatePostDto,
            posts_dtos::LikeRequestDto,
            posts_dtos::PostResponseDto,
            ApiResponse<posts_dtos::PostResponseDto>,
            ApiResponse<Vec<posts_dtos::PostResponseDto>>,
            // Comments
            posts_dtos::CreateCommentDto,
            posts_dtos::CommentResponseDto,
            posts_dtos::CommentAuthorDto,
            posts_dtos::CommentListItemDto,
            ApiResponse<posts_dtos::CommentResponseDto>,
            ApiResponse<Vec<posts_dtos::CommentListItemDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Signup, login and current-user endpoints"),
        (name = "users", description = "Subscription graph between users"),
        (name = "posts", description = "Posts with media attachments and likes"),
        (name = "comments", description = "Comments on posts"),
        (name = "media", description = "Stored media file serving"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Piazza API",
        version = "0.1.0",
        description = "API documentation for Piazza",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
