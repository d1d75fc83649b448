mod comment_dto;
mod post_dto;

pub use comment_dto::{CommentAuthorDto, CommentListItemDto, CommentResponseDto, CreateCommentDto};
pub use post_dto::{
    CreatePostDto, LikeRequestDto, ListPostsQuery, PostResponseDto, MAX_FILE_SIZE,
};
