mod comment;
mod like;
mod media_attachment;
mod post;

pub use comment::{Comment, CommentWithAuthor};
pub use like::Like;
pub use media_attachment::MediaAttachment;
pub use post::Post;
