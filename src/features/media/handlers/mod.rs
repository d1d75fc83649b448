pub mod media_handler;

pub use media_handler::get_media;
