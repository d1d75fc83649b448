//! Storage module for media file management
//!
//! Provides a local-disk store for uploaded media, addressed by
//! `<uuid>.<extension>` filenames under a configured root directory.

mod media_store;

pub use media_store::{parse_media_filename, MediaStore};
