pub mod auth_handler;

pub use auth_handler::{get_me, login, signup};
