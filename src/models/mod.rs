//! Domain models

mod album;
mod artist;
mod user;

pub use album::Album;
pub use artist::Artist;
pub use user::User;
