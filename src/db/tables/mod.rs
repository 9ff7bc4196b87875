//! Table operations

mod album_table;
mod artist_table;
mod genre_table;
mod like_table;
mod user_table;

pub use album_table::AlbumTable;
pub use artist_table::ArtistTable;
pub use genre_table::GenreTable;
pub use like_table::LikeTable;
pub use user_table::UserTable;
