pub mod users;
pub mod videos;
