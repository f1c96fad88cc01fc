pub mod model;
pub mod repository;

pub use model::{NewUserDB, UserDB};
pub use repository::UserRepository;
