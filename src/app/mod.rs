pub mod admin;
pub mod engagement;
pub mod pictures;
pub mod posts;
pub mod profiles;
pub mod social;
