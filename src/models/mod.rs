pub mod project;
pub mod search_result;
pub mod tag;
pub mod user;
pub mod version;
