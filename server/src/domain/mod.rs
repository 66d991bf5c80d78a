pub(crate) mod comment;
pub(crate) mod error;
pub(crate) mod ownership;
pub(crate) mod page;
pub(crate) mod post;
pub(crate) mod user;
