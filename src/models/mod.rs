pub mod form;
pub mod requester;
pub mod review;
pub mod score;
pub mod target;
