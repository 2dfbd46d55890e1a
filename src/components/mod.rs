pub mod average;
pub mod pages;
pub mod review_form;
pub mod review_preview;
pub mod reviews_list;
