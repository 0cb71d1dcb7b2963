pub mod layout;
pub mod prompt;
pub mod review_form;
pub mod reviews_list;
