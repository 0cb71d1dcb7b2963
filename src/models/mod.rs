pub mod flash;
pub mod review;
