//! A small review-collection site: visitors leave a name, a star rating and a
//! comment, reviews are listed newest first, and the site owner can be emailed
//! about each new submission.

pub mod components;
pub mod models;
pub mod validation;

#[cfg(feature = "ssr")]
pub mod app;
#[cfg(feature = "ssr")]
pub mod config;
pub mod db;
#[cfg(feature = "ssr")]
pub mod error;
#[cfg(feature = "ssr")]
pub mod flash;
#[cfg(feature = "ssr")]
pub mod notifier;
#[cfg(feature = "ssr")]
pub mod routes;
