pub mod config;
pub mod contact;
pub mod content;
pub mod i18n;
pub mod pages;
pub mod routing;
pub mod server;
