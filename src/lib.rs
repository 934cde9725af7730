//! nhlhosts - hosts file manager that redirects streaming auth hosts.

pub mod actions;
pub mod cli;
pub mod config;
pub mod dns;
pub mod domain;
pub mod hosts;
pub mod menu;
pub mod platform;
pub mod session;
