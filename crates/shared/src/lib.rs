//! Shared infrastructure for the userhub workspace.

pub mod db;

pub use db::create_pool;
