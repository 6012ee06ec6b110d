//! Wire types for the OpenLibrary JSON API.

pub mod search;
