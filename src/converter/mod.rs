//! Local steps: check the file, label it, encode it.

pub mod data_uri;
pub mod mime;
pub mod path;
