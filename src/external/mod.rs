pub mod auth0;

pub use auth0::*;
