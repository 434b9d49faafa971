//! Identity layer: bearer tokens and per-request owner resolution

pub mod owner;
pub mod tokens;

pub use owner::{resolve_owner, CurrentOwner, GUEST_COOKIE};
pub use tokens::TokenIssuer;
