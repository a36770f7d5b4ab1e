//! Domain services for Campaign Manager.
//!
//! Services contain business logic that operates on domain models.

pub mod access;
pub mod access_cache;

pub use access::{
    can_be_dm, can_create, can_read_location, is_campaign_dm, is_character_controller,
    is_character_owner,
};

pub use access_cache::ReadAccessCache;
