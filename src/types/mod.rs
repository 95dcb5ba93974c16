// BoardVault shared type definitions
// Each submodule defines types used across the application.

pub mod errors;
pub mod identity;
pub mod record;
pub mod settings;
