// BoardVault services
// Services wrap the collaborators the board consumes: identity, clipboard,
// configuration and transient notices.

pub mod clipboard;
pub mod identity;
pub mod settings_engine;
pub mod toaster;
