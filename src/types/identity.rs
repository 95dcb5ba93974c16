use serde::{Deserialize, Serialize};

/// Opaque handle for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHandle {
    pub uid: String,
    pub anonymous: bool,
}
