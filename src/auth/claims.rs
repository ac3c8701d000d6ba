use serde::{Deserialize, Serialize};

/// Claims of a token issued by the external identity provider. `sub` is the
/// provider's stable user id, which owns the local user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub iss: String,
    pub aud: String,
    pub iat: usize,
    pub exp: usize,
}
