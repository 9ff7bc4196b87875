//! Artist model

use serde::{Deserialize, Serialize};

/// An artist; referenced by many albums
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}
