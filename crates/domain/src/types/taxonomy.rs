//! Categories and tags

use serde::{Deserialize, Serialize};

/// Reward or merchant category. Categories form a tree through `parent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    /// Category id.
    pub id: u64,
    /// Localised title.
    pub title: Option<String>,
    /// Internal name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// English title.
    pub title_en: Option<String>,
    /// Thai title.
    pub title_th: Option<String>,
    /// Parent category.
    pub parent: Option<Box<Category>>,
    /// Where the category is used.
    pub usage: Option<String>,
}

/// Free-form tag attached to rewards, merchants and campaigns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    /// Tag id.
    pub id: u64,
    /// Tag name.
    pub name: Option<String>,
    /// Tag title.
    pub title: Option<String>,
}
