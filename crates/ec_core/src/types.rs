use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// A validated keyword / post URL pair, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    keyword: String,
    blog_url: String,
}

impl SearchRequest {
    /// Trims both inputs and rejects the pair when either one ends up empty.
    pub fn new(keyword: &str, blog_url: &str) -> Result<Self> {
        let keyword = keyword.trim();
        let blog_url = blog_url.trim();
        if keyword.is_empty() || blog_url.is_empty() {
            return Err(Error::missing_input());
        }
        Ok(Self {
            keyword: keyword.to_string(),
            blog_url: blog_url.to_string(),
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn blog_url(&self) -> &str {
        &self.blog_url
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub rank: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub blog_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub date: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
}

/// Body of `POST /api/check-exposure`. Every field is optional on the wire;
/// absent values only suppress the matching piece of the view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureCheckResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub keyword: String,
    #[serde(default, deserialize_with = "nullable")]
    pub is_exposed: bool,
    #[serde(default)]
    pub exposed_rank: Option<u32>,
    #[serde(default)]
    pub exposed_result: Option<SearchResultItem>,
    #[serde(default, deserialize_with = "nullable")]
    pub total_results: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub results: Vec<SearchResultItem>,
}

impl ExposureCheckResponse {
    /// Matches on the explicit `rank` field, never on list position.
    pub fn is_highlighted(&self, item: &SearchResultItem) -> bool {
        self.is_exposed && self.exposed_rank == Some(item.rank)
    }

    /// The server message, with empty strings treated as absent.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
