// Pet-store data model
//
// Wire format follows the swagger petstore schema: camelCase where the API
// uses it (photoUrls), lowercase status values.

use serde::{Deserialize, Serialize};

/// Pet status values accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Available,
    Pending,
    Sold,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Available, Status::Pending, Status::Sold];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Pending => "pending",
            Status::Sold => "sold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// A pet as the API models it. `id`, `name`, and `photoUrls` are required;
/// the rest is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub name: String,
    #[serde(rename = "photoUrls", default)]
    pub photo_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Structural validation of a wire-level pet object: required fields with
/// the right JSON types, and a known status when one is present.
pub fn validate_pet_structure(value: &serde_json::Value) -> std::result::Result<(), &'static str> {
    if !value.get("id").is_some_and(serde_json::Value::is_i64) {
        return Err("id must be an integer");
    }
    if !value.get("name").is_some_and(serde_json::Value::is_string) {
        return Err("name must be a string");
    }
    if !value
        .get("photoUrls")
        .is_some_and(serde_json::Value::is_array)
    {
        return Err("photoUrls must be an array");
    }
    if let Some(status) = value.get("status") {
        let known = status
            .as_str()
            .is_some_and(|s| Status::ALL.iter().any(|v| v.as_str() == s));
        if !known {
            return Err("status must be one of available, pending, sold");
        }
    }
    Ok(())
}
