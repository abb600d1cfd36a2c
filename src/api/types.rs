//! Outbound representations. Every document leaving the service goes through
//! one of the `From<Model>` conversions below, which expose the key as a
//! string `id` and drop the version counter and any password material.

use serde::Serialize;

use crate::domain::Violation;
use crate::entities::{blogs, users};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            violations: Vec::new(),
        }
    }

    pub fn with_violations(message: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            error: message.into(),
            violations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i32,
}

impl From<blogs::Model> for BlogDto {
    fn from(model: blogs::Model) -> Self {
        Self {
            id: model.id.to_string(),
            title: model.title,
            author: model.author,
            url: model.url,
            likes: model.likes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub name: String,
}

impl From<users::Model> for UserDto {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id.to_string(),
            username: model.username,
            name: model.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blog_dto_renames_id_and_drops_version() {
        let model = blogs::Model {
            id: 12,
            title: "Be water my friend".to_string(),
            author: "Brane Games".to_string(),
            url: "https://branegames.com".to_string(),
            likes: 10,
            version: 4,
        };

        let json = serde_json::to_value(BlogDto::from(model)).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["id"], "12");
        assert_eq!(obj["likes"], 10);
        assert!(!obj.contains_key("version"));
        assert!(!obj.contains_key("_id"));
        assert_eq!(obj.len(), 5);
    }

    #[test]
    fn user_dto_never_exposes_password_hash() {
        let model = users::Model {
            id: 3,
            username: "bananica".to_string(),
            name: "Ana Banana".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            version: 0,
        };

        let json = serde_json::to_value(UserDto::from(model)).unwrap();
        let text = json.to_string();

        assert_eq!(json["id"], "3");
        assert_eq!(json["username"], "bananica");
        assert!(!text.contains("password"));
        assert!(!text.contains("argon2"));
        assert!(!text.contains("version"));
    }
}
