//! 测试共用的构造函数

use crate::api::PhotoShareApi;
use crate::config::ClientConfig;
use crate::request::MockHttpClient;
use crate::session::Session;
use photoshare_shared::{Role, User};
use serde_json::json;

pub const BASE: &str = "http://api.test/api";

pub fn mock_api() -> PhotoShareApi<MockHttpClient> {
    let config = ClientConfig::with_api_base(BASE).unwrap();
    PhotoShareApi::new(MockHttpClient::new(), &config)
}

pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

pub fn photo_json(id: &str, creator: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": format!("Photo {}", id),
        "blobUrl": format!("https://cdn.test/{}.jpg", id),
        "viewCount": 10,
        "ratingCount": 2,
        "averageRating": 4.0,
        "commentCount": 1,
        "creatorId": creator
    })
}

pub fn photos_json(ids: &[&str], creator: &str) -> serde_json::Value {
    json!({ "data": ids.iter().map(|id| photo_json(id, creator)).collect::<Vec<_>>() })
}

pub fn session_with(role: Role) -> Session {
    Session {
        token: "t".into(),
        user: User {
            id: Some("u1".into()),
            email: "ann@example.com".into(),
            role,
            ..Default::default()
        },
    }
}
