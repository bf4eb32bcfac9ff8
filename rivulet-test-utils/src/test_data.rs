// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_models::Post;

pub fn post_first() -> Post {
    Post {
        user_id: 1,
        id: 1,
        title: "sunt aut facere repellat provident".to_string(),
        body: "quia et suscipit\nsuscipit recusandae consequuntur".to_string(),
    }
}

pub fn post_second() -> Post {
    Post {
        user_id: 1,
        id: 2,
        title: "qui est esse".to_string(),
        body: "est rerum tempore vitae\nsequi sint nihil".to_string(),
    }
}

pub fn post_third() -> Post {
    Post {
        user_id: 2,
        id: 11,
        title: "et ea vero quia laudantium autem".to_string(),
        body: "delectus reiciendis molestiae occaecati".to_string(),
    }
}

pub fn sample_posts() -> Vec<Post> {
    vec![post_first(), post_second(), post_third()]
}

/// Serializes posts the way the remote service does (camelCase keys).
pub fn posts_json(posts: &[Post]) -> Vec<u8> {
    serde_json::to_vec(posts).expect("posts serialize to JSON")
}

/// A JSON object that is well formed but not a list of posts.
pub fn wrong_shape_json() -> Vec<u8> {
    br#"{"posts": [], "total": 0}"#.to_vec()
}

pub fn malformed_json() -> Vec<u8> {
    br#"[{"userId": 1, "id": 1, "title": "#.to_vec()
}
