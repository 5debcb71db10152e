//! Tests for partial-update serialization

use crate::models::{ArticleUpdate, CommentUpdate, TaxonomyUpdate, UserUpdate};
use serde_json::json;

#[test]
fn test_user_update_omits_unset_fields() {
    let update = UserUpdate {
        email: Some("new@example.com".to_string()),
        ..Default::default()
    };
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value, json!({ "email": "new@example.com" }));
}

#[test]
fn test_empty_taxonomy_update_is_empty_object() {
    let value = serde_json::to_value(TaxonomyUpdate::default()).unwrap();
    assert_eq!(value, json!({}));
}

#[test]
fn test_article_update_deserializes_without_optional_fields() {
    let update: ArticleUpdate = serde_json::from_value(json!({
        "author_id": "u-1",
        "tag_ids": ["t-1", "t-2"]
    }))
    .unwrap();

    assert!(update.title.is_none());
    assert!(update.text.is_none());
    assert_eq!(update.author_id, "u-1");
    assert_eq!(update.tag_ids, vec!["t-1", "t-2"]);
    assert!(update.category_ids.is_empty());
}

#[test]
fn test_article_update_builder() {
    let update = ArticleUpdate::relationships("u-2")
        .title("Retitled")
        .with_tags(["t-9"])
        .with_categories(Vec::<String>::new());

    assert_eq!(update.title.as_deref(), Some("Retitled"));
    assert!(update.text.is_none());
    assert_eq!(update.tag_ids, vec!["t-9"]);
}

#[test]
fn test_comment_update_text_is_optional() {
    let update = CommentUpdate::new("u-1", "a-1");
    let value = serde_json::to_value(&update).unwrap();
    assert_eq!(value, json!({ "author_id": "u-1", "article_id": "a-1" }));

    let update = update.text("edited");
    assert_eq!(update.text.as_deref(), Some("edited"));
}
