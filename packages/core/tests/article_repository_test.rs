//! Integration tests for article, tag and category operations
//!
//! Tests cover:
//! - Creating articles with author, tag and category edges
//! - Silent skipping of unknown foreign ids
//! - Full-replace rewiring on update (author, tags, categories)
//! - Detach semantics when deleting tags, categories and articles

use anyhow::Result;
use blog_graph_core::{
    ArticleUpdate, BlogRepository, NewArticle, NewCategory, NewComment, NewTag, NewUser,
    RepositoryConfig, TaxonomyUpdate,
};
use serde::Deserialize;
use std::collections::BTreeSet;

async fn create_test_repo() -> Result<BlogRepository> {
    Ok(BlogRepository::connect(&RepositoryConfig::new("mem://")).await?)
}

fn set<const N: usize>(ids: [&String; N]) -> BTreeSet<String> {
    ids.into_iter().cloned().collect()
}

#[derive(Debug, Deserialize)]
struct AuthorEdge {
    author: String,
}

/// Uids of every user holding a `wrote` edge into the article
async fn authors_of(repo: &BlogRepository, article_id: &str) -> Result<Vec<String>> {
    let mut response = repo
        .db()
        .query("SELECT in.uid AS author FROM wrote WHERE out = type::thing('articles', $uid);")
        .bind(("uid", article_id.to_string()))
        .await?;
    let edges: Vec<AuthorEdge> = response.take(0)?;
    Ok(edges.into_iter().map(|e| e.author).collect())
}

// =========================================================================
// Create
// =========================================================================

#[tokio::test]
async fn test_create_article_links_author_tags_and_categories() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo
        .create_user(NewUser::new("Author", "author@example.com"))
        .await?;
    let rust = repo.create_tag(NewTag::new("Rust", "/tags/rust")).await?;
    let graphs = repo
        .create_tag(NewTag::new("Graphs", "/tags/graphs"))
        .await?;
    let tutorials = repo
        .create_category(NewCategory::new("Tutorials", "/cat/tutorials"))
        .await?;

    let id = repo
        .create_article(
            NewArticle::new("Hello", "First post", &author)
                .with_tags([&rust, &graphs])
                .with_categories([&tutorials]),
        )
        .await?;

    let article = repo.get_article(&id).await?.expect("article should exist");
    assert_eq!(article.id, id);
    assert_eq!(article.title, "Hello");
    assert_eq!(article.text, "First post");
    assert_eq!(article.author_id.as_deref(), Some(author.as_str()));
    assert_eq!(article.tags, set([&rust, &graphs]));
    assert_eq!(article.categories, set([&tutorials]));
    Ok(())
}

#[tokio::test]
async fn test_create_article_skips_unknown_ids() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo
        .create_user(NewUser::new("Author", "author@example.com"))
        .await?;
    let known = repo.create_tag(NewTag::new("Known", "/tags/known")).await?;

    let id = repo
        .create_article(
            NewArticle::new("Partial", "body", &author)
                .with_tags([known.clone(), "missing-tag".to_string()])
                .with_categories(["missing-category"]),
        )
        .await?;

    let article = repo.get_article(&id).await?.expect("article should exist");
    assert_eq!(article.tags, set([&known]));
    assert!(article.categories.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_create_article_with_unknown_author_stores_orphan() -> Result<()> {
    let repo = create_test_repo().await?;

    let id = repo
        .create_article(NewArticle::new("Orphan", "body", "nobody"))
        .await?;

    let article = repo.get_article(&id).await?.expect("article should exist");
    assert!(article.author_id.is_none());
    Ok(())
}

#[tokio::test]
async fn test_list_articles_with_author_name() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo
        .create_user(NewUser::new("Writer", "writer@example.com"))
        .await?;
    let id = repo
        .create_article(NewArticle::new("Listed", "body", &author))
        .await?;

    let summaries = repo.list_articles().await?;
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, id);
    assert_eq!(summaries[0].title, "Listed");

    let listings = repo.list_articles_with_author().await?;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].author_name.as_deref(), Some("Writer"));
    assert_eq!(listings[0].text, "body");
    Ok(())
}

// =========================================================================
// Update / rewiring
// =========================================================================

#[tokio::test]
async fn test_update_replaces_author_edge() -> Result<()> {
    let repo = create_test_repo().await?;

    let old_author = repo.create_user(NewUser::new("Old", "old@example.com")).await?;
    let new_author = repo.create_user(NewUser::new("New", "new@example.com")).await?;
    let id = repo
        .create_article(NewArticle::new("Handover", "body", &old_author))
        .await?;

    repo.update_article(&id, ArticleUpdate::relationships(&new_author))
        .await?;

    let article = repo.get_article(&id).await?.expect("article should exist");
    assert_eq!(article.author_id.as_deref(), Some(new_author.as_str()));
    assert_eq!(authors_of(&repo, &id).await?, vec![new_author]);
    Ok(())
}

#[tokio::test]
async fn test_update_with_same_author_keeps_single_edge() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo.create_user(NewUser::new("Same", "same@example.com")).await?;
    let id = repo
        .create_article(NewArticle::new("Stable", "body", &author))
        .await?;

    repo.update_article(&id, ArticleUpdate::relationships(&author).title("Stable v2"))
        .await?;
    repo.update_article(&id, ArticleUpdate::relationships(&author))
        .await?;

    assert_eq!(authors_of(&repo, &id).await?, vec![author]);
    Ok(())
}

#[tokio::test]
async fn test_update_tag_set_is_exact() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo.create_user(NewUser::new("A", "a@example.com")).await?;
    let t1 = repo.create_tag(NewTag::new("one", "/t/1")).await?;
    let t2 = repo.create_tag(NewTag::new("two", "/t/2")).await?;
    let t3 = repo.create_tag(NewTag::new("three", "/t/3")).await?;
    let c1 = repo.create_category(NewCategory::new("c1", "/c/1")).await?;
    let c2 = repo.create_category(NewCategory::new("c2", "/c/2")).await?;

    let id = repo
        .create_article(
            NewArticle::new("Tagged", "body", &author)
                .with_tags([&t1, &t2])
                .with_categories([&c1]),
        )
        .await?;

    repo.update_article(
        &id,
        ArticleUpdate::relationships(&author)
            .with_tags([&t2, &t3])
            .with_categories([&c2]),
    )
    .await?;

    let article = repo.get_article(&id).await?.expect("article should exist");
    assert_eq!(article.tags, set([&t2, &t3]));
    assert_eq!(article.categories, set([&c2]));

    // Clearing both sets leaves no edges behind
    repo.update_article(&id, ArticleUpdate::relationships(&author))
        .await?;
    let article = repo.get_article(&id).await?.expect("article should exist");
    assert!(article.tags.is_empty());
    assert!(article.categories.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_update_merges_only_supplied_properties() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo.create_user(NewUser::new("A", "a@example.com")).await?;
    let id = repo
        .create_article(NewArticle::new("Title", "Original body", &author))
        .await?;
    let created_at = repo
        .get_article(&id)
        .await?
        .expect("article should exist")
        .created_at;

    repo.update_article(&id, ArticleUpdate::relationships(&author).title("New title"))
        .await?;

    let article = repo.get_article(&id).await?.expect("article should exist");
    assert_eq!(article.title, "New title");
    assert_eq!(article.text, "Original body");
    assert_eq!(article.created_at, created_at);
    Ok(())
}

#[tokio::test]
async fn test_update_with_unknown_author_drops_author_edge() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo.create_user(NewUser::new("A", "a@example.com")).await?;
    let tag = repo.create_tag(NewTag::new("kept", "/t/kept")).await?;
    let id = repo
        .create_article(NewArticle::new("Title", "body", &author))
        .await?;

    repo.update_article(&id, ArticleUpdate::relationships("ghost").with_tags([&tag]))
        .await?;

    let article = repo.get_article(&id).await?.expect("article should exist");
    assert!(article.author_id.is_none());
    // Rewiring of the other edges still happens
    assert_eq!(article.tags, set([&tag]));
    Ok(())
}

#[tokio::test]
async fn test_update_unknown_article_creates_nothing() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo.create_user(NewUser::new("A", "a@example.com")).await?;
    let tag = repo.create_tag(NewTag::new("t", "/t")).await?;

    repo.update_article(
        "missing",
        ArticleUpdate::relationships(&author).title("x").with_tags([&tag]),
    )
    .await?;

    assert!(repo.get_article("missing").await?.is_none());
    assert!(repo.list_articles().await?.is_empty());
    Ok(())
}

// =========================================================================
// Tags and categories
// =========================================================================

#[tokio::test]
async fn test_tag_and_category_crud() -> Result<()> {
    let repo = create_test_repo().await?;

    let tag = repo.create_tag(NewTag::new("rust", "/tags/rust")).await?;
    let category = repo
        .create_category(NewCategory::new("news", "/cat/news"))
        .await?;

    repo.update_tag(
        &tag,
        TaxonomyUpdate {
            name: Some("Rust".to_string()),
            ..Default::default()
        },
    )
    .await?;
    repo.update_category(
        &category,
        TaxonomyUpdate {
            url: Some("/categories/news".to_string()),
            ..Default::default()
        },
    )
    .await?;

    let fetched = repo.get_tag(&tag).await?.expect("tag should exist");
    assert_eq!(fetched.name, "Rust");
    assert_eq!(fetched.url, "/tags/rust");

    let fetched = repo
        .get_category(&category)
        .await?
        .expect("category should exist");
    assert_eq!(fetched.name, "news");
    assert_eq!(fetched.url, "/categories/news");

    assert_eq!(repo.list_tags().await?.len(), 1);
    assert_eq!(repo.list_categories().await?.len(), 1);

    repo.delete_category(&category).await?;
    assert!(repo.get_category(&category).await?.is_none());
    assert!(repo.get_tag("unknown").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_delete_tag_detaches_from_articles() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo.create_user(NewUser::new("A", "a@example.com")).await?;
    let doomed = repo.create_tag(NewTag::new("doomed", "/t/doomed")).await?;
    let kept = repo.create_tag(NewTag::new("kept", "/t/kept")).await?;
    let first = repo
        .create_article(NewArticle::new("One", "body", &author).with_tags([&doomed, &kept]))
        .await?;
    let second = repo
        .create_article(NewArticle::new("Two", "body", &author).with_tags([&doomed]))
        .await?;

    repo.delete_tag(&doomed).await?;

    assert!(repo.get_tag(&doomed).await?.is_none());

    let first = repo.get_article(&first).await?.expect("article should remain");
    assert_eq!(first.tags, set([&kept]));

    let second = repo.get_article(&second).await?.expect("article should remain");
    assert!(second.tags.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_delete_article_detaches_comments() -> Result<()> {
    let repo = create_test_repo().await?;

    let author = repo.create_user(NewUser::new("A", "a@example.com")).await?;
    let tag = repo.create_tag(NewTag::new("t", "/t")).await?;
    let id = repo
        .create_article(NewArticle::new("Gone", "body", &author).with_tags([&tag]))
        .await?;
    let comment = repo
        .create_comment(NewComment::new(&id, &author, "first!"))
        .await?;

    repo.delete_article(&id).await?;

    assert!(repo.get_article(&id).await?.is_none());
    assert!(authors_of(&repo, &id).await?.is_empty());

    // Tag and comment nodes remain; only their edges to the article are gone
    assert!(repo.get_tag(&tag).await?.is_some());
    let comment = repo.get_comment(&comment).await?.expect("comment should remain");
    assert!(comment.article_id.is_none());
    assert_eq!(comment.author_id.as_deref(), Some(author.as_str()));
    Ok(())
}
