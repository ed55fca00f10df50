use serde_json::json;
use star_ranking::models::{CacheEntry, Category, RepoOwner, RepositorySummary};
use star_ranking::types::GitHubRepo;

fn next_js() -> RepositorySummary {
    RepositorySummary {
        name: "next.js".to_string(),
        full_name: "vercel/next.js".to_string(),
        description: Some("The React Framework".to_string()),
        stars: 100_000,
        url: "https://github.com/vercel/next.js".to_string(),
        language: Some("JavaScript".to_string()),
        owner: RepoOwner {
            login: "vercel".to_string(),
            avatar_url: "https://avatars.githubusercontent.com/u/14985020".to_string(),
        },
        updated_at: "2024-05-01T12:00:00Z".to_string(),
        category: Category::MetaFrameworks,
    }
}

#[test]
fn test_summary_serializes_camel_case() {
    let value = serde_json::to_value(next_js()).unwrap();

    assert_eq!(
        value,
        json!({
            "name": "next.js",
            "fullName": "vercel/next.js",
            "description": "The React Framework",
            "stars": 100000,
            "url": "https://github.com/vercel/next.js",
            "language": "JavaScript",
            "owner": {
                "login": "vercel",
                "avatarUrl": "https://avatars.githubusercontent.com/u/14985020"
            },
            "updatedAt": "2024-05-01T12:00:00Z",
            "category": "Meta-Frameworks"
        })
    );
}

#[test]
fn test_summary_accepts_null_optionals() {
    let mut value = serde_json::to_value(next_js()).unwrap();
    value["description"] = serde_json::Value::Null;
    value["language"] = serde_json::Value::Null;

    let summary: RepositorySummary = serde_json::from_value(value).unwrap();

    assert!(summary.description.is_none());
    assert!(summary.language.is_none());
}

#[test]
fn test_summary_rejects_negative_stars() {
    let mut value = serde_json::to_value(next_js()).unwrap();
    value["stars"] = json!(-1);

    assert!(serde_json::from_value::<RepositorySummary>(value).is_err());
}

#[test]
fn test_category_labels_round_trip() {
    for category in Category::ALL {
        let encoded = serde_json::to_string(&category).unwrap();
        assert_eq!(encoded, format!("\"{}\"", category.label()));
        assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
    }
}

#[test]
fn test_category_parse_is_case_insensitive() {
    assert_eq!("meta-frameworks".parse::<Category>().unwrap(), Category::MetaFrameworks);
    assert_eq!(" Build Tools ".parse::<Category>().unwrap(), Category::BuildTools);
    assert!("Databases".parse::<Category>().is_err());
}

#[test]
fn test_cache_entry_shape() {
    let entry = CacheEntry {
        data: vec![next_js()],
        timestamp: 1_700_000_000_000,
    };

    let value = serde_json::to_value(&entry).unwrap();

    assert_eq!(value["timestamp"], 1_700_000_000_000i64);
    assert_eq!(value["data"][0]["fullName"], "vercel/next.js");
}

#[test]
fn test_github_payload_ignores_unknown_fields() {
    let repo: GitHubRepo = serde_json::from_value(json!({
        "id": 70107786,
        "name": "next.js",
        "full_name": "vercel/next.js",
        "private": false,
        "html_url": "https://github.com/vercel/next.js",
        "description": null,
        "stargazers_count": 120000,
        "language": null,
        "owner": { "login": "vercel", "id": 14985020, "avatar_url": "https://a" },
        "updated_at": "2024-05-01T12:00:00Z",
        "license": { "key": "mit" }
    }))
    .unwrap();

    assert_eq!(repo.stargazers_count, 120_000);
    assert!(repo.description.is_none());
    assert_eq!(repo.owner.avatar_url, "https://a");
}

#[test]
fn test_github_payload_defaults_missing_fields() {
    let repo: GitHubRepo = serde_json::from_value(json!({})).unwrap();

    assert_eq!(repo.stargazers_count, 0);
    assert!(repo.full_name.is_empty());
    assert!(repo.owner.login.is_empty());
}
