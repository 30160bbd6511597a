
use portfolio_site::use_cases::content::FallbackPolicy;
use reqwest::StatusCode;
use serde_json::Value;
use test_utils::*;

fn slugs(body: &Value) -> Vec<String> {
    body["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap().to_string())
        .collect()
}

const CATALOG_SLUGS: [&str; 3] = ["ecommerce-dashboard", "task-manager", "ai-content-gen"];

#[actix_rt::test]
async fn live_projects_are_listed_newest_first() {
    let app = TestApp::spawn().await;
    app.backend.seed("Old Orb", "old-orb", &["WebGL"], false, 30);
    app.backend.seed("New Shop", "new-shop", &["Rust"], true, 1);

    let (status, body) = app.get_json("/projects").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "live");
    assert_eq!(slugs(&body), vec!["new-shop", "old-orb"]);
    assert_eq!(body["projects"][1]["imageUrl"], Value::Null);
}

#[actix_rt::test]
async fn backend_failure_serves_static_catalog_in_declared_order() {
    let app = TestApp::spawn().await;
    app.backend.seed("Live Only", "live-only", &[], false, 1);
    app.backend.set_failing(true);

    let (status, body) = app.get_json("/projects").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(slugs(&body), CATALOG_SLUGS);
}

#[actix_rt::test]
async fn empty_backend_follows_fallback_policy() {
    let app = TestApp::spawn().await;
    let (_, body) = app.get_json("/projects").await;
    assert_eq!(body["source"], "fallback");
    assert_eq!(slugs(&body), CATALOG_SLUGS);

    let strict = TestApp::spawn_with(|c| c.fallback_policy = FallbackPolicy::OnErrorOnly).await;
    let (_, body) = strict.get_json("/projects").await;
    assert_eq!(body["source"], "live");
    assert_eq!(body["total"], 0);
}

#[actix_rt::test]
async fn every_view_refetches_from_backend() {
    let app = TestApp::spawn().await;
    app.backend.seed("Orb", "orb", &[], false, 1);

    app.get_json("/projects").await;
    app.backend.seed("Later", "later", &[], false, 0);
    let (_, body) = app.get_json("/projects").await;

    assert_eq!(slugs(&body), vec!["later", "orb"]);
}

#[actix_rt::test]
async fn search_filters_by_title_or_technology() {
    let app = TestApp::spawn().await;
    app.backend.seed("Interactive Orb", "orb", &["WebGL", "GSAP"], false, 2);
    app.backend.seed("Storefront", "shop", &["Next.js", "Stripe"], false, 1);

    let (_, by_tech) = app.get_json("/projects?q=stripe").await;
    assert_eq!(slugs(&by_tech), vec!["shop"]);

    let (_, by_title) = app.get_json("/projects?q=ORB").await;
    assert_eq!(slugs(&by_title), vec!["orb"]);

    let (_, nothing) = app.get_json("/projects?q=cobol").await;
    assert_eq!(nothing["total"], 0);
}

#[actix_rt::test]
async fn project_detail_renders_paragraphs_and_html() {
    let app = TestApp::spawn().await;
    app.backend.seed("Orb", "orb", &["WebGL"], false, 1);

    let (status, body) = app.get_json("/projects/orb").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "live");
    assert_eq!(body["project"]["title"], "Orb");
    assert_eq!(body["paragraphs"].as_array().unwrap().len(), 2);
    assert!(body["content_html"].as_str().unwrap().contains("<p>Second paragraph.</p>"));
}

#[actix_rt::test]
async fn project_detail_falls_back_to_catalog() {
    let app = TestApp::spawn().await;
    app.backend.set_failing(true);

    let (status, body) = app.get_json("/projects/task-manager").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["project"]["id"], "2");
}

#[actix_rt::test]
async fn unknown_slug_is_not_found() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/projects/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");
}

#[actix_rt::test]
async fn home_shows_profile_and_featured_projects() {
    let app = TestApp::spawn().await;
    app.backend.seed("Featured", "featured", &[], true, 2);
    app.backend.seed("Plain", "plain", &[], false, 1);

    let (status, body) = app.get_json("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["name"], "Jeremiah Egemonye");
    assert_eq!(body["skills"].as_array().unwrap().len(), 10);
    assert_eq!(slugs(&serde_json::json!({"projects": body["featured_projects"]})), vec!["featured"]);
}

#[actix_rt::test]
async fn about_lists_experience() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/about").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["experiences"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn sitemap_lists_static_pages_and_projects() {
    let app = TestApp::spawn().await;
    app.backend.seed("Orb", "orb", &[], false, 1);

    let response = app.client.get(app.url("/sitemap.xml")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let xml = response.text().await.unwrap();

    assert!(xml.contains("<loc>https://jerrystudios.vercel.app</loc>"));
    assert!(xml.contains("<loc>https://jerrystudios.vercel.app/about</loc>"));
    assert!(xml.contains("<loc>https://jerrystudios.vercel.app/projects/orb</loc>"));
    assert!(xml.contains("<priority>1.0</priority>"));
    assert!(xml.contains("<priority>0.6</priority>"));
}

#[actix_rt::test]
async fn resume_redirects_to_public_object() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/resume")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers()["location"],
        format!("{}/storage/v1/object/public/{}/resume.pdf", app.backend_url, BUCKET).as_str()
    );
}

#[actix_rt::test]
async fn health_reports_backend_reachability() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get_json("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["status"] == "healthy" || body["status"] == "degraded");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
