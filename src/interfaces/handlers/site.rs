use actix_web::{get, http::header, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{constants::SITEMAP_STATIC_ROUTES, AppState};

const PROJECT_PRIORITY: &str = "0.6";

/// Sends the browser to the current resume in object storage.
#[get("/resume")]
pub async fn resume(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Found()
        .insert_header((header::LOCATION, state.admin_handler.resume_url()))
        .finish()
}

/// Static pages plus one entry per project, live or fallback.
#[get("/sitemap.xml")]
#[instrument(skip(state))]
pub async fn sitemap(state: web::Data<AppState>) -> impl Responder {
    let feed = state.content_loader.load_projects().await;
    let today = chrono::Utc::now().date_naive().to_string();

    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );

    for (path, priority) in SITEMAP_STATIC_ROUTES {
        push_url(&mut xml, &format!("{}{}", state.site_url, path), &today, "monthly", priority);
    }

    for project in feed.projects() {
        let lastmod = project
            .created_at
            .map(|at| at.date_naive().to_string())
            .unwrap_or_else(|| today.clone());
        let loc = format!("{}/projects/{}", state.site_url, urlencoding::encode(&project.slug));
        push_url(&mut xml, &loc, &lastmod, "monthly", PROJECT_PRIORITY);
    }

    xml.push_str("</urlset>\n");

    HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(xml)
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, changefreq: &str, priority: &str) {
    xml.push_str(&format!(
        "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{}</priority>\n  </url>\n",
        escape_xml(loc),
        lastmod,
        changefreq,
        priority
    ));
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
