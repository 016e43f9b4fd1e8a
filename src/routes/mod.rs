pub mod auth;
pub mod blocks;
pub mod gallery;
pub mod header;
pub mod pages;
pub mod site;
pub mod testimonials;
pub mod upload;

use actix_web::web;

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/auth").configure(auth::create_routes))
        .service(web::scope("/pages").configure(pages::create_routes))
        .service(web::scope("/layout-blocks").configure(blocks::create_routes))
        .service(web::scope("/testimonials").configure(testimonials::create_routes))
        .service(web::scope("/gallery").configure(gallery::create_routes))
        .service(web::scope("/header-config").configure(header::create_routes))
        .service(web::scope("/render").configure(site::create_routes))
        .route("/block-types", web::get().to(blocks::get_block_types))
        .configure(upload::create_routes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use std::sync::Arc;

    use crate::config::Config;
    use crate::storage::memory::MemoryStorage;
    use crate::AppState;

    fn test_state(storage: MemoryStorage) -> web::Data<AppState> {
        test_state_with_upload_dir(storage, "uploads")
    }

    fn test_state_with_upload_dir(storage: MemoryStorage, upload_dir: &str) -> web::Data<AppState> {
        web::Data::new(AppState {
            storage: Arc::new(storage),
            config: Config {
                host: "127.0.0.1".to_string(),
                port: 0,
                database_url: None,
                upload_dir: upload_dir.to_string(),
                admin_email: "admin@example.com".to_string(),
                admin_password: "admin123".to_string(),
                cors_allow_origin: "*".to_string(),
            },
        })
    }

    macro_rules! test_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .service(web::scope("/api").configure(create_routes)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn homepage_end_to_end() {
        let app = test_app!(test_state(MemoryStorage::new()));

        let req = test::TestRequest::post()
            .uri("/api/pages")
            .set_json(serde_json::json!({
                "slug": "homepage",
                "title": "Homepage"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let page: serde_json::Value = test::read_body_json(resp).await;
        let page_id = page["id"].as_str().unwrap().to_string();

        for (order, block_type) in [(1, "hero"), (2, "about"), (3, "services")] {
            let content = match block_type {
                "hero" => serde_json::json!({ "title": "Welcome" }),
                "about" => serde_json::json!({ "title": "About", "founderName": "Dana" }),
                _ => serde_json::json!({ "title": "Services", "services": [] }),
            };
            let req = test::TestRequest::post()
                .uri("/api/layout-blocks")
                .set_json(serde_json::json!({
                    "pageId": page_id,
                    "type": block_type,
                    "content": content,
                    "order": order
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 201);
        }

        let req = test::TestRequest::get()
            .uri("/api/layout-blocks/homepage")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let blocks: serde_json::Value = test::read_body_json(resp).await;
        let blocks = blocks.as_array().unwrap();
        assert_eq!(blocks.len(), 3);
        let types: Vec<&str> = blocks.iter().map(|b| b["type"].as_str().unwrap()).collect();
        assert_eq!(types, vec!["hero", "about", "services"]);
        let orders: Vec<i64> = blocks.iter().map(|b| b["order"].as_i64().unwrap()).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(blocks[0]["content"]["title"], "Welcome");
    }

    #[actix_web::test]
    async fn block_create_accepts_page_slug() {
        let app = test_app!(test_state(MemoryStorage::seeded("admin@example.com")));

        // The admin editor submits the page slug in the pageId field.
        let req = test::TestRequest::post()
            .uri("/api/layout-blocks")
            .set_json(serde_json::json!({
                "pageId": "homepage",
                "type": "cta",
                "content": { "title": "Come visit" },
                "order": 4
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let block: serde_json::Value = test::read_body_json(resp).await;
        assert_ne!(block["pageId"], "homepage");

        let req = test::TestRequest::post()
            .uri("/api/layout-blocks")
            .set_json(serde_json::json!({
                "pageId": "no-such-page",
                "type": "cta",
                "content": { "title": "x" }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn block_content_must_match_type() {
        let app = test_app!(test_state(MemoryStorage::seeded("admin@example.com")));

        let req = test::TestRequest::post()
            .uri("/api/layout-blocks")
            .set_json(serde_json::json!({
                "pageId": "homepage",
                "type": "hero",
                "content": { "title": 123 }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        // Unknown type strings are rejected at deserialization.
        let req = test::TestRequest::post()
            .uri("/api/layout-blocks")
            .set_json(serde_json::json!({
                "pageId": "homepage",
                "type": "carousel",
                "content": { "title": "x" }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn block_update_and_delete_not_found() {
        let app = test_app!(test_state(MemoryStorage::new()));

        let req = test::TestRequest::patch()
            .uri("/api/layout-blocks/missing")
            .set_json(serde_json::json!({ "order": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let req = test::TestRequest::delete()
            .uri("/api/layout-blocks/missing")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn reorder_renumbers_from_array_position() {
        let app = test_app!(test_state(MemoryStorage::seeded("admin@example.com")));

        let req = test::TestRequest::get()
            .uri("/api/layout-blocks/homepage")
            .to_request();
        let blocks: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
        let ids: Vec<String> = blocks
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids.len(), 3);

        // Submit in reverse with nonsense order values; positions win.
        let payload: Vec<serde_json::Value> = ids
            .iter()
            .rev()
            .map(|id| serde_json::json!({ "id": id, "order": 99 }))
            .collect();
        let req = test::TestRequest::put()
            .uri("/api/layout-blocks/reorder")
            .set_json(serde_json::json!({ "blocks": payload }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let req = test::TestRequest::get()
            .uri("/api/layout-blocks/homepage")
            .to_request();
        let blocks: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
        let got: Vec<String> = blocks
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_str().unwrap().to_string())
            .collect();
        let want: Vec<String> = ids.into_iter().rev().collect();
        assert_eq!(got, want);
        let orders: Vec<i64> = blocks
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["order"].as_i64().unwrap())
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[actix_web::test]
    async fn reorder_rejects_non_array_body() {
        let app = test_app!(test_state(MemoryStorage::new()));
        let req = test::TestRequest::put()
            .uri("/api/layout-blocks/reorder")
            .set_json(serde_json::json!({ "blocks": "not-an-array" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn login_checks_the_credential_pair() {
        let app = test_app!(test_state(MemoryStorage::seeded("admin@example.com")));

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "email": "admin@example.com",
                "password": "admin123"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["email"], "admin@example.com");
        assert!(body["user"].get("password").is_none());

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "email": "admin@example.com",
                "password": "wrong"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn testimonial_create_applies_defaults_and_validates() {
        let app = test_app!(test_state(MemoryStorage::new()));

        let req = test::TestRequest::post()
            .uri("/api/testimonials")
            .set_json(serde_json::json!({
                "name": "A", "rating": 5, "text": "t", "date": "d"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["isVisible"], true);
        assert_eq!(body["order"], 0);

        let req = test::TestRequest::post()
            .uri("/api/testimonials")
            .set_json(serde_json::json!({
                "name": "A", "rating": 6, "text": "t", "date": "d"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid data");
        assert!(body["errors"]["rating"].is_array());
    }

    #[actix_web::test]
    async fn second_header_config_replaces_the_first() {
        let app = test_app!(test_state(MemoryStorage::new()));

        let req = test::TestRequest::get().uri("/api/header-config").to_request();
        let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body, serde_json::json!({}));

        let req = test::TestRequest::post()
            .uri("/api/header-config")
            .set_json(serde_json::json!({
                "navigationItems": [{ "name": "Home", "href": "/" }]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::post()
            .uri("/api/header-config")
            .set_json(serde_json::json!({
                "navigationItems": [
                    { "name": "Home", "href": "/" },
                    { "name": "Gallery", "href": "/gallery" }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::get().uri("/api/header-config").to_request();
        let body: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["navigationItems"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn render_plan_falls_back_when_empty() {
        let app = test_app!(test_state(MemoryStorage::new()));

        let req = test::TestRequest::get().uri("/api/render/homepage").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["sections"].as_array().unwrap().len(), 6);
        assert_eq!(body["sections"][0]["type"], "hero");
        assert_eq!(body["headerStyles"]["topBar"]["background"], "#2dd4bf");
        assert_eq!(body["headerStyles"]["mainNav"]["background"], "#f97316");
    }

    #[actix_web::test]
    async fn block_type_catalog_lists_every_type() {
        let app = test_app!(test_state(MemoryStorage::new()));

        let req = test::TestRequest::get().uri("/api/block-types").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 10);
        assert!(entries
            .iter()
            .any(|e| e["type"] == "hero" && e["defaultContent"]["title"].is_string()));
    }

    #[actix_web::test]
    async fn upload_accepts_images_and_rejects_other_types() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app!(test_state_with_upload_dir(
            MemoryStorage::new(),
            dir.path().to_str().unwrap()
        ));

        let boundary = "test-boundary";
        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"pic.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             fakepngbytes\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let url = body["url"].as_str().unwrap();
        assert!(url.starts_with("/uploads/file-"));
        assert!(url.ends_with(".png"));

        let body = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             hello\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={}", boundary),
            ))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn page_patch_returns_updated_record() {
        let app = test_app!(test_state(MemoryStorage::seeded("admin@example.com")));

        let req = test::TestRequest::get().uri("/api/pages/homepage").to_request();
        let page: serde_json::Value = test::read_body_json(test::call_service(&app, req).await).await;
        let id = page["id"].as_str().unwrap();

        let req = test::TestRequest::patch()
            .uri(&format!("/api/pages/{}", id))
            .set_json(serde_json::json!({ "title": "New title", "isPublished": false }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "New title");
        assert_eq!(body["isPublished"], false);

        let req = test::TestRequest::get().uri("/api/pages/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
