//! Product API integration tests.
//!
//! Run with: `cargo test -p catalog-api --test products_test`

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::{create_minimal_png, png_part, product_form, text_form, valid_product_form};
use helpers::{setup_test_app, setup_test_app_with, test_upload_config, TestApp, TEST_BASE_URL};
use serde_json::Value;

async fn create_product(app: &TestApp, form: MultipartForm) -> Value {
    let response = app.client().post("/api/products").multipart(form).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

fn image_urls(product: &Value) -> Vec<String> {
    product["imageUrls"]
        .as_array()
        .expect("imageUrls array")
        .iter()
        .map(|u| u.as_str().expect("url string").to_string())
        .collect()
}

#[tokio::test]
async fn test_create_product_returns_image_urls_under_base_url() {
    let app = setup_test_app().await;

    let product = create_product(&app, valid_product_form(3)).await;

    let urls = image_urls(&product);
    assert_eq!(urls.len(), 3);
    for url in &urls {
        assert!(url.starts_with(&format!("{}/uploads/", TEST_BASE_URL)));
        assert!(url.ends_with(".png"));
        assert!(app.file_for_url(url).exists());
    }
    assert!(product.get("imagePaths").is_none());
    assert_eq!(product["name"], "Desk Lamp");
    assert_eq!(product["category"], "home");
    assert_eq!(product["price"], 24.5);
}

#[tokio::test]
async fn test_create_without_images_fails() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/products")
        .multipart(valid_product_form(0))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "MISSING_IMAGE");
    assert_eq!(body["errors"]["images"], "Product image is required");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_without_images_and_invalid_fields_reports_both() {
    let app = setup_test_app().await;

    let form = text_form(&[("name", "Lamp"), ("price", "-1"), ("category", "home")]);
    let response = app.client().post("/api/products").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["errors"].get("price").is_some());
    assert_eq!(body["errors"]["images"], "Product image is required");
}

#[tokio::test]
async fn test_create_with_negative_price_names_price() {
    let app = setup_test_app().await;

    let form = product_form(
        &[("name", "Lamp"), ("price", "-1"), ("category", "home")],
        1,
    );
    let response = app.client().post("/api/products").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["errors"]["price"], "Price must be a positive number");
    assert_eq!(app.stored_file_count(), 0);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_create_with_unknown_category_names_category() {
    let app = setup_test_app().await;

    let form = product_form(
        &[("name", "Robot"), ("price", "10"), ("category", "toys")],
        1,
    );
    let response = app.client().post("/api/products").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["errors"]["category"], "Invalid category");
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_create_with_missing_fields_reports_each() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/products")
        .multipart(product_form(&[("name", "   ")], 1))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let errors = &response.json::<Value>()["errors"];
    assert_eq!(errors["name"], "Product name is required");
    assert_eq!(errors["price"], "Price is required");
    assert_eq!(errors["category"], "Category is required");
    assert!(errors.get("images").is_none());
}

#[tokio::test]
async fn test_create_with_non_numeric_price() {
    let app = setup_test_app().await;

    let form = product_form(
        &[("name", "Lamp"), ("price", "cheap"), ("category", "home")],
        1,
    );
    let response = app.client().post("/api/products").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["errors"]["price"],
        "Price must be a number"
    );
}

#[tokio::test]
async fn test_create_then_get_round_trips_trimmed_fields() {
    let app = setup_test_app().await;

    let form = product_form(
        &[
            ("name", "  Reading Lamp  "),
            ("description", "  Warm light\n"),
            ("price", "19.99"),
            ("category", "home"),
        ],
        2,
    );
    let created = create_product(&app, form).await;
    let id = created["id"].as_str().expect("id");

    let response = app.client().get(&format!("/api/products/{}", id)).await;
    response.assert_status_ok();
    let fetched = response.json::<Value>();

    assert_eq!(fetched["name"], "Reading Lamp");
    assert_eq!(fetched["description"], "Warm light");
    assert_eq!(fetched["price"], 19.99);
    assert_eq!(fetched["category"], "home");
    assert_eq!(image_urls(&fetched), image_urls(&created));
    assert_eq!(fetched["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_list_products_newest_first() {
    let app = setup_test_app().await;

    let first = create_product(&app, valid_product_form(1)).await;
    let second = create_product(
        &app,
        product_form(
            &[("name", "Novel"), ("price", "12"), ("category", "books")],
            1,
        ),
    )
    .await;

    let response = app.client().get("/api/products").await;
    response.assert_status_ok();
    let products = response.json::<Vec<Value>>();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["id"], second["id"]);
    assert_eq!(products[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_get_unknown_product_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/api/products/4f6b2e0e-8d7a-4c36-9d8e-3b1f5c2a9e10")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Product not found");
}

#[tokio::test]
async fn test_malformed_id_is_distinct_from_not_found() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/products/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "MALFORMED_ID");

    let response = app.client().delete("/api/products/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = app
        .client()
        .put("/api/products/not-a-uuid")
        .multipart(valid_product_form(1))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_update_price_only_keeps_other_fields() {
    let app = setup_test_app().await;

    let created = create_product(&app, valid_product_form(2)).await;
    let id = created["id"].as_str().expect("id");

    let response = app
        .client()
        .put(&format!("/api/products/{}", id))
        .multipart(text_form(&[("price", "42")]))
        .await;
    response.assert_status_ok();
    let updated = response.json::<Value>();

    assert_eq!(updated["price"], 42.0);
    assert_eq!(updated["name"], created["name"]);
    assert_eq!(updated["description"], created["description"]);
    assert_eq!(updated["category"], created["category"]);
    assert_eq!(image_urls(&updated), image_urls(&created));
    for url in image_urls(&updated) {
        assert!(app.file_for_url(&url).exists());
    }
}

#[tokio::test]
async fn test_update_with_images_replaces_and_deletes_old_files() {
    let app = setup_test_app().await;

    let created = create_product(&app, valid_product_form(2)).await;
    let id = created["id"].as_str().expect("id");
    let old_urls = image_urls(&created);

    let response = app
        .client()
        .put(&format!("/api/products/{}", id))
        .multipart(product_form(&[], 1))
        .await;
    response.assert_status_ok();
    let new_urls = image_urls(&response.json::<Value>());

    assert_eq!(new_urls.len(), 1);
    assert!(!old_urls.contains(&new_urls[0]));
    assert!(app.file_for_url(&new_urls[0]).exists());
    for url in &old_urls {
        assert!(!app.file_for_url(url).exists());
    }
    assert_eq!(app.stored_file_count(), 1);
}

#[tokio::test]
async fn test_failed_update_discards_new_files_and_keeps_record() {
    let app = setup_test_app().await;

    let created = create_product(&app, valid_product_form(1)).await;
    let id = created["id"].as_str().expect("id");

    let response = app
        .client()
        .put(&format!("/api/products/{}", id))
        .multipart(product_form(&[("category", "toys")], 2))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["errors"]["category"],
        "Invalid category"
    );

    assert_eq!(app.stored_file_count(), 1);
    let fetched = app
        .client()
        .get(&format!("/api/products/{}", id))
        .await
        .json::<Value>();
    assert_eq!(fetched["category"], "home");
    assert_eq!(image_urls(&fetched), image_urls(&created));
}

#[tokio::test]
async fn test_update_unknown_product_leaves_no_files() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .put("/api/products/4f6b2e0e-8d7a-4c36-9d8e-3b1f5c2a9e10")
        .multipart(product_form(&[("price", "5")], 1))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_delete_removes_record_and_files() {
    let app = setup_test_app().await;

    let created = create_product(&app, valid_product_form(2)).await;
    let id = created["id"].as_str().expect("id");

    let response = app.client().delete(&format!("/api/products/{}", id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "Product deleted");

    let response = app.client().get(&format!("/api/products/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);

    for url in image_urls(&created) {
        assert!(!app.file_for_url(&url).exists());
    }

    let response = app.client().delete(&format!("/api/products/{}", id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_tolerates_already_missing_file() {
    let app = setup_test_app().await;

    let created = create_product(&app, valid_product_form(2)).await;
    let id = created["id"].as_str().expect("id");
    let urls = image_urls(&created);
    std::fs::remove_file(app.file_for_url(&urls[0])).expect("remove file");

    let response = app.client().delete(&format!("/api/products/{}", id)).await;
    response.assert_status_ok();
    assert!(app.store.is_empty().await);
    assert!(!app.file_for_url(&urls[1]).exists());
}

#[tokio::test]
async fn test_too_many_images_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/products")
        .multipart(valid_product_form(6))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["errors"]["images"],
        "At most 5 images are allowed"
    );
    assert_eq!(app.stored_file_count(), 0);
}

#[tokio::test]
async fn test_oversized_image_rejected() {
    let mut upload = test_upload_config();
    upload.max_file_size = 1024;
    let app = setup_test_app_with(upload).await;

    let form = text_form(&[("name", "Lamp"), ("price", "10"), ("category", "home")]).add_part(
        "images",
        Part::bytes(vec![0u8; 4096])
            .file_name("huge.png")
            .mime_type("image/png"),
    );
    let response = app.client().post("/api/products").multipart(form).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json::<Value>()["code"], "PAYLOAD_TOO_LARGE");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_disallowed_file_type_rejected() {
    let app = setup_test_app().await;

    let form = text_form(&[("name", "Lamp"), ("price", "10"), ("category", "home")]).add_part(
        "images",
        Part::text("not an image")
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );
    let response = app.client().post("/api/products").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let images_error = response.json::<Value>()["errors"]["images"]
        .as_str()
        .expect("images error")
        .to_string();
    assert!(images_error.starts_with("Invalid file extension"));
}

#[tokio::test]
async fn test_uploaded_images_are_served() {
    let app = setup_test_app().await;

    let created = create_product(
        &app,
        product_form(&[("name", "Lamp"), ("price", "10"), ("category", "home")], 0)
            .add_part("images", png_part("front.png")),
    )
    .await;
    let url = &image_urls(&created)[0];
    let path = url.strip_prefix(TEST_BASE_URL).expect("base url prefix");

    let response = app.client().get(path).await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().to_vec(), create_minimal_png());
}

#[tokio::test]
async fn test_health_and_docs_endpoints() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "healthy");
    assert_eq!(body["storage"], "healthy");

    app.client().get("/live").await.assert_status_ok();
    app.client().get("/ready").await.assert_status_ok();

    let response = app.client().get("/api/openapi.json").await;
    response.assert_status_ok();
    assert!(response.json::<Value>()["paths"]
        .get("/api/products/{id}")
        .is_some());
}
