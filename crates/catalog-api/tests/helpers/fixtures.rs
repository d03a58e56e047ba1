//! Test fixtures: image blobs and product forms.

use axum_test::multipart::{MultipartForm, Part};

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

pub fn png_part(file_name: &str) -> Part {
    Part::bytes(create_minimal_png())
        .file_name(file_name)
        .mime_type("image/png")
}

/// Form with only the given text fields.
pub fn text_form(fields: &[(&str, &str)]) -> MultipartForm {
    fields
        .iter()
        .fold(MultipartForm::new(), |form, (name, value)| {
            form.add_text(name.to_string(), value.to_string())
        })
}

/// Form with the given text fields and `image_count` PNG images.
pub fn product_form(fields: &[(&str, &str)], image_count: usize) -> MultipartForm {
    (0..image_count).fold(text_form(fields), |form, i| {
        form.add_part("images", png_part(&format!("photo-{}.png", i)))
    })
}

/// A complete, valid product form with `image_count` images.
pub fn valid_product_form(image_count: usize) -> MultipartForm {
    product_form(
        &[
            ("name", "Desk Lamp"),
            ("description", "Adjustable LED lamp"),
            ("price", "24.50"),
            ("category", "home"),
        ],
        image_count,
    )
}
