//! File Input Helpers

use menu_core::ImageUpload;
use wasm_bindgen_futures::JsFuture;

/// First file picked in a file input, if any
pub fn selected_file(input: &web_sys::HtmlInputElement) -> Option<web_sys::File> {
    input.files()?.get(0)
}

/// Read a picked file into memory, byte for byte
pub async fn read_file(file: &web_sys::File) -> Result<ImageUpload, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ImageUpload {
        file_name: file.name(),
        bytes,
    })
}
