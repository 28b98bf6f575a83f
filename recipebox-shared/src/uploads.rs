//! Storage path generation for uploaded files.
//!
//! Uploaded filenames are client-controlled and cannot be trusted as
//! storage names. Each upload gets a fresh UUID-based name; only the
//! original extension is preserved.

use std::path::Path;
use uuid::Uuid;

/// Generates a collision-resistant storage path for a recipe image.
///
/// The result is `uploads/recipe/<uuid-v4>.<ext>`, where `<ext>` is the
/// extension of the original filename. A name without an extension maps
/// to a bare UUID with no dot suffix.
///
/// # Example
///
/// ```
/// use recipebox_shared::uploads::recipe_image_path;
///
/// let path = recipe_image_path("photo.jpg");
/// assert!(path.starts_with("uploads/recipe/"));
/// assert!(path.ends_with(".jpg"));
/// ```
pub fn recipe_image_path(original_filename: &str) -> String {
    let id = Uuid::new_v4();

    match Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) => format!("uploads/recipe/{}.{}", id, ext),
        None => format!("uploads/recipe/{}", id),
    }
}
