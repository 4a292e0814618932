use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Lists bundled sample images for a category as `<dataset_dir>/<category>/<file>` paths,
/// ready to be read back and classified.
///
/// A category that does not exist, or that tries to leave the dataset directory,
/// yields an empty list.
pub fn list_demo_images(dataset_dir: &Path, category: &str) -> std::io::Result<Vec<String>> {
    if category.is_empty()
        || category.contains(['/', '\\'])
        || category == "."
        || category == ".."
    {
        return Ok(Vec::new());
    }

    let category_dir = dataset_dir.join(category);
    if !category_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut images = Vec::new();
    for entry in std::fs::read_dir(&category_dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| IMAGE_EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str()))
            .unwrap_or(false);

        if !is_image || !path.is_file() {
            continue;
        }

        images.push(path.to_string_lossy().into_owned());
    }

    images.sort();
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_only_image_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let glass = dir.path().join("glass");
        std::fs::create_dir(&glass).unwrap();
        for name in ["b.PNG", "a.jpg", "c.jpeg", "notes.txt"] {
            std::fs::write(glass.join(name), b"x").unwrap();
        }
        std::fs::create_dir(glass.join("nested.png")).unwrap();

        let images = list_demo_images(dir.path(), "glass").unwrap();

        assert_eq!(
            images,
            ["a.jpg", "b.PNG", "c.jpeg"]
                .iter()
                .map(|name| glass.join(name).to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        );
        assert!(images.iter().all(|image| Path::new(image).is_file()));
    }

    #[test]
    fn test_missing_category_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_demo_images(dir.path(), "metal").unwrap().is_empty());
    }

    #[test]
    fn test_path_traversal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_demo_images(dir.path(), "..").unwrap().is_empty());
        assert!(list_demo_images(dir.path(), "../etc").unwrap().is_empty());
    }
}
