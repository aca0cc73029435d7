use std::path::Path;

/// Validate file path exists and is readable
pub fn validate_file_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Path is not a file: {}", path.display()));
    }

    Ok(())
}

/// Validate a source root exists and is a directory
pub fn validate_directory(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Directory does not exist: {}", path.display()));
    }

    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", path.display()));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Checks the conventional extension: `.pot` for templates, `.po` for
/// translations.
pub fn validate_catalog_extension(path: &Path, template: bool) -> Result<(), String> {
    let expected = if template { "pot" } else { "po" };
    let actual = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    if actual == expected {
        Ok(())
    } else {
        Err(format!(
            "Unexpected file extension for {}: {}. Expected: {}",
            if template { "template" } else { "catalog" },
            path.display(),
            expected
        ))
    }
}
