use super::types::Document;
use tracing::debug;

/// Load a specification document from a YAML or JSON file.
///
/// The format is chosen from the file extension, `.yaml`/`.yml` parsing as
/// YAML and anything else as JSON.
pub fn load_document(file_path: &str) -> anyhow::Result<Document> {
    debug!(path = %file_path, "loading specification document");
    let content = std::fs::read_to_string(file_path)?;
    let document: Document = if file_path.ends_with(".yaml") || file_path.ends_with(".yml") {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    debug!(
        routes = document.paths.len(),
        "parsed specification document"
    );
    Ok(document)
}
