//! Object names and reference parsing for externally hosted files.

use backoffice_core_api::domain::{AssetClass, LocalFile};
use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

/// Extracts the object id from a stored reference.
///
/// Accepts a raw id, or a URL of the form `.../file/d/<id>/...`,
/// `.../d/<id>` or `...?id=<id>`. Returns `None` for anything else.
pub fn extract_object_id(reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    match Url::parse(reference) {
        Ok(url) => {
            if let Some((_, id)) = url.query_pairs().find(|(key, _)| key == "id") {
                if is_object_id(&id) {
                    return Some(id.into_owned());
                }
            }

            let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
            segments
                .iter()
                .position(|segment| *segment == "d")
                .and_then(|pos| segments.get(pos + 1))
                .filter(|id| is_object_id(id))
                .map(|id| id.to_string())
        }
        Err(_) if is_object_id(reference) => Some(reference.to_string()),
        Err(_) => None,
    }
}

fn is_object_id(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Lower-case ASCII slug; runs of other characters collapse into one `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}

/// Collision-resistant name used between upload and rename
pub fn temp_object_name(file: &LocalFile) -> String {
    format!("tmp-{}-{}", Uuid::new_v4(), file.file_name.replace('/', "_"))
}

/// Final name: `<class prefix>-<slug(owner name)>-<timestamp>[.<ext>]`
pub fn final_object_name(
    class: AssetClass,
    owner_name: &str,
    extension: Option<&str>,
    at: DateTime<Utc>,
) -> String {
    let mut name = format!("{}-{}-{}", class.name_prefix(), slugify(owner_name), at.timestamp_millis());
    if let Some(ext) = extension {
        name.push('.');
        name.push_str(ext);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_extract_object_id() {
        assert_eq!(extract_object_id("old123").as_deref(), Some("old123"));
        assert_eq!(
            extract_object_id("https://drive.google.com/file/d/1AbC_x-9/view?usp=sharing").as_deref(),
            Some("1AbC_x-9")
        );
        assert_eq!(
            extract_object_id("https://drive.google.com/open?id=abc456").as_deref(),
            Some("abc456")
        );
        assert_eq!(
            extract_object_id("https://lh3.googleusercontent.com/d/xyz789").as_deref(),
            Some("xyz789")
        );
    }

    #[test]
    fn test_extract_object_id_rejects_garbage() {
        assert_eq!(extract_object_id(""), None);
        assert_eq!(extract_object_id("   "), None);
        assert_eq!(extract_object_id("https://example.com/images/photo.png"), None);
        assert_eq!(extract_object_id("not an id"), None);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Venue Rental (March)"), "venue-rental-march");
        assert_eq!(slugify("  --  "), "untitled");
        assert_eq!(slugify("Dies Natalis 2024"), "dies-natalis-2024");
    }

    #[test]
    fn test_final_object_name() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(
            final_object_name(AssetClass::FinanceProof, "Venue rental", Some("png"), at),
            format!("finance-proof-venue-rental-{}.png", at.timestamp_millis())
        );
        assert_eq!(
            final_object_name(AssetClass::ManagementDecree, "Board 2024", None, at),
            format!("management-decree-board-2024-{}", at.timestamp_millis())
        );
    }

    #[test]
    fn test_temp_names_do_not_collide() {
        let file = LocalFile::new("receipt.png", "image/png", vec![1, 2, 3]);
        let first = temp_object_name(&file);
        let second = temp_object_name(&file);
        assert!(first.starts_with("tmp-"));
        assert!(first.ends_with("-receipt.png"));
        assert_ne!(first, second);
    }
}
