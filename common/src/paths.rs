//! REST resource paths, relative to the configured API base.
//!
//! Every resource lives under `investigation/<resource>/`. Records of one
//! investigation are listed at `investigation/<resource>/investigation/<file_number>/`
//! and addressed individually at `investigation/<resource>/<id>/`.
//!
//! File numbers are free text at registration and routinely contain `/`; they and record ids
//! are percent-encoded as single path segments.

const ROOT: &str = "investigation";

pub const INVESTIGATIONS: &str = "investigations";
pub const ALERTS: &str = "alerts";
pub const DIVISIONS: &str = "divisions";

/// `investigation/<resource>/`: POST target and unscoped list.
pub fn collection(resource: &str) -> String {
    format!("{}/{}/", ROOT, resource)
}

/// `investigation/<resource>/investigation/<file_number>/`
pub fn for_investigation(resource: &str, file_number: &str) -> String {
    format!("{}/{}/investigation/{}/", ROOT, resource, urlencoding::encode(file_number))
}

/// `investigation/<resource>/<id>/`: GET, PUT and DELETE target.
pub fn item(resource: &str, id: &str) -> String {
    format!("{}/{}/{}/", ROOT, resource, urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_resource_paths() {
        assert_eq!(collection("advisories"), "investigation/advisories/");
        assert_eq!(
            for_investigation("advisories", "ABC123"),
            "investigation/advisories/investigation/ABC123/"
        );
        assert_eq!(item("summons", "42"), "investigation/summons/42/");
        assert_eq!(
            item(INVESTIGATIONS, "ABC123"),
            "investigation/investigations/ABC123/"
        );
    }

    #[test]
    fn escapes_slashes_and_spaces_in_file_numbers() {
        assert_eq!(
            for_investigation("scns", "INV/2025 07"),
            "investigation/scns/investigation/INV%2F2025%2007/"
        );
        assert_eq!(
            item(INVESTIGATIONS, "INV/2025 07"),
            "investigation/investigations/INV%2F2025%2007/"
        );
    }
}
