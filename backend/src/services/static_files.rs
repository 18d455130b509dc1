//! Serves the compiled front end embedded into the binary at build time.
//!
//! Paths that name an embedded file are served with a guessed MIME type. Any other
//! path that looks like a client-side route (no file extension in its last segment)
//! gets `index.html`, so deep links such as `/investigation/ABC123` survive a reload.
//! Missing assets stay 404 rather than turning into HTML.

use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir, File};
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const INDEX: &str = "index.html";

pub enum Asset<'a> {
    File(&'a File<'a>),
    Index(&'a File<'a>),
    Missing,
}

fn is_asset_path(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}

pub fn resolve<'a>(dir: &'a Dir<'a>, request_path: &str) -> Asset<'a> {
    let path = request_path.trim_start_matches('/');
    let path = if path.is_empty() { INDEX } else { path };

    if let Some(file) = dir.get_file(path) {
        return Asset::File(file);
    }
    if is_asset_path(path) {
        return Asset::Missing;
    }
    match dir.get_file(INDEX) {
        Some(index) => Asset::Index(index),
        None => Asset::Missing,
    }
}

pub async fn process(req: HttpRequest) -> HttpResponse {
    match resolve(&STATIC_DIR, req.path()) {
        Asset::File(file) => {
            let mime = from_path(file.path()).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        Asset::Index(index) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(index.contents().to_vec()),
        Asset::Missing => HttpResponse::NotFound().body("Not Found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use include_dir::DirEntry;

    static DIST: Dir = Dir::new(
        "",
        &[
            DirEntry::File(File::new("index.html", b"<html></html>")),
            DirEntry::File(File::new("casedesk-frontend.js", b"init()")),
        ],
    );

    fn served(path: &str) -> Option<&'static str> {
        match resolve(&DIST, path) {
            Asset::File(file) | Asset::Index(file) => file.path().to_str(),
            Asset::Missing => None,
        }
    }

    #[test]
    fn serves_embedded_files() {
        assert_eq!(served("/"), Some("index.html"));
        assert_eq!(served("/casedesk-frontend.js"), Some("casedesk-frontend.js"));
    }

    #[test]
    fn client_routes_fall_back_to_index() {
        assert_eq!(served("/investigation/ABC123"), Some("index.html"));
        assert_eq!(served("/settings"), Some("index.html"));
    }

    #[test]
    fn missing_assets_are_not_found() {
        assert_eq!(served("/missing.wasm"), None);
        assert!(matches!(resolve(&DIST, "/img/logo.png"), Asset::Missing));
    }
}
