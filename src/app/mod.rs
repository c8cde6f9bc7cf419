use axum::http::Uri;

pub mod docs;
pub mod openapi;
pub mod router;

/// `Location` value for a resource created under the collection at `uri`.
pub(crate) fn created_location(uri: &Uri, id: i32) -> String {
    format!("{}/{id}", uri.path().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_joins_collection_path_and_id() {
        let uri: Uri = "/api/folders".parse().unwrap();
        assert_eq!(created_location(&uri, 7), "/api/folders/7");

        let uri: Uri = "/api/notes/?draft=1".parse().unwrap();
        assert_eq!(created_location(&uri, 3), "/api/notes/3");
    }
}
