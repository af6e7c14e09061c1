use url::Url;

use crate::types::BuildId;

use super::common::{sub_locator, LocatorWriter, Query};

/// Fields requested for each change; the default listing omits the author and
/// comment.
const CHANGE_FIELDS: &str = "change(id,version,date,comment,user(id,username,name))";

/// Lists the VCS changes that went into one build.
#[derive(Clone, Debug)]
pub struct ChangeQuery {
    pub build: BuildId,
}

impl ChangeQuery {
    pub fn for_build(build: BuildId) -> Self {
        Self { build }
    }
}

impl Query for ChangeQuery {
    fn locator(&self) -> String {
        LocatorWriter::default()
            .dimension("build", sub_locator("id", &self.build))
            .finish()
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("locator", &self.locator())
            .append_pair("fields", CHANGE_FIELDS);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_query_requests_author_fields() {
        let url = Url::parse("https://example.com/app/rest/changes").unwrap();
        let query = ChangeQuery::for_build(BuildId::new("42").unwrap());
        let url = query.add_to_url(&url);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("locator".to_string(), "build:(id:42)".to_string()),
                ("fields".to_string(), CHANGE_FIELDS.to_string()),
            ]
        );
    }
}
