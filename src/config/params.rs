//! Comparison parameters
//!
//! Parsed once from a flat `key=value&...` encoding (e.g. a URL fragment):
//!
//! | key        | meaning                         |
//! |------------|---------------------------------|
//! | `l`, `r`   | left and right comparison target |
//! | `lname`, `rname` | display name overrides    |
//! | `manifest` | manifest file name override     |
//! | `selected` | uid of the selected file        |
//!
//! Only `selected` changes afterwards, through [`ComparisonParams::select`].

use crate::error::ApiError;
use crate::types::Uid;
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonParams {
    pub left: String,
    pub right: String,
    pub left_name: Option<String>,
    pub right_name: Option<String>,
    pub manifest_file: Option<String>,
    pub selected: Option<Uid>,
}

impl ComparisonParams {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            left_name: None,
            right_name: None,
            manifest_file: None,
            selected: None,
        }
    }

    /// Parse an encoding such as `l=/a&r=/b&selected=x.txt`; a leading `#` is ignored.
    ///
    /// `default_manifest` only appears in the hint returned when both targets are missing.
    pub fn parse(encoded: &str, default_manifest: &str) -> Result<Self, ApiError> {
        let encoded = encoded.strip_prefix('#').unwrap_or(encoded);

        let mut left = None;
        let mut right = None;
        let mut params = Self::new("", "");
        for (key, value) in form_urlencoded::parse(encoded.as_bytes()) {
            let value = value.into_owned();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "l" => left = Some(value),
                "r" => right = Some(value),
                "lname" => params.left_name = Some(value),
                "rname" => params.right_name = Some(value),
                "manifest" => params.manifest_file = Some(value),
                "selected" => params.selected = Some(value),
                _ => {}
            }
        }

        match (left, right) {
            (None, None) => Err(ApiError::NoComparison {
                manifest_file: params
                    .manifest_file
                    .unwrap_or_else(|| default_manifest.to_string()),
            }),
            (None, Some(_)) => Err(ApiError::MissingParameter { name: "l" }),
            (Some(_), None) => Err(ApiError::MissingParameter { name: "r" }),
            (Some(l), Some(r)) => {
                params.left = l;
                params.right = r;
                Ok(params)
            }
        }
    }

    /// Manifest file name, falling back to `default`
    pub fn manifest_file_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.manifest_file.as_deref().unwrap_or(default)
    }

    /// Record a new selection
    pub fn select(&mut self, uid: &str) {
        self.selected = Some(uid.to_string());
    }

    /// Encode back to the `key=value&...` form
    pub fn encode(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        out.append_pair("l", &self.left);
        out.append_pair("r", &self.right);
        let optional = [
            ("lname", &self.left_name),
            ("rname", &self.right_name),
            ("manifest", &self.manifest_file),
            ("selected", &self.selected),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                out.append_pair(key, value);
            }
        }
        out.finish()
    }
}
