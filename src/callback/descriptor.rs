//! Redirect descriptors and their construction from callback query strings.

use serde::{Deserialize, Serialize};

use crate::callback::CallbackError;

pub const PARAM_REQUEST_ID: &str = "vscode-requestId";
pub const PARAM_SCHEME: &str = "vscode-scheme";
pub const PARAM_AUTHORITY: &str = "vscode-authority";
pub const PARAM_PATH: &str = "vscode-path";
pub const PARAM_QUERY: &str = "vscode-query";
pub const PARAM_FRAGMENT: &str = "vscode-fragment";

const WELL_KNOWN_PARAMS: [&str; 6] = [
    PARAM_REQUEST_ID,
    PARAM_SCHEME,
    PARAM_AUTHORITY,
    PARAM_PATH,
    PARAM_QUERY,
    PARAM_FRAGMENT,
];

/// Where the waiting browser session should be sent once the flow completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectDescriptor {
    pub scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
}

/// A parsed `/callback` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackRegistration {
    pub request_id: String,
    pub descriptor: RedirectDescriptor,
}

impl CallbackRegistration {
    /// Build a registration from decoded query pairs in request order.
    ///
    /// Parameters outside the well-known set are appended to the stored query
    /// as `key=value`, first value per key, in order of first appearance.
    pub fn from_query(
        params: &[(String, String)],
        default_scheme: &str,
    ) -> Result<Self, CallbackError> {
        let request_id = request_id(params)?.to_string();
        let owned = |key: &str| first_value(params, key).map(str::to_string);

        let scheme = match first_value(params, PARAM_SCHEME) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => default_scheme.to_string(),
        };

        let mut query = owned(PARAM_QUERY);
        for (index, (key, value)) in extra_params(params).into_iter().enumerate() {
            let query = query.get_or_insert_with(String::new);
            if index > 0 {
                query.push('&');
            }
            query.push_str(key);
            query.push('=');
            query.push_str(value);
        }

        Ok(Self {
            request_id,
            descriptor: RedirectDescriptor {
                scheme,
                authority: owned(PARAM_AUTHORITY),
                path: owned(PARAM_PATH),
                query,
                fragment: owned(PARAM_FRAGMENT),
            },
        })
    }
}

/// The mandatory, non-empty `vscode-requestId` parameter.
pub fn request_id(params: &[(String, String)]) -> Result<&str, CallbackError> {
    match first_value(params, PARAM_REQUEST_ID) {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(CallbackError::MissingRequestId),
    }
}

fn first_value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn extra_params(params: &[(String, String)]) -> Vec<(&str, &str)> {
    let mut extras: Vec<(&str, &str)> = Vec::new();
    for (key, value) in params {
        let key = key.as_str();
        if WELL_KNOWN_PARAMS.contains(&key) || extras.iter().any(|(k, _)| *k == key) {
            continue;
        }
        extras.push((key, value.as_str()));
    }
    extras
}
