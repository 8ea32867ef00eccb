//! Release feed backed [`VersionChecker`].
//!
//! The feed is a JSON object describing the latest published release. Field
//! names differ between hosting setups, so the version is read from the first
//! of `name`, `version`, `tag_name` and the download URL from the first of
//! `link`, `url`, `html_url`.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use semver::Version;
use serde_json::Value;
use tracing::{debug, info};

use super::errors::UpdateError;
use super::traits::VersionChecker;
use super::types::UpdateCheckResult;

const VERSION_KEYS: [&str; 3] = ["name", "version", "tag_name"];
const URL_KEYS: [&str; 3] = ["link", "url", "html_url"];

pub struct ReleaseFeedChecker {
    client: reqwest::Client,
    feed_url: String,
    current: Version,
}

impl ReleaseFeedChecker {
    /// `request_timeout` bounds a single HTTP exchange; `None` leaves the
    /// client without a timeout.
    pub fn new(
        feed_url: impl Into<String>,
        current_version: &str,
        request_timeout: Option<Duration>,
    ) -> Result<Self, UpdateError> {
        let current = parse_version(current_version)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("pock/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| UpdateError::RequestFailed {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            feed_url: feed_url.into(),
            current,
        })
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub fn current_version(&self) -> &Version {
        &self.current
    }
}

impl VersionChecker for ReleaseFeedChecker {
    fn fetch_latest_version(
        &self,
    ) -> BoxFuture<'static, Result<Option<UpdateCheckResult>, UpdateError>> {
        let client = self.client.clone();
        let feed_url = self.feed_url.clone();
        let current = self.current.clone();

        async move {
            info!(event = "core.update.fetch_started", feed_url = %feed_url);

            let response = client
                .get(&feed_url)
                .send()
                .await
                .map_err(|e| UpdateError::RequestFailed {
                    message: e.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(UpdateError::HttpStatus {
                    status: status.as_u16(),
                });
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| UpdateError::InvalidFeed {
                    message: e.to_string(),
                })?;

            let result = newer_release(&current, &body)?;
            info!(
                event = "core.update.fetch_completed",
                current = %current,
                newer = ?result.as_ref().map(|r| r.version_number.as_str()),
            );
            Ok(result)
        }
        .boxed()
    }
}

/// Parse a release version, tolerating a leading `v` and missing minor/patch.
pub fn parse_version(raw: &str) -> Result<Version, UpdateError> {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let (core, suffix) = match stripped.find(['-', '+']) {
        Some(idx) => stripped.split_at(idx),
        None => (stripped, ""),
    };
    let padded = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, suffix),
        2 => format!("{}.0{}", core, suffix),
        _ => stripped.to_string(),
    };

    Version::parse(&padded).map_err(|e| UpdateError::InvalidVersion {
        version: raw.to_string(),
        message: e.to_string(),
    })
}

/// Extract `(version, url)` from a feed document.
pub fn parse_feed(body: &Value) -> Result<(String, String), UpdateError> {
    let Some(object) = body.as_object() else {
        return Err(UpdateError::InvalidFeed {
            message: "expected a JSON object".to_string(),
        });
    };

    let first_string = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let version = first_string(&VERSION_KEYS).ok_or_else(|| UpdateError::InvalidFeed {
        message: format!("missing version (looked for {})", VERSION_KEYS.join(", ")),
    })?;
    let url = first_string(&URL_KEYS).ok_or_else(|| UpdateError::InvalidFeed {
        message: format!("missing download url (looked for {})", URL_KEYS.join(", ")),
    })?;

    Ok((version, url))
}

/// `Some` only when the feed advertises a version strictly newer than `current`.
pub fn newer_release(
    current: &Version,
    body: &Value,
) -> Result<Option<UpdateCheckResult>, UpdateError> {
    let (raw_version, url) = parse_feed(body)?;
    let remote = parse_version(&raw_version)?;

    if remote > *current {
        Ok(Some(UpdateCheckResult::new(remote.to_string(), url)))
    } else {
        debug!(
            event = "core.update.fetch_skipped",
            reason = "not newer",
            current = %current,
            remote = %remote,
        );
        Ok(None)
    }
}
