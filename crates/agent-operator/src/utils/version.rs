//! Helpers to reason about container image versions.
use std::borrow::Cow;

use semver::Version;

/// Returns the tag of a container image reference such as `registry:5000/agent:7.30.0`.
///
/// Digests (`agent@sha256:...`) are ignored. Returns [`None`] if the reference carries no tag.
pub fn tag_from_image_name(image: &str) -> Option<&str> {
    let image = image.split_once('@').map_or(image, |(name, _digest)| name);
    let name = image.rsplit_once('/').map_or(image, |(_repo, name)| name);
    name.split_once(':')
        .map(|(_name, tag)| tag)
        .filter(|tag| !tag.is_empty())
}

/// Returns `true` if `version` is greater than or equal to `min_version`.
///
/// Versions are parsed leniently: a leading `v` is accepted and missing minor or patch
/// components are treated as `0`. Pre-releases take part in the comparison, so use a `-0`
/// suffix on `min_version` to accept pre-releases of the minimum version itself.
///
/// Anything that cannot be parsed yields `false`.
pub fn is_above_min_version(version: &str, min_version: &str) -> bool {
    match (parse_lenient(version), parse_lenient(min_version)) {
        (Some(version), Some(min_version)) => version >= min_version,
        _ => false,
    }
}

fn parse_lenient(version: &str) -> Option<Version> {
    let version = version.strip_prefix('v').unwrap_or(version);
    let (core, suffix) = match version.find(['-', '+']) {
        Some(idx) => version.split_at(idx),
        None => (version, ""),
    };
    let core: Cow<str> = match core.split('.').count() {
        1 => format!("{core}.0.0").into(),
        2 => format!("{core}.0").into(),
        _ => core.into(),
    };
    Version::parse(&format!("{core}{suffix}")).ok()
}
