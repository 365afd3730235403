//! Build version code derivation

/// Derive an integer build code from a `MAJOR.MINOR.PATCH[-prerelease]` version.
///
/// The code is `MAJOR * 10000 + MINOR * 100 + PATCH`. Any pre-release suffix is
/// ignored. Missing or non-numeric components contribute zero, so this never
/// fails: `"2.0"` gives `20000` and `"abc"` gives `0`.
pub fn version_code(version: &str) -> u64 {
    let release = version.split('-').next().unwrap_or_default();
    let mut parts = release.split('.').map(component);

    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);

    let code = major
        .saturating_mul(10_000)
        .saturating_add(minor.saturating_mul(100))
        .saturating_add(patch);

    tracing::debug!(
        "Generated version code {code} from version \"{version}\" (MAJOR*10000 + MINOR*100 + PATCH)"
    );
    code
}

fn component(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}
