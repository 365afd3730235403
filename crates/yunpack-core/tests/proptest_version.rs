//! Property-based tests for version code derivation.

#![allow(non_snake_case)]

use proptest::prelude::*;
use yunpack_core::version_code;

proptest! {
    #[test]
    fn version_code___matches_formula_for_numeric_versions(
        major in 0u64..1000,
        minor in 0u64..100,
        patch in 0u64..100,
    ) {
        let version = format!("{major}.{minor}.{patch}");
        prop_assert_eq!(version_code(&version), major * 10_000 + minor * 100 + patch);
    }

    #[test]
    fn version_code___prerelease_suffix_is_ignored(
        major in 0u64..1000,
        minor in 0u64..100,
        patch in 0u64..100,
        suffix in "[a-z0-9.]{1,12}",
    ) {
        let plain = format!("{major}.{minor}.{patch}");
        let tagged = format!("{plain}-{suffix}");
        prop_assert_eq!(version_code(&tagged), version_code(&plain));
    }

    #[test]
    fn version_code___never_panics(version in ".*") {
        let _ = version_code(&version);
    }
}
