#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(true, Some("error"), "warn", LogLevel::Debug ; "verbose wins")]
#[test_case(false, Some("error"), "warn", LogLevel::Error ; "flag over settings")]
#[test_case(false, None, "warn", LogLevel::Warn ; "settings fallback")]
#[test_case(false, None, "info", LogLevel::Info ; "default settings")]
fn resolve_level___precedence(verbose: bool, flag: Option<&str>, configured: &str, expected: LogLevel) {
    assert_eq!(resolve_level(verbose, flag, configured).unwrap(), expected);
}

#[test]
fn resolve_level___unknown_name___is_error() {
    let err = resolve_level(false, Some("loud"), "info").unwrap_err();

    assert!(err.to_string().contains("loud"));
}

#[test]
fn Context___load___reads_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("yunpack.toml"),
        "log_level = \"warn\"\n[locations]\nwww = \"web\"\n",
    )
    .unwrap();

    let ctx = Context::load(Some(dir.path().to_path_buf()), None, false).unwrap();

    assert_eq!(ctx.log_level, LogLevel::Warn);
    assert_eq!(ctx.settings.platform, "yunos");
    assert_eq!(
        ctx.locations().www,
        dir.path().join("platforms/yunos/web")
    );
}

#[test]
fn Context___load___malformed_settings_is_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("yunpack.toml"), "platform = [").unwrap();

    assert!(Context::load(Some(dir.path().to_path_buf()), None, false).is_err());
}
