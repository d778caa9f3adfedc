//! Kept in its own test binary: it changes the process environment.

use farmstead::config::{FOG_VAR, FULLSCREEN_VAR, ViewerConfig};

#[cfg(unix)]
#[test]
fn environment_is_read_and_foreign_variables_are_ignored() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    // SAFETY: this is the only test in this binary, nothing reads the
    // environment concurrently.
    unsafe {
        std::env::set_var("FARMSTEAD_TEST_FOREIGN", OsStr::from_bytes(b"\xff\xfe"));
        std::env::set_var(FULLSCREEN_VAR, "yes");
        std::env::set_var(FOG_VAR, "off");
    }

    let config = ViewerConfig::try_parse_from(["farmstead"]).unwrap();
    assert!(config.fullscreen);
    assert!(!config.fog.active);

    // A flag beats the variable.
    let config = ViewerConfig::try_parse_from(["farmstead", "--fullscreen", "0"]).unwrap();
    assert!(!config.fullscreen);

    unsafe {
        std::env::set_var(FOG_VAR, "NaN");
    }
    assert!(ViewerConfig::try_parse_from(["farmstead"]).is_err());
}
