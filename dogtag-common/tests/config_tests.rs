//! Config file resolution tests
//!
//! These point `XDG_CONFIG_HOME` at a temporary directory so the per-user
//! config location is under test control. Marked #[serial] because they
//! share the process environment.

#![cfg(target_os = "linux")]

use std::env;
use std::ffi::OsString;
use std::fs;
use std::panic;
use std::path::Path;

use dogtag_common::config::{default_config_path, load_config, ServiceConfig, DEFAULT_PORT};
use dogtag_common::LookupTables;
use serial_test::serial;

/// Restores `XDG_CONFIG_HOME` when dropped, including during a panic
struct ConfigHomeGuard {
    previous: Option<OsString>,
}

impl Drop for ConfigHomeGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => env::set_var("XDG_CONFIG_HOME", value),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

fn with_config_home<F: FnOnce(&Path)>(f: F) {
    let dir = tempfile::tempdir().expect("tempdir");
    let _guard = ConfigHomeGuard {
        previous: env::var_os("XDG_CONFIG_HOME"),
    };
    env::set_var("XDG_CONFIG_HOME", dir.path());

    f(dir.path());
}

#[test]
#[serial]
fn test_default_path_follows_xdg() {
    with_config_home(|home| {
        let path = default_config_path().expect("config dir");
        assert_eq!(path, home.join("dogtag").join("config.toml"));
    });
}

#[test]
#[serial]
fn test_no_file_uses_defaults() {
    with_config_home(|_| {
        let config = load_config(None).expect("defaults");
        assert_eq!(config, ServiceConfig::default());
    });
}

#[test]
#[serial]
fn test_user_file_is_loaded() {
    with_config_home(|home| {
        let dir = home.join("dogtag");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.toml"),
            "port = 9001\n\n[[weapon]]\nprefix = \"KN01\"\nname = \"Machete\"\n",
        )
        .unwrap();

        let config = load_config(None).expect("user config");
        assert_eq!(config.port, 9001);

        let tables = LookupTables::from_config(&config);
        assert_eq!(tables.weapons.translate("KN01_red"), "Machete_red");
    });
}

#[test]
#[serial]
fn test_broken_user_file_degrades_to_defaults() {
    with_config_home(|home| {
        let dir = home.join("dogtag");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "port = [not toml").unwrap();

        let config = load_config(None).expect("should fall back");
        assert_eq!(config.port, DEFAULT_PORT);
    });
}

#[test]
#[serial]
fn test_config_home_restored_after_panic() {
    let before = env::var_os("XDG_CONFIG_HOME");

    let result = panic::catch_unwind(|| {
        with_config_home(|_| panic!("assertion inside config test"));
    });

    assert!(result.is_err());
    assert_eq!(env::var_os("XDG_CONFIG_HOME"), before);
}
