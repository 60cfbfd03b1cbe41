//! Unit tests for session configuration validation.

use super::*;
use rstest::{fixture, rstest};
use uuid::Uuid;

#[derive(Debug)]
struct TempKeyFile {
    path: Utf8PathBuf,
}

impl TempKeyFile {
    fn new(len: usize) -> Self {
        let dir = Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("UTF-8 temp dir");
        let path = dir.join(format!("session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'a'; len]).expect("write key file");
        Self { path }
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[fixture]
fn key_file() -> TempKeyFile {
    TempKeyFile::new(SESSION_KEY_MIN_LEN)
}

fn release_toggles(key_file: &TempKeyFile) -> SessionToggles {
    SessionToggles {
        key_file: Some(key_file.path.clone()),
        cookie_secure: Some("1".to_owned()),
        same_site: Some("Strict".to_owned()),
        allow_ephemeral: Some("0".to_owned()),
    }
}

fn expect_error(result: Result<SessionSettings, SessionConfigError>) -> SessionConfigError {
    match result {
        Ok(_) => panic!("expected session configuration to be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_explicit_toggles(key_file: TempKeyFile) {
    let settings =
        session_settings(&release_toggles(&key_file), BuildMode::Release).expect("valid settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn release_missing_cookie_secure_is_rejected(key_file: TempKeyFile) {
    let toggles = SessionToggles {
        cookie_secure: None,
        ..release_toggles(&key_file)
    };
    let err = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(
        err,
        SessionConfigError::Missing {
            name: COOKIE_SECURE_FIELD
        }
    ));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_invalid_cookie_secure_is_rejected(key_file: TempKeyFile, #[case] value: &str) {
    let toggles = SessionToggles {
        cookie_secure: Some(value.to_owned()),
        ..release_toggles(&key_file)
    };
    let err = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(err, SessionConfigError::Invalid { name: COOKIE_SECURE_FIELD, .. }));
}

#[rstest]
fn release_samesite_none_requires_secure(key_file: TempKeyFile) {
    let toggles = SessionToggles {
        cookie_secure: Some("0".to_owned()),
        same_site: Some("None".to_owned()),
        ..release_toggles(&key_file)
    };
    let err = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_ephemeral_keys(key_file: TempKeyFile) {
    let toggles = SessionToggles {
        allow_ephemeral: Some("yes".to_owned()),
        ..release_toggles(&key_file)
    };
    let err = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = TempKeyFile::new(16);
    let err = expect_error(session_settings(&release_toggles(&short), BuildMode::Release));
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length: 16, .. }
    ));
}

#[rstest]
fn release_requires_a_readable_key(key_file: TempKeyFile) {
    let toggles = SessionToggles {
        key_file: Some(Utf8PathBuf::from("/nonexistent/session_key")),
        ..release_toggles(&key_file)
    };
    let err = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(err, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_tolerates_missing_and_malformed_toggles() {
    let toggles = SessionToggles {
        key_file: Some(Utf8PathBuf::from("/nonexistent/session_key")),
        cookie_secure: Some("perhaps".to_owned()),
        same_site: Some("sideways".to_owned()),
        allow_ephemeral: None,
    };
    let settings = session_settings(&toggles, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("Lax", SameSite::Lax)]
#[case("strict", SameSite::Strict)]
#[case("NONE", SameSite::None)]
fn same_site_names_are_case_insensitive(
    key_file: TempKeyFile,
    #[case] value: &str,
    #[case] expected: SameSite,
) {
    let toggles = SessionToggles {
        same_site: Some(value.to_owned()),
        ..release_toggles(&key_file)
    };
    let settings = session_settings(&toggles, BuildMode::Release).expect("valid settings");
    assert_eq!(settings.same_site, expected);
}
