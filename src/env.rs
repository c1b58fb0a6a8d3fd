//! Fns to read variables from the environment more conveniently. Values of secret keys are
//! obfuscated before they are logged.

use std::env;

use tracing::{debug, warn};

pub const SECRET_LOG_BLACKLIST: [&str; 1] = ["GRAPH_API_KEY"];

pub fn obfuscate_if_secret(blacklist: &[&str], key: &str, value: &str) -> String {
    if blacklist.contains(&key) {
        let mut last_four = value.to_string();
        last_four.drain(0..value.len().saturating_sub(4));
        format!("****{last_four}")
    } else {
        value.to_string()
    }
}

/// Get an environment variable, encoding found or missing as Option. A value that is not valid
/// unicode is treated as missing.
pub fn get_env_var(key: &str) -> Option<String> {
    let var = match env::var(key) {
        Err(env::VarError::NotPresent) => None,
        Err(env::VarError::NotUnicode(_)) => {
            warn!("env var {key} is not valid unicode, ignoring it");
            None
        }
        Ok(var) => Some(var),
    };

    if let Some(ref existing_var) = var {
        let output = obfuscate_if_secret(&SECRET_LOG_BLACKLIST, key, existing_var);
        debug!("env var {key}: {output}");
    } else {
        debug!("env var {key} requested but not found")
    };

    var
}

pub fn get_env_bool(key: &str) -> Option<bool> {
    get_env_var(key).and_then(|var| match var.to_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        str => {
            warn!("invalid bool value {str} for {key}, ignoring it");
            None
        }
    })
}

pub fn get_env_u64(key: &str) -> Option<u64> {
    get_env_var(key).and_then(|var| match var.parse::<u64>() {
        Ok(num) => Some(num),
        Err(e) => {
            warn!("invalid number {var} for {key}, ignoring it: {e}");
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_var_secret_returns_clear_value() {
        let test_key = "GRAPH_API_KEY";
        std::env::set_var(test_key, "0123456789abcdef");
        assert_eq!(get_env_var(test_key), Some("0123456789abcdef".to_string()));
    }

    #[test]
    fn test_get_env_var_missing_subgraph_id() {
        let test_key = "TEST_KEY_SUBGRAPH_ID_MISSING";
        std::env::remove_var(test_key);
        assert_eq!(get_env_var(test_key), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_get_env_var_not_unicode() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let test_key = "TEST_KEY_NOT_UNICODE";
        std::env::set_var(test_key, OsStr::from_bytes(&[0x66, 0x6f, 0x80]));
        assert_eq!(get_env_var(test_key), None);
    }

    #[test]
    fn test_get_env_bool_true_upper() {
        let test_key = "TEST_KEY_BOOL_TRUE_UPPER";
        std::env::set_var(test_key, "TRUE");
        assert_eq!(get_env_bool(test_key), Some(true));
    }

    #[test]
    fn test_get_env_bool_false() {
        let test_key = "TEST_KEY_BOOL_FALSE";
        std::env::set_var(test_key, "0");
        assert_eq!(get_env_bool(test_key), Some(false));
    }

    #[test]
    fn test_get_env_bool_invalid() {
        let test_key = "TEST_KEY_BOOL_INVALID";
        std::env::set_var(test_key, "maybe");
        assert_eq!(get_env_bool(test_key), None);
    }

    #[test]
    fn test_get_env_u64() {
        let test_key = "TEST_KEY_U64";
        std::env::set_var(test_key, "30");
        assert_eq!(get_env_u64(test_key), Some(30));

        let test_key = "TEST_KEY_U64_INVALID";
        std::env::set_var(test_key, "thirty");
        assert_eq!(get_env_u64(test_key), None);
    }

    #[test]
    fn test_obfuscate_if_secret() {
        let secret_key = "GRAPH_API_KEY";
        assert_eq!(
            obfuscate_if_secret(&SECRET_LOG_BLACKLIST, secret_key, "0123456789abcdef"),
            "****cdef"
        );

        let normal_key = "SUBGRAPH_ID";
        assert_eq!(
            obfuscate_if_secret(&SECRET_LOG_BLACKLIST, normal_key, "my_normal_value"),
            "my_normal_value"
        );
    }
}
