use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::oracle::{DEFAULT_ORACLE_BASE_URL, DEFAULT_ORACLE_MODEL, OracleProvider};
use crate::pipeline::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKER_COUNT, EnqueuePolicy};
use crate::store::StorageBackend;

const AFFINITY_VARS: &[&str] = &[
    "AFFINITY_STORAGE",
    "AFFINITY_REDIS_URL",
    "AFFINITY_REDIS_NAMESPACE",
    "AFFINITY_REDIS_POOL_SIZE",
    "AFFINITY_WORKERS",
    "AFFINITY_QUEUE_CAPACITY",
    "AFFINITY_ENQUEUE_POLICY",
    "AFFINITY_ORACLE_PROVIDER",
    "AFFINITY_ORACLE_MODEL",
    "AFFINITY_ORACLE_BASE_URL",
    "AFFINITY_ORACLE_API_KEY",
    "AFFINITY_ORACLE_TIMEOUT_SECS",
    "AFFINITY_MAX_CONTENT_ITEMS",
    "AFFINITY_SEED_PATH",
    "XAI_API_KEY",
];

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_affinity_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for key in AFFINITY_VARS {
        unsafe { env::remove_var(key) };
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.store.backend, StorageBackend::Memory);
    assert!(config.store.redis_url.is_none());
    assert_eq!(config.pipeline.worker_count, DEFAULT_WORKER_COUNT);
    assert_eq!(config.pipeline.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    assert_eq!(config.pipeline.enqueue_policy, EnqueuePolicy::Block);
    assert_eq!(config.oracle.provider, OracleProvider::Http);
    assert_eq!(config.oracle.model, DEFAULT_ORACLE_MODEL);
    assert_eq!(config.oracle.base_url, DEFAULT_ORACLE_BASE_URL);
    assert_eq!(config.oracle.timeout, Duration::from_secs(300));
    assert_eq!(config.oracle.max_content_items, 5);
    assert!(config.seed_path.is_none());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_affinity_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.store.backend, StorageBackend::Memory);
    assert_eq!(config.pipeline.worker_count, 5);
    assert_eq!(config.pipeline.queue_capacity, 1000);
    assert!(config.oracle.api_key.is_none());
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_pipeline_overrides() {
    clear_affinity_env();

    with_env_vars(
        &[
            ("AFFINITY_WORKERS", "12"),
            ("AFFINITY_QUEUE_CAPACITY", "64"),
            ("AFFINITY_ENQUEUE_POLICY", "drop"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.pipeline.worker_count, 12);
            assert_eq!(config.pipeline.queue_capacity, 64);
            assert_eq!(config.pipeline.enqueue_policy, EnqueuePolicy::DropWhenFull);
        },
    );
}

#[test]
#[serial]
fn test_from_env_oracle_overrides() {
    clear_affinity_env();

    with_env_vars(
        &[
            ("AFFINITY_ORACLE_PROVIDER", "genai"),
            ("AFFINITY_ORACLE_MODEL", "gpt-4o-mini"),
            ("AFFINITY_ORACLE_BASE_URL", "http://localhost:8000/v1/"),
            ("AFFINITY_ORACLE_API_KEY", "sk-test"),
            ("AFFINITY_ORACLE_TIMEOUT_SECS", "30"),
            ("AFFINITY_MAX_CONTENT_ITEMS", "3"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.oracle.provider, OracleProvider::Genai);
            assert_eq!(config.oracle.model, "gpt-4o-mini");
            assert_eq!(config.oracle.base_url, "http://localhost:8000/v1");
            assert_eq!(config.oracle.api_key.as_deref(), Some("sk-test"));
            assert_eq!(config.oracle.timeout, Duration::from_secs(30));
            assert_eq!(config.oracle.max_content_items, 3);
        },
    );
}

#[test]
#[serial]
fn test_from_env_api_key_fallback() {
    clear_affinity_env();

    with_env_vars(&[("XAI_API_KEY", "xai-key")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.oracle.api_key.as_deref(), Some("xai-key"));
    });

    with_env_vars(
        &[
            ("XAI_API_KEY", "xai-key"),
            ("AFFINITY_ORACLE_API_KEY", "primary-key"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.oracle.api_key.as_deref(), Some("primary-key"));
        },
    );
}

#[test]
#[serial]
fn test_from_env_redis_backend() {
    clear_affinity_env();

    with_env_vars(
        &[
            ("AFFINITY_STORAGE", "valkey"),
            ("AFFINITY_REDIS_URL", "redis://127.0.0.1:6379/0"),
            ("AFFINITY_REDIS_NAMESPACE", "staging"),
            ("AFFINITY_REDIS_POOL_SIZE", "4"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.store.backend, StorageBackend::Redis);
            assert_eq!(
                config.store.redis_url.as_deref(),
                Some("redis://127.0.0.1:6379/0")
            );
            assert_eq!(config.store.namespace.as_deref(), Some("staging"));
            assert_eq!(config.store.pool_size, 4);
            assert!(config.validate().is_ok());
        },
    );
}

#[test]
#[serial]
fn test_redis_backend_without_url_fails_validation() {
    clear_affinity_env();

    with_env_vars(&[("AFFINITY_STORAGE", "redis")], || {
        let config = Config::from_env().expect("should parse");
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingEnvVar {
                name: "AFFINITY_REDIS_URL"
            }
        ));
    });
}

#[test]
#[serial]
fn test_invalid_worker_count_not_number() {
    clear_affinity_env();

    with_env_vars(&[("AFFINITY_WORKERS", "lots")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "AFFINITY_WORKERS",
                ..
            }
        ));
    });
}

#[test]
#[serial]
fn test_invalid_worker_count_zero() {
    clear_affinity_env();

    with_env_vars(&[("AFFINITY_WORKERS", "0")], || {
        let config = Config::from_env().expect("zero parses");
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Zero {
                name: "AFFINITY_WORKERS"
            }
        ));
    });
}

#[test]
#[serial]
fn test_invalid_queue_capacity_negative() {
    clear_affinity_env();

    with_env_vars(&[("AFFINITY_QUEUE_CAPACITY", "-1")], || {
        assert!(Config::from_env().is_err());
    });
}

#[test]
#[serial]
fn test_invalid_storage_backend() {
    clear_affinity_env();

    with_env_vars(&[("AFFINITY_STORAGE", "postgres")], || {
        let err = Config::from_env().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("AFFINITY_STORAGE"));
        assert!(msg.contains("postgres"));
    });
}

#[test]
#[serial]
fn test_invalid_enqueue_policy() {
    clear_affinity_env();

    with_env_vars(&[("AFFINITY_ENQUEUE_POLICY", "shed")], || {
        assert!(Config::from_env().is_err());
    });
}

#[test]
#[serial]
fn test_blank_values_fall_back_to_defaults() {
    clear_affinity_env();

    with_env_vars(
        &[("AFFINITY_WORKERS", "   "), ("AFFINITY_ORACLE_MODEL", "")],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.pipeline.worker_count, DEFAULT_WORKER_COUNT);
            assert_eq!(config.oracle.model, DEFAULT_ORACLE_MODEL);
        },
    );
}

#[test]
fn test_validate_zero_content_items() {
    let mut config = Config::default();
    config.oracle.max_content_items = 0;

    assert!(matches!(
        config.validate(),
        Err(ConfigError::Zero {
            name: "AFFINITY_MAX_CONTENT_ITEMS"
        })
    ));
}

#[test]
fn test_validate_nonexistent_seed_path() {
    let config = Config {
        seed_path: Some(PathBuf::from("/nonexistent/seed.json")),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::PathNotFound { .. }));
}

#[test]
fn test_validate_seed_path_is_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        seed_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::NotAFile { .. }));
}

#[test]
#[serial]
fn test_from_env_seed_path() {
    clear_affinity_env();
    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap().to_string();

    with_env_vars(&[("AFFINITY_SEED_PATH", path.as_str())], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.seed_path, Some(PathBuf::from(&path)));
        assert!(config.validate().is_ok());
    });
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidValue {
        name: "AFFINITY_WORKERS",
        value: "lots".to_string(),
        reason: "invalid digit found in string".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("lots"));
    assert!(msg.contains("AFFINITY_WORKERS"));

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/missing/seed.json"),
    };
    assert!(err.to_string().contains("/missing/seed.json"));
}
