//! Configuration module
//!
//! Settings are read once at process start from the environment (optionally seeded from a
//! `.env` file). Names of the AWS-facing variables are fixed by the deployed services.

use std::env;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 3000;
const MAX_UPLOAD_SIZE_MB: usize = 50;
const FOLLOW_UP_MAX_RETRIES: u32 = 2;
const SHUTDOWN_GRACE_SECS: u64 = 10;
const UPLOAD_TMP_DIR: &str = "uploads";
const PUBLIC_DIR: &str = "public";

/// Server-level settings not tied to any external service
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: String,
    pub max_upload_size_bytes: usize,
    pub upload_tmp_dir: String,
    pub public_dir: String,
    pub shutdown_grace_secs: u64,
}

/// Upload service configuration
#[derive(Clone, Debug)]
pub struct UploadServiceConfig {
    pub base: BaseConfig,
    // AWS credentials shared by S3, DynamoDB and Lambda
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub aws_region: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, LocalStack)
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Post-upload services
    pub dynamo_table: String,
    pub lambda_name: String,
    pub follow_up_max_retries: u32,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<UploadServiceConfig>);

impl Config {
    fn as_upload(&self) -> &UploadServiceConfig {
        &self.0
    }

    /// Load configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = UploadServiceConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.environment().to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.as_upload().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_upload().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.as_upload().base.log_format
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_upload().base.max_upload_size_bytes
    }

    pub fn upload_tmp_dir(&self) -> &str {
        &self.as_upload().base.upload_tmp_dir
    }

    pub fn public_dir(&self) -> &str {
        &self.as_upload().base.public_dir
    }

    pub fn shutdown_grace_secs(&self) -> u64 {
        self.as_upload().base.shutdown_grace_secs
    }

    pub fn aws_access_key_id(&self) -> Option<&str> {
        self.as_upload().aws_access_key_id.as_deref()
    }

    pub fn aws_secret_access_key(&self) -> Option<&str> {
        self.as_upload().aws_secret_access_key.as_deref()
    }

    pub fn aws_region(&self) -> &str {
        &self.as_upload().aws_region
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_upload().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_upload().s3_bucket.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_upload().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_upload().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_upload().local_storage_base_url.as_deref()
    }

    pub fn dynamo_table(&self) -> &str {
        &self.as_upload().dynamo_table
    }

    pub fn lambda_name(&self) -> &str {
        &self.as_upload().lambda_name
    }

    pub fn follow_up_max_retries(&self) -> u32 {
        self.as_upload().follow_up_max_retries
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &str) -> Result<String, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup(key)).ok_or_else(|| anyhow::anyhow!("{} must be set", key))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup(key)) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

impl UploadServiceConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = non_empty(lookup("ENVIRONMENT"))
            .or_else(|| non_empty(lookup("APP_ENV")))
            .unwrap_or_else(|| "development".to_string());

        let log_format = non_empty(lookup("LOG_FORMAT"))
            .map(|f| f.to_lowercase())
            .unwrap_or_else(|| "pretty".to_string());

        let max_upload_size_mb: usize = parse_or(&lookup, "MAX_UPLOAD_SIZE_MB", MAX_UPLOAD_SIZE_MB)?;

        let base = BaseConfig {
            server_port: parse_or(&lookup, "SERVER_PORT", SERVER_PORT)?,
            environment,
            log_format,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            upload_tmp_dir: non_empty(lookup("UPLOAD_TMP_DIR"))
                .unwrap_or_else(|| UPLOAD_TMP_DIR.to_string()),
            public_dir: non_empty(lookup("PUBLIC_DIR")).unwrap_or_else(|| PUBLIC_DIR.to_string()),
            shutdown_grace_secs: parse_or(&lookup, "SHUTDOWN_GRACE_SECS", SHUTDOWN_GRACE_SECS)?,
        };

        let aws_access_key_id = non_empty(lookup("AWS_KEY"));
        let aws_secret_access_key = non_empty(lookup("AWS_SECRET"));
        if aws_access_key_id.is_some() != aws_secret_access_key.is_some() {
            return Err(anyhow::anyhow!(
                "AWS_KEY and AWS_SECRET must be set together (or both left unset to use the default credential chain)"
            ));
        }

        let storage_backend: StorageBackend = match non_empty(lookup("STORAGE_BACKEND")) {
            Some(raw) => raw.parse()?,
            None => StorageBackend::S3,
        };

        let s3_bucket = non_empty(lookup("S3_BUCKET"));
        if storage_backend == StorageBackend::S3 && s3_bucket.is_none() {
            return Err(anyhow::anyhow!("S3_BUCKET must be set when STORAGE_BACKEND=s3"));
        }

        let local_storage_path = non_empty(lookup("LOCAL_STORAGE_PATH"));
        let local_storage_base_url = non_empty(lookup("LOCAL_STORAGE_BASE_URL"));
        if storage_backend == StorageBackend::Local
            && (local_storage_path.is_none() || local_storage_base_url.is_none())
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL must be set when STORAGE_BACKEND=local"
            ));
        }

        Ok(UploadServiceConfig {
            base,
            aws_access_key_id,
            aws_secret_access_key,
            aws_region: required(&lookup, "AWS_REGION")?,
            storage_backend,
            s3_bucket,
            s3_endpoint: non_empty(lookup("S3_ENDPOINT")),
            local_storage_path,
            local_storage_base_url,
            dynamo_table: required(&lookup, "DYNAMO_TABLE")?,
            lambda_name: required(&lookup, "LAMBDA_NAME")?,
            follow_up_max_retries: parse_or(
                &lookup,
                "FOLLOW_UP_MAX_RETRIES",
                FOLLOW_UP_MAX_RETRIES,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("AWS_REGION", "us-east-1"),
            ("S3_BUCKET", "uploads-bucket"),
            ("DYNAMO_TABLE", "uploads"),
            ("LAMBDA_NAME", "notify-recipients"),
        ]
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup_from(&minimal())).unwrap();
        assert_eq!(config.server_port(), 3000);
        assert_eq!(config.storage_backend(), StorageBackend::S3);
        assert_eq!(config.upload_tmp_dir(), "uploads");
        assert_eq!(config.public_dir(), "public");
        assert_eq!(config.max_upload_size_bytes(), 50 * 1024 * 1024);
        assert_eq!(config.follow_up_max_retries(), 2);
        assert_eq!(config.environment(), "development");
        assert!(!config.is_production());
        assert!(config.aws_access_key_id().is_none());
    }

    #[test]
    fn reads_fixed_service_variables() {
        let mut vars = minimal();
        vars.push(("AWS_KEY", "AKIAEXAMPLE"));
        vars.push(("AWS_SECRET", "secret"));
        vars.push(("ENVIRONMENT", "Production"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.aws_region(), "us-east-1");
        assert_eq!(config.s3_bucket(), Some("uploads-bucket"));
        assert_eq!(config.dynamo_table(), "uploads");
        assert_eq!(config.lambda_name(), "notify-recipients");
        assert_eq!(config.aws_access_key_id(), Some("AKIAEXAMPLE"));
        assert!(config.is_production());
    }

    #[test]
    fn missing_required_variable_is_named() {
        let vars: Vec<_> = minimal()
            .into_iter()
            .filter(|(k, _)| *k != "DYNAMO_TABLE")
            .collect();
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("DYNAMO_TABLE"));
    }

    #[test]
    fn half_configured_credentials_are_rejected() {
        let mut vars = minimal();
        vars.push(("AWS_KEY", "AKIAEXAMPLE"));
        assert!(Config::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn local_backend_needs_path_and_url() {
        let vars = vec![
            ("AWS_REGION", "us-east-1"),
            ("DYNAMO_TABLE", "uploads"),
            ("LAMBDA_NAME", "notify-recipients"),
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", "/tmp/filedrop"),
        ];
        assert!(Config::from_lookup(lookup_from(&vars)).is_err());

        let mut vars = vars;
        vars.push(("LOCAL_STORAGE_BASE_URL", "http://localhost:3000/files"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(config.storage_backend(), StorageBackend::Local);
        assert!(config.s3_bucket().is_none());
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let mut vars = minimal();
        vars.push(("SERVER_PORT", "eighty"));
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }
}
