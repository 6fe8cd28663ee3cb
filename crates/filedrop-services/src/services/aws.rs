use aws_config::{BehaviorVersion, Region, SdkConfig};
#[cfg(feature = "dynamodb")]
use aws_sdk_dynamodb::config::Credentials;
#[cfg(all(not(feature = "dynamodb"), feature = "lambda"))]
use aws_sdk_lambda::config::Credentials;
use filedrop_core::Config;

const CREDENTIALS_PROVIDER_NAME: &str = "filedrop-env";

/// Load the shared SDK configuration for the DynamoDB and Lambda clients.
///
/// Static keys from `AWS_KEY`/`AWS_SECRET` win; without them the default provider chain
/// (environment, profile, instance role) applies.
pub async fn load_sdk_config(config: &Config) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region().to_string()));

    if let (Some(key), Some(secret)) = (config.aws_access_key_id(), config.aws_secret_access_key())
    {
        loader = loader.credentials_provider(Credentials::new(
            key,
            secret,
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        ));
    }

    loader.load().await
}
