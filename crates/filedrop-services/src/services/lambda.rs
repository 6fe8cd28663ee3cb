use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use aws_sdk_lambda::Client;
use filedrop_core::models::NotificationPayload;
use filedrop_core::AppError;

use super::traits::Notifier;

/// Status Lambda returns when an `Event` invocation has been queued.
const EVENT_ACCEPTED_STATUS: i32 = 202;

/// Invokes the downstream Lambda function as an event; it does not wait for the result.
#[derive(Debug, Clone)]
pub struct LambdaNotifier {
    client: Client,
    function_name: String,
}

impl LambdaNotifier {
    pub fn new(aws_config: &SdkConfig, function_name: impl Into<String>) -> Self {
        Self::new_from_client(Client::new(aws_config), function_name)
    }

    pub fn new_from_client(client: Client, function_name: impl Into<String>) -> Self {
        Self {
            client,
            function_name: function_name.into(),
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }
}

pub(crate) fn encode_payload(payload: &NotificationPayload) -> Result<String, AppError> {
    serde_json::to_string(payload)
        .map_err(|e| AppError::Notification(format!("unable to serialize payload: {}", e)))
}

#[async_trait]
impl Notifier for LambdaNotifier {
    #[tracing::instrument(skip(self, payload), fields(
        aws.service.name = "lambda",
        aws.lambda.function_name = %self.function_name,
        file_id = %payload.filename
    ))]
    async fn notify_upload(&self, payload: &NotificationPayload) -> Result<(), AppError> {
        let body = encode_payload(payload)?;

        let response = self
            .client
            .invoke()
            .function_name(&self.function_name)
            .invocation_type(InvocationType::Event)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(|e| {
                AppError::Notification(format!(
                    "unable to invoke {}: {}",
                    self.function_name,
                    aws_sdk_lambda::error::DisplayErrorContext(&e)
                ))
            })?;

        if response.status_code() != EVENT_ACCEPTED_STATUS {
            return Err(AppError::Notification(format!(
                "lambda {} returned status code {}",
                self.function_name,
                response.status_code()
            )));
        }

        tracing::info!(
            function_name = %self.function_name,
            file_id = %payload.filename,
            "Lambda invoked"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedrop_core::generate_file_id;

    #[test]
    fn payload_is_the_wire_json_object() {
        let file_id = generate_file_id(Some("report.pdf"));
        let payload = NotificationPayload::new(
            file_id.clone(),
            vec!["a@x.com".to_string()],
            "https://drop.s3.us-east-1.amazonaws.com/x".to_string(),
        );

        let body = encode_payload(&payload).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["filename"], file_id.as_str());
        assert_eq!(json["emails"], serde_json::json!(["a@x.com"]));
        assert_eq!(json["fileURL"], "https://drop.s3.us-east-1.amazonaws.com/x");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
