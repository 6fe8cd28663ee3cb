use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use filedrop_core::models::UploadRecord;
use filedrop_core::AppError;

use super::traits::RecordStore;

/// DynamoDB-backed record store; one item per upload keyed by `fileID`.
#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    client: Client,
    table: String,
}

impl DynamoRecordStore {
    pub fn new(aws_config: &SdkConfig, table: impl Into<String>) -> Self {
        Self::new_from_client(Client::new(aws_config), table)
    }

    pub fn new_from_client(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

/// Map a record to its DynamoDB item. `clicks` is stored as an empty map.
pub fn upload_record_item(record: &UploadRecord) -> HashMap<String, AttributeValue> {
    let emails = record
        .emails
        .iter()
        .map(|email| AttributeValue::S(email.clone()))
        .collect();

    HashMap::from([
        (
            "fileID".to_string(),
            AttributeValue::S(record.file_id.to_string()),
        ),
        ("emails".to_string(), AttributeValue::L(emails)),
        (
            "fileURL".to_string(),
            AttributeValue::S(record.file_url.clone()),
        ),
        (
            "uploadedAt".to_string(),
            AttributeValue::S(record.uploaded_at.clone()),
        ),
        ("clicks".to_string(), AttributeValue::M(HashMap::new())),
    ])
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    #[tracing::instrument(skip(self, record), fields(
        aws.service.name = "dynamodb",
        aws.dynamodb.table = %self.table,
        file_id = %record.file_id
    ))]
    async fn put_upload_record(&self, record: &UploadRecord) -> Result<(), AppError> {
        let start = std::time::Instant::now();

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(upload_record_item(record)))
            .send()
            .await
            .map_err(|e| {
                AppError::RecordStore(format!(
                    "failed to put upload record into {}: {}",
                    self.table,
                    aws_sdk_dynamodb::error::DisplayErrorContext(&e)
                ))
            })?;

        tracing::info!(
            table = %self.table,
            file_id = %record.file_id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Saved upload record to DynamoDB"
        );

        Ok(())
    }
}
