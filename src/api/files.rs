use crate::client::{ApiClient, ApiRequest, Result};
use crate::models::{RemittanceFile, RemittanceKind};

/// List uploaded remittance files, newest first, optionally restricted to
/// one remittance stream.
pub async fn list(
    client: &ApiClient,
    kind: Option<RemittanceKind>,
) -> Result<Vec<RemittanceFile>> {
    let mut request = ApiRequest::get("/files");
    if let Some(kind) = kind {
        request = request.query("kind", kind.to_string());
    }
    client.send_json(&request).await
}

/// Upload a contribution file for processing.
///
/// Sent as multipart: the file part plus `kind` and `period` text fields,
/// mirroring the console's upload form.
pub async fn upload(
    client: &ApiClient,
    file_name: &str,
    bytes: Vec<u8>,
    kind: RemittanceKind,
    period: &str,
) -> Result<RemittanceFile> {
    let request = ApiRequest::post("/files").with_upload(
        file_name,
        bytes,
        vec![
            ("kind".to_string(), kind.to_string()),
            ("period".to_string(), period.to_string()),
        ],
    );
    client.send_json(&request).await
}

/// Download a processed report/challan as raw bytes.
pub async fn download(client: &ApiClient, id: &str) -> Result<Vec<u8>> {
    client
        .send_bytes(&ApiRequest::get(format!("/files/{}/download", id)))
        .await
}
