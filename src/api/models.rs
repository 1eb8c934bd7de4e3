use crate::api::{ModelInfo, ModelsResponse};
use crate::utils::http::{endpoint_url, summarize_error_body, with_bearer_auth};

pub async fn fetch_models(
    client: &reqwest::Client,
    base_url: &str,
    api_key: &str,
) -> Result<ModelsResponse, Box<dyn std::error::Error>> {
    let request = client
        .get(endpoint_url(base_url, "models"))
        .header("Content-Type", "application/json");
    let response = with_bearer_auth(request, api_key).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(format!(
            "API request failed with status {status}: {}",
            summarize_error_body(&error_text)
        )
        .into());
    }

    Ok(response.json::<ModelsResponse>().await?)
}

/// Newest first; models without a creation date go last, by id.
pub fn sort_models(models: &mut [ModelInfo]) {
    models.sort_by(|a, b| match (a.created, b.created) {
        (Some(a_created), Some(b_created)) => b_created.cmp(&a_created).then(a.id.cmp(&b.id)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}
