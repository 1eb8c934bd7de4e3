//! Model listing functionality

use std::error::Error;

use chrono::{DateTime, Utc};

use crate::api::models::{fetch_models, sort_models};
use crate::api::ModelInfo;
use crate::core::endpoint::EndpointSettings;

pub async fn list_models(endpoint: &EndpointSettings) -> Result<(), Box<dyn Error>> {
    println!("🤖 Available models at {}", endpoint.base_url);
    println!("🎯 Configured model: {}", endpoint.model);
    println!();

    let response = fetch_models(&endpoint.client, &endpoint.base_url, &endpoint.api_key).await?;
    if response.data.is_empty() {
        println!("No models found.");
        return Ok(());
    }

    let mut models = response.data;
    sort_models(&mut models);
    println!("Found {} models (newest first):", models.len());
    println!();
    for model in &models {
        for line in describe_model(model) {
            println!("{line}");
        }
    }
    Ok(())
}

fn describe_model(model: &ModelInfo) -> Vec<String> {
    let mut lines = vec![format!("  • {}", model.id)];
    if let Some(owner) = model.owned_by.as_deref().filter(|o| !o.is_empty() && *o != "system") {
        lines.push(format!("    Owner: {owner}"));
    }
    if let Some(created) = model.created.filter(|c| *c > 0) {
        // Some providers report milliseconds.
        let secs = if created > 10_000_000_000 {
            created / 1000
        } else {
            created
        };
        if let Some(dt) = i64::try_from(secs)
            .ok()
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        {
            lines.push(format!("    Created: {}", dt.format("%Y-%m-%d %H:%M:%S UTC")));
        }
    }
    lines
}
