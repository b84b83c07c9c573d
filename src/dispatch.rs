//! Execute a prepared command against the service.

use crate::api::ApiClient;
use crate::args::Dispatch;
use crate::config::Config;
use crate::error::CliError;
use crate::output::render;

/// Send the command's single request and render the response.
pub async fn execute(dispatch: &Dispatch, config: &Config) -> Result<String, CliError> {
    let request = dispatch.request.to_api_request()?;
    let client = ApiClient::new(config)?;

    tracing::info!(command = %dispatch.request.kind(), "dispatching");
    let body = client.send(&request).await?;
    Ok(render(&body, dispatch.raw_output))
}
