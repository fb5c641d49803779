//! Model configuration loading and mutation operations

pub mod dict;
pub mod emotion;

pub use dict::{ModelDict, ModelInfo};
pub use emotion::EmotionMap;

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{distributions::Alphanumeric, Rng};

use crate::core::{Error, Result};
use crate::runtime;

/// Handle to a loaded model configuration
///
/// The config is whatever JSON the model endpoint served; no shape
/// validation is performed on it.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    /// Debug label built from wall-clock millis plus a random suffix.
    /// Practically unique; never correctness- or security-bearing.
    pub id: String,
    /// Raw parsed model JSON
    pub config: serde_json::Value,
    /// Set for every handle produced by a successful load
    pub success: bool,
}

/// Fetch and parse a model configuration document
///
/// Single best-effort GET: no cache, no retry, no timeout beyond the
/// client default. A non-OK status becomes [`Error::Status`]; transport
/// and body-parse failures propagate as [`Error::Network`].
pub async fn load_model(url: &str) -> Result<ModelHandle> {
    log::info!("loading model from: {url}");

    let response = match reqwest::get(url).await {
        Ok(response) => response,
        Err(e) => {
            log::error!("model fetch failed: {e}");
            return Err(e.into());
        }
    };

    let status = response.status();
    if !status.is_success() {
        log::error!("model fetch failed: {status}");
        return Err(Error::Status(status));
    }

    let config: serde_json::Value = match response.json().await {
        Ok(config) => config,
        Err(e) => {
            log::error!("model config parse failed: {e}");
            return Err(e.into());
        }
    };

    let handle = ModelHandle {
        id: generate_model_id(),
        config,
        success: true,
    };
    log::info!("model config loaded, id={}", handle.id);

    Ok(handle)
}

/// Advance a model's animation state by `delta_time` seconds
pub fn update_model(model: &ModelHandle, delta_time: f32) {
    log::trace!("advancing model {} by {delta_time}s", model.id);
    runtime::global().with_backend(|backend| backend.advance(model, delta_time));
}

/// Apply the expression preset at `index` to a model
pub fn set_expression(model: &ModelHandle, index: usize) {
    log::info!("setting expression to index: {index}");
    runtime::global().with_backend(|backend| backend.apply_expression(model, index));
}

/// Apply a single named parameter value to a model
pub fn set_model_parameter(model: &ModelHandle, parameter_id: &str, value: f32) {
    log::debug!("setting parameter {parameter_id} to {value}");
    runtime::global().with_backend(|backend| backend.apply_parameter(model, parameter_id, value));
}

/// Generate a model instance label: `live2d_<millis>_<9 alnum chars>`
fn generate_model_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("live2d_{millis}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn http_response(status_line: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    /// Serve a single canned HTTP response on an ephemeral local port
    async fn serve_once(response: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_model_id_format() {
        let id = generate_model_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "live2d");
        assert!(!parts[1].is_empty());
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_model_ids_differ() {
        assert_ne!(generate_model_id(), generate_model_id());
    }

    #[tokio::test]
    async fn test_load_model_success() {
        let doc = serde_json::json!({
            "Version": 3,
            "FileReferences": {"Textures": ["texture_00.png"]}
        });
        let url = serve_once(http_response("200 OK", "application/json", &doc.to_string())).await;

        let handle = load_model(&url).await.expect("load should succeed");
        assert!(handle.success);
        assert_eq!(handle.config, doc);
        assert!(handle.id.starts_with("live2d_"));
    }

    #[tokio::test]
    async fn test_load_model_http_error_carries_status_text() {
        let url = serve_once(http_response("404 Not Found", "text/plain", "missing")).await;

        let err = load_model(&url).await.expect_err("load should fail");
        assert!(matches!(err, Error::Status(_)));
        assert!(err.to_string().contains("404 Not Found"));
    }

    #[tokio::test]
    async fn test_load_model_malformed_body() {
        let url = serve_once(http_response("200 OK", "application/json", "not json at all")).await;

        let err = load_model(&url).await.expect_err("load should fail");
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn test_load_model_connection_refused() {
        // Bind then drop to get a port nothing is listening on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");
        drop(listener);

        let err = load_model(&format!("http://{addr}"))
            .await
            .expect_err("load should fail");
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_mutation_ops_accept_any_handle() {
        let handle = ModelHandle {
            id: "live2d_0_unloaded0".to_string(),
            config: serde_json::Value::Null,
            success: false,
        };
        // None of these may panic, backend or not
        update_model(&handle, 0.016);
        set_expression(&handle, 7);
        set_model_parameter(&handle, "ParamAngleX", 30.0);
    }
}
