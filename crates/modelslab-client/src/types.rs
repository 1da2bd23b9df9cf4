//! ModelsLab text2img wire types.

use serde::{Deserialize, Serialize};

/// Request body for the realtime text2img endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Text2ImgRequest {
    /// API key (the provider authenticates in-body).
    pub key: String,
    /// Full composed prompt.
    pub prompt: String,
    /// Negative prompt constants.
    pub negative_prompt: String,
    /// Output width.
    pub width: u32,
    /// Output height.
    pub height: u32,
    /// Number of samples.
    pub samples: u32,
    /// Guidance scale.
    pub guidance_scale: f32,
    /// Provider safety checker flag.
    pub safety_checker: bool,
}

/// Response body for the realtime text2img endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Text2ImgResponse {
    /// Generated image URLs, possibly empty.
    #[serde(default)]
    pub output: Vec<String>,
    /// Provider status string ("success", "error", "processing").
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_success_response() {
        let body = r#"{"status":"success","output":["https://cdn.example/img.png"]}"#;
        let parsed: Text2ImgResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.output.len(), 1);
        assert_eq!(parsed.status.as_deref(), Some("success"));
    }

    #[test]
    fn test_parses_empty_output() {
        let parsed: Text2ImgResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.output.is_empty());
        assert!(parsed.status.is_none());
    }
}
