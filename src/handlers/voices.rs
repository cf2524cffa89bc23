//! Voice catalog endpoint.

use axum::Json;
use serde::Serialize;

/// One selectable voice, shaped for caller-side pickers.
#[derive(Debug, Clone, Serialize)]
pub struct Voice {
    /// Voice identifier passed back as the `vcn` business parameter.
    pub value: &'static str,
    /// Display label.
    pub label: &'static str,
}

/// The built-in voice catalog.
pub const VOICE_CATALOG: &[Voice] = &[
    Voice {
        value: "xiaoyan",
        label: "讯飞小燕 (女) - 中文",
    },
    Voice {
        value: "xiaoyu",
        label: "讯飞小宇 (男) - 中文",
    },
    Voice {
        value: "vixy",
        label: "讯飞小妍 (女) - 中文",
    },
    Voice {
        value: "vixq",
        label: "讯飞许久 (男) - 中文",
    },
    Voice {
        value: "vixf",
        label: "讯飞小芳 (女) - 中文",
    },
    Voice {
        value: "catherine",
        label: "Catherine (女) - 英文",
    },
];

/// Handler for GET /api/xunfei/voices - list the available voices.
pub async fn list_voices() -> Json<Vec<Voice>> {
    Json(VOICE_CATALOG.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tts::xunfei::DEFAULT_VOICE;

    #[test]
    fn test_catalog_contains_default_voice() {
        assert!(VOICE_CATALOG.iter().any(|v| v.value == DEFAULT_VOICE));
    }

    #[tokio::test]
    async fn test_list_voices_serialization() {
        let Json(voices) = list_voices().await;
        assert_eq!(voices.len(), 6);

        let json = serde_json::to_value(&voices).unwrap();
        assert_eq!(json[0]["value"], "xiaoyan");
        assert_eq!(json[5]["value"], "catherine");
    }
}
