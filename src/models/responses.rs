use serde::Serialize;

use crate::text_processing::normalization::NormalizationInfo;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub normalized: String,
    pub info: NormalizationInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeColorResponse {
    #[serde(rename = "type")]
    pub name: String,
    pub color: String,
    /// Whether the label is one of the known types
    pub known: bool,
}

#[derive(Debug, Serialize)]
pub struct TypesResponse {
    pub types: Vec<TypeColorResponse>,
}
