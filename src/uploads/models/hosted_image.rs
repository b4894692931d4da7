use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedImage {
    pub url: String,
    pub public_id: String,
    pub width: usize,
    pub height: usize,
}
