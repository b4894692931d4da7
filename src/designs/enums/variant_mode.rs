use serde::Deserialize;

/// How the variants of one batch are scheduled against the job service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantMode {
    #[default]
    Concurrent,
    Sequential,
}

impl VariantMode {
    pub fn value(&self) -> &str {
        match *self {
            Self::Concurrent => "concurrent",
            Self::Sequential => "sequential",
        }
    }
}
