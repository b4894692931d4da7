use serde::Deserialize;

/// Decides whether a batch with some failed variants is still a success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    #[default]
    AtLeastOne,
    RequireAll,
}

impl FailurePolicy {
    pub fn value(&self) -> &str {
        match *self {
            Self::AtLeastOne => "at_least_one",
            Self::RequireAll => "require_all",
        }
    }
}
