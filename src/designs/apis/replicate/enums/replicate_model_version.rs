#[non_exhaustive]
pub struct ReplicateModelVersion;

impl ReplicateModelVersion {
    pub const INTERIOR_DESIGN: &'static str =
        "76604baddc85b1b4616e1c6475eca080da339c8875bd4996705440484a6eac38";
}
