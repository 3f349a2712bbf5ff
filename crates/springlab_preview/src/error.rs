use springlab_animation::ParsePresetError;
use thiserror::Error;

use crate::model::ConfigField;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum PreviewError {
    #[error("unknown spring preset `{0}`")]
    UnknownPreset(String),

    #[error("unknown spring parameter `{0}`")]
    UnknownField(String),

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: ConfigField,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl From<ParsePresetError> for PreviewError {
    fn from(err: ParsePresetError) -> Self {
        Self::UnknownPreset(err.0)
    }
}
