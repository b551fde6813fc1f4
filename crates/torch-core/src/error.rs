use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TorchError {
    #[error("source image is {width}x{height} but {len} bytes were supplied")]
    ImageSize { width: u32, height: u32, len: usize },

    #[error("unknown config key `{0}`")]
    UnknownConfigKey(String),

    #[error("invalid value `{value}` for config key `{key}`")]
    InvalidConfigValue { key: String, value: String },
}
