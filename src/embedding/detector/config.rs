use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct DetectorConfig {
    pub model_path: Option<PathBuf>,

    /// Truncation length; `None` uses the encoder's default.
    pub max_seq_len: Option<usize>,
}

impl DetectorConfig {
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = Some(max_seq_len);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_seq_len == Some(0) {
            return Err("max_seq_len must be at least 1".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
