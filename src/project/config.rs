//! Which files the analysis picks up.

/// File filters for workspace loading.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AnalysisConfig {
    /// Extensions including the leading dot, e.g. `.groovy`.
    pub enabled_extensions: Vec<String>,
    /// A path containing any of these substrings is skipped.
    pub exclude_patterns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            enabled_extensions: vec![".groovy".into(), ".gradle".into(), ".gradle.kts".into()],
            exclude_patterns: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// True when the last path segment of `uri` ends with an enabled
    /// extension and is more than the bare extension.
    pub fn is_groovy_file(&self, uri: &str) -> bool {
        let file_name = uri.rsplit(['/', '\\']).next().unwrap_or(uri).to_ascii_lowercase();
        if file_name.is_empty() {
            return false;
        }
        self.enabled_extensions.iter().any(|ext| {
            let ext = ext.to_ascii_lowercase();
            file_name.ends_with(&ext) && file_name != ext
        })
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| path.contains(pattern.as_str()))
    }

    pub fn with_exclude_patterns(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exclude_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }
}
