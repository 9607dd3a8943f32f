/// Fallback values and length bands used while assembling briefings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblerConfig {
    /// Confidence used when nothing is extracted and the frame carries a
    /// tool call.
    pub tool_call_confidence: f64,
    /// Confidence used when nothing is extracted otherwise.
    pub default_confidence: f64,
    pub reasoning: ClauseBand,
    pub max_reasoning_steps: usize,
    /// Bounds for using the first sentence of raw text as the summary.
    pub summary_sentence: ClauseBand,
    /// Hard truncation applied when no sentence fits.
    pub summary_truncate_chars: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            tool_call_confidence: 0.9,
            default_confidence: 0.75,
            reasoning: ClauseBand { min: 10, max: 200 },
            max_reasoning_steps: 5,
            summary_sentence: ClauseBand { min: 10, max: 200 },
            summary_truncate_chars: 150,
        }
    }
}

/// Inclusive character-count band.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ClauseBand {
    pub min: usize,
    pub max: usize,
}

impl ClauseBand {
    pub fn contains(&self, text: &str) -> bool {
        let len = text.chars().count();
        len >= self.min && len <= self.max
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct IngestLimits {
    pub max_line_bytes: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_line_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum CaptureRaw {
    #[default]
    None,
    Line,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct IngestConfig {
    pub limits: IngestLimits,
    pub capture_raw: CaptureRaw,
}
