use failure::Fail;

/// Failure of a single remote lookup. None of these are fatal: callers degrade
/// the affected panel field for the current cycle.
#[derive(Debug, Fail)]
pub enum FetchError {
    #[fail(display = "request to {} failed: {}", url, reason)]
    Network { url: String, reason: String },

    #[fail(display = "unexpected HTTP status {} from {}", status, url)]
    Status { url: String, status: u16 },

    #[fail(display = "nothing found at {}", url)]
    NotFound { url: String },

    #[fail(display = "malformed response from {}: {}", url, reason)]
    Malformed { url: String, reason: String },
}

impl FetchError {
    /// Definitive misses are safe to remember for the rest of the run. Client
    /// errors count as definitive except timeouts (408) and throttling (429).
    pub fn is_definitive(&self) -> bool {
        match self {
            FetchError::NotFound { .. } | FetchError::Malformed { .. } => true,
            FetchError::Status { status, .. } => (400..500).contains(status) && *status != 408 && *status != 429,
            FetchError::Network { .. } => false,
        }
    }
}

#[derive(Debug, Fail)]
pub enum RenderError {
    #[fail(display = "cannot allocate a {}x{} panel buffer", width, height)]
    BufferAllocation { width: u32, height: u32 },
}

#[derive(Debug, Fail)]
pub enum DisplayError {
    #[fail(display = "frame is {}x{} but the display is {}x{}", frame_width, frame_height, width, height)]
    FrameSize { frame_width: u32, frame_height: u32, width: u32, height: u32 },

    #[fail(display = "cannot encode frame: {}", _0)]
    Encode(#[fail(cause)] image::ImageError),

    #[fail(display = "display write failed: {}", _0)]
    Io(#[fail(cause)] std::io::Error),
}

/// Conditions that stop the display loop
#[derive(Debug, Fail)]
pub enum LoopError {
    #[fail(display = "render failed: {}", _0)]
    Render(#[fail(cause)] RenderError),

    #[fail(display = "display push failed: {}", _0)]
    Display(#[fail(cause)] DisplayError),
}

impl From<RenderError> for LoopError {
    fn from(e: RenderError) -> Self { LoopError::Render(e) }
}

impl From<DisplayError> for LoopError {
    fn from(e: DisplayError) -> Self { LoopError::Display(e) }
}

#[derive(Debug, Fail)]
pub enum ConfigError {
    #[fail(display = "cannot read configuration {}: {}", path, source)]
    Read { path: String, #[fail(cause)] source: std::io::Error },

    #[fail(display = "cannot parse configuration {}: {}", path, reason)]
    Parse { path: String, reason: String },

    #[fail(display = "invalid configuration: {}", _0)]
    Invalid(String),
}
