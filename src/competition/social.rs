//! Contract for the social-media post compositor that celebrates a
//! score-setting submission. Rendering implementations live outside this
//! crate; the pipeline only hands them their inputs.

use std::path::{Path, PathBuf};

/// Everything the compositor needs to draw one synthetic post.
#[derive(Clone, Debug, PartialEq)]
pub struct SocialPost {
    pub display_name: String,
    pub handle: String,
    pub body: String,
    pub timestamp_label: String,
    /// Path or URL of the avatar image.
    pub avatar_ref: String,
    pub verified: bool,
    pub extra_images: Vec<PathBuf>,
}

/// Renders a [`SocialPost`] to a raster artifact at `output_path` and
/// returns that path. Stateless: the output is a pure function of the
/// inputs.
pub trait SocialPostRenderer {
    fn render_social_post(
        &self,
        post: &SocialPost,
        output_path: &Path,
    ) -> std::io::Result<PathBuf>;
}
