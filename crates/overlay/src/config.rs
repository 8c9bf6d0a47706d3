use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, Result};

/// Largest accepted popup inset; anything beyond this would push the panel
/// off its anchor coordinates.
const MAX_POPUP_INSET_PX: u32 = 200;

/// Configuration for overlay behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Render toolbar controls for a dark editor theme
    #[serde(default)]
    pub dark: bool,

    /// Fixed pixel inset applied when positioning the options popup
    #[serde(default = "default_popup_inset")]
    pub popup_inset_px: u32,

    /// Longest header-line prefix fed to the classifier
    #[serde(default = "default_max_header_len")]
    pub max_header_len: usize,
}

fn default_popup_inset() -> u32 {
    10
}

fn default_max_header_len() -> usize {
    1000
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            dark: false,
            popup_inset_px: default_popup_inset(),
            max_header_len: default_max_header_len(),
        }
    }
}

impl OverlayConfig {
    /// Config for a dark editor theme
    #[must_use]
    pub fn dark_theme() -> Self {
        Self {
            dark: true,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_header_len == 0 {
            return Err(OverlayError::invalid_config(
                "max_header_len must be positive",
            ));
        }

        if self.popup_inset_px > MAX_POPUP_INSET_PX {
            return Err(OverlayError::invalid_config(format!(
                "popup_inset_px ({}) exceeds maximum ({MAX_POPUP_INSET_PX})",
                self.popup_inset_px
            )));
        }

        Ok(())
    }
}
