use std::fmt;
use std::str::FromStr;

/// Layout of the rendered document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderStyle {
    /// A `##` subsection per speaker run with one paragraph per utterance.
    #[default]
    Sections,
    /// One list item per utterance.
    Compact,
}

impl RenderStyle {
    pub const ALL: &[RenderStyle] = &[RenderStyle::Sections, RenderStyle::Compact];
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStyle::Sections => f.write_str("sections"),
            RenderStyle::Compact => f.write_str("compact"),
        }
    }
}

impl FromStr for RenderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|style| style.to_string() == wanted)
            .ok_or_else(|| {
                let names: Vec<String> = Self::ALL.iter().map(ToString::to_string).collect();
                format!(
                    "Render style must be one of: {}, got '{}'",
                    names.join(", "),
                    s.trim()
                )
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Document heading; a generic default is used when absent.
    pub title: Option<String>,
    pub include_timestamps: bool,
    pub style: RenderStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            include_timestamps: true,
            style: RenderStyle::Sections,
        }
    }
}
