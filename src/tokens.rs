//! Brand constants for the design system
//!
//! Immutable lookup tables shared by the script and style plugins: the brand
//! color allow-list, hex-to-token suggestion maps, the button variant policy,
//! icon naming policy, and the token-only CSS property set. Hex keys are
//! stored uppercase; all lookups are case-insensitive.

/// Hex color pattern (`#RRGGBB` or `#RGB`, word-bounded)
pub const HEX_COLOR_PATTERN: &str = r"#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})\b";

/// `rgb()` / `rgba()` function call pattern
pub const RGB_COLOR_PATTERN: &str =
    r"(?i)rgba?\(\s*\d+\s*,\s*\d+\s*,\s*\d+(?:\s*,\s*[\d.]+)?\s*\)";

/// Brand colors exempt from violation reporting in script sources
pub const ALLOWED_HEX_COLORS: &[&str] = &["#3B4960", "#F1F2F3"];

/// Hex-to-token suggestions offered by the script-side color rule
pub const TOKEN_SUGGESTIONS: &[(&str, &str)] = &[
    ("#3B4960", "var(--color-primary)"),
    ("#F1F2F3", "var(--color-secondary)"),
    ("#28A745", "var(--color-success)"),
    ("#DC3545", "var(--color-error)"),
    ("#FFC107", "var(--color-warning)"),
];

/// Hex-to-token mapping used by the style-side color rule
pub const BRAND_COLOR_TOKENS: &[(&str, &str)] = &[
    ("#3B4960", "var(--color-primary)"),
    ("#F1F2F3", "var(--color-secondary)"),
    ("#28A745", "var(--color-success)"),
    ("#DC3545", "var(--color-error)"),
    ("#FFC107", "var(--color-warning)"),
    ("#FFFFFF", "var(--color-white)"),
    ("#000000", "var(--color-black)"),
];

/// The only permitted button variant
pub const ALLOWED_BUTTON_VARIANT: &str = "contained";

/// Button variants rejected by the design system
pub const DISALLOWED_BUTTON_VARIANTS: &[&str] = &["outlined", "text"];

/// Component names the button rule inspects
pub const BUTTON_COMPONENTS: &[&str] = &["Button", "MuiButton"];

/// Icon package whose imports are constrained to the Outlined set
pub const ICON_PACKAGE: &str = "@mui/icons-material";

/// Required suffix for icon imports
pub const ICON_REQUIRED_SUFFIX: &str = "Outlined";

/// Known icon suffix variants stripped when computing the suggested name
pub const ICON_SUFFIX_VARIANTS: &[&str] = &["Filled", "TwoTone", "Round", "Sharp"];

/// CSS properties whose values must come from design tokens
pub const TOKEN_ONLY_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "border-color",
    "box-shadow",
    "text-shadow",
];

/// Keyword values permitted on token-only properties
pub const ALLOWED_KEYWORD_VALUES: &[&str] =
    &["transparent", "inherit", "currentColor", "initial", "unset"];

/// CSS variable reference marker
pub const VAR_REFERENCE: &str = "var(--";

/// Font-family token prefix
pub const FONT_TOKEN_PREFIX: &str = "var(--font-family";

/// The approved literal font
pub const APPROVED_FONT: &str = "Open Sans";

/// Custom properties the design-token file must define
pub const REQUIRED_TOKENS: &[&str] = &[
    "--color-primary",
    "--color-secondary",
    "--color-success",
    "--color-error",
    "--color-warning",
];

/// Check whether a hex color is on the brand allow-list (case-insensitive)
pub fn is_allowed_color(color: &str) -> bool {
    ALLOWED_HEX_COLORS
        .iter()
        .any(|c| c.eq_ignore_ascii_case(color))
}

/// Look up the token suggested for a hex color in script sources
pub fn token_suggestion(color: &str) -> Option<&'static str> {
    TOKEN_SUGGESTIONS
        .iter()
        .find(|(hex, _)| hex.eq_ignore_ascii_case(color))
        .map(|(_, token)| *token)
}

/// Look up the token mapped to a hex color in stylesheets
pub fn brand_color_token(color: &str) -> Option<&'static str> {
    BRAND_COLOR_TOKENS
        .iter()
        .find(|(hex, _)| hex.eq_ignore_ascii_case(color))
        .map(|(_, token)| *token)
}

/// Compute the Outlined name suggested for a non-compliant icon import
///
/// Strips one trailing suffix variant if present, then appends the required
/// suffix: `TrendingUp` -> `TrendingUpOutlined`,
/// `TrendingUpFilled` -> `TrendingUpOutlined`.
pub fn outlined_icon_name(icon: &str) -> String {
    let base = ICON_SUFFIX_VARIANTS
        .iter()
        .find_map(|suffix| icon.strip_suffix(suffix))
        .unwrap_or(icon);
    format!("{}{}", base, ICON_REQUIRED_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_colors_case_insensitive() {
        assert!(is_allowed_color("#3B4960"));
        assert!(is_allowed_color("#3b4960"));
        assert!(is_allowed_color("#F1F2F3"));
        assert!(is_allowed_color("#f1f2f3"));
        assert!(!is_allowed_color("#28A745"));
        assert!(!is_allowed_color("#FF0000"));
    }

    #[test]
    fn test_token_suggestion() {
        assert_eq!(token_suggestion("#3B4960"), Some("var(--color-primary)"));
        assert_eq!(token_suggestion("#28a745"), Some("var(--color-success)"));
        assert_eq!(token_suggestion("#dc3545"), Some("var(--color-error)"));
        assert_eq!(token_suggestion("#FFC107"), Some("var(--color-warning)"));
        assert_eq!(token_suggestion("#ABCDEF"), None);
    }

    #[test]
    fn test_brand_color_token() {
        assert_eq!(brand_color_token("#ffffff"), Some("var(--color-white)"));
        assert_eq!(brand_color_token("#000000"), Some("var(--color-black)"));
        assert_eq!(brand_color_token("#3b4960"), Some("var(--color-primary)"));
        assert_eq!(brand_color_token("#123456"), None);
    }

    #[test]
    fn test_outlined_icon_name() {
        assert_eq!(outlined_icon_name("TrendingUp"), "TrendingUpOutlined");
        assert_eq!(outlined_icon_name("TrendingUpFilled"), "TrendingUpOutlined");
        assert_eq!(outlined_icon_name("DeleteTwoTone"), "DeleteOutlined");
        assert_eq!(outlined_icon_name("HomeRound"), "HomeOutlined");
        assert_eq!(outlined_icon_name("StarSharp"), "StarOutlined");
    }
}
