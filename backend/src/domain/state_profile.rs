//! State heritage profiles and the registry of states the site covers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A state the site has content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedState {
    /// URL path segment, e.g. `maharashtra`.
    pub slug: &'static str,
    /// Reference-data key, e.g. `INMH`.
    pub state_id: &'static str,
    /// Region label used on festival records.
    pub region: &'static str,
}

/// Maharashtra, the only state with published content.
pub const MAHARASHTRA: SupportedState = SupportedState {
    slug: "maharashtra",
    state_id: "INMH",
    region: "Maharashtra",
};

const SUPPORTED_STATES: &[SupportedState] = &[MAHARASHTRA];

impl SupportedState {
    /// Resolve a URL slug to a supported state.
    ///
    /// # Examples
    /// ```
    /// use heritage::domain::SupportedState;
    ///
    /// assert_eq!(SupportedState::from_slug("maharashtra").map(|s| s.state_id), Some("INMH"));
    /// assert!(SupportedState::from_slug("goa").is_none());
    /// ```
    pub fn from_slug(slug: &str) -> Option<&'static Self> {
        SUPPORTED_STATES.iter().find(|state| state.slug == slug)
    }

    /// Message shown for states that have no content yet.
    pub fn coming_soon_message(slug: &str) -> String {
        format!(
            "Information about {slug} will be available soon. For now, you can explore Maharashtra state."
        )
    }
}

/// Descriptive record for a state page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateProfile {
    #[schema(example = "INMH")]
    pub state_id: String,
    pub name: String,
    pub capital: String,
    pub summary: String,
    pub highlights: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Maharashtra")]
    #[case("gujarat")]
    #[case("")]
    fn only_the_exact_maharashtra_slug_resolves(#[case] slug: &str) {
        assert!(SupportedState::from_slug(slug).is_none());
    }

    #[rstest]
    fn maharashtra_maps_to_reference_key() {
        let state = SupportedState::from_slug("maharashtra").expect("supported");
        assert_eq!(state.state_id, "INMH");
        assert_eq!(state.region, "Maharashtra");
    }

    #[rstest]
    fn coming_soon_message_names_the_state() {
        assert_eq!(
            SupportedState::coming_soon_message("kerala"),
            "Information about kerala will be available soon. For now, you can explore Maharashtra state."
        );
    }
}
