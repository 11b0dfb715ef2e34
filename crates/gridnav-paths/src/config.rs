/// Search settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SearchConfig {
    /// Stop after expanding this many nodes without reaching the goal.
    /// `None` searches until the open set runs dry.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Config with an expansion budget.
    pub fn with_max_expansions(max: usize) -> Self {
        Self {
            max_expansions: Some(max),
        }
    }
}
