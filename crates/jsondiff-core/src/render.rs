//! Text and JSON renderings of a diff tree.

use crate::{DiffNode, DiffState, RenderError};

const COLOR_RESET: &str = "\u{1b}[0m";
const COLOR_RED: &str = "\u{1b}[31m";
const COLOR_GREEN: &str = "\u{1b}[32m";
const COLOR_YELLOW: &str = "\u{1b}[33m";

/// Width of the state column in text output.
const STATE_WIDTH: usize = 8;

/// Configuration toggles for text rendering.
///
/// ```
/// # use jsondiff_core::RenderConfig;
/// let config = RenderConfig::new().with_only_changes(true).with_query("items");
/// assert!(config.only_changes());
/// assert_eq!(config.query(), Some("items"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RenderConfig {
    color: bool,
    only_changes: bool,
    query: Option<String>,
}

impl RenderConfig {
    /// Constructs a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables ANSI color output.
    #[must_use]
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Hides nodes whose state is `equal`.
    #[must_use]
    pub fn with_only_changes(mut self, enabled: bool) -> Self {
        self.only_changes = enabled;
        self
    }

    /// Keeps only nodes whose display path contains `query`. An empty query
    /// keeps everything.
    #[must_use]
    pub fn with_query<S>(mut self, query: S) -> Self
    where
        S: Into<String>,
    {
        let query = query.into();
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Indicates whether color output is enabled.
    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Indicates whether equal nodes are hidden.
    #[must_use]
    pub fn only_changes(&self) -> bool {
        self.only_changes
    }

    /// Returns the path filter, if any.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Decides whether `node` is shown under this configuration.
    #[must_use]
    pub fn accepts(&self, node: &DiffNode) -> bool {
        if self.only_changes && node.is_equal() {
            return false;
        }
        match &self.query {
            Some(query) => node.path.to_string().contains(query.as_str()),
            None => true,
        }
    }
}

impl DiffNode {
    /// Returns the nodes shown under `config`, in pre-order.
    pub fn visible<'a>(&'a self, config: &'a RenderConfig) -> impl Iterator<Item = &'a DiffNode> {
        self.iter().filter(move |node| config.accepts(node))
    }

    /// Renders one line per visible node: the state label, padded, then the
    /// display path.
    ///
    /// ```
    /// # use jsondiff_core::{compare, DiffOptions, Node, RenderConfig};
    /// let lhs = Node::from_json_str("{\"a\":1}")?;
    /// let rhs = Node::from_json_str("{\"a\":2}")?;
    /// let root = compare(&lhs, &rhs, &DiffOptions::default());
    /// assert_eq!(root.render(&RenderConfig::default()), "changed  $\nchanged  $.a\n");
    /// # Ok::<(), jsondiff_core::CanonicalizeError>(())
    /// ```
    #[must_use]
    pub fn render(&self, config: &RenderConfig) -> String {
        let mut output = String::new();
        for node in self.visible(config) {
            let label = format!("{:<STATE_WIDTH$}", node.state.as_str());
            match state_color(node.state).filter(|_| config.color_enabled()) {
                Some(color) => {
                    output.push_str(color);
                    output.push_str(&label);
                    output.push_str(COLOR_RESET);
                }
                None => output.push_str(&label),
            }
            output.push(' ');
            output.push_str(&node.path.to_string());
            output.push('\n');
        }
        output
    }

    /// Serializes the whole tree as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn state_color(state: DiffState) -> Option<&'static str> {
    match state {
        DiffState::Added => Some(COLOR_GREEN),
        DiffState::Removed => Some(COLOR_RED),
        DiffState::Changed => Some(COLOR_YELLOW),
        DiffState::Equal => None,
    }
}
