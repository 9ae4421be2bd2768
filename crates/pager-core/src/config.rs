//! Pager configuration.

/// Default number of neighbor pages kept resident on each side of the
/// current page.
pub const DEFAULT_WINDOW_RADIUS: usize = 1;

/// Configuration applied by the controller on every reload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagerConfig {
    /// Pages kept materialized on each side of the current page.
    /// Cached pages farther than this are eligible for reuse.
    pub window_radius: usize,

    /// Whether the host surface should snap to page boundaries.
    pub paging_enabled: bool,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            window_radius: DEFAULT_WINDOW_RADIUS,
            paging_enabled: true,
        }
    }
}

impl PagerConfig {
    /// Creates a configuration with the given window radius.
    pub fn new(window_radius: usize) -> Self {
        Self {
            window_radius,
            ..Self::default()
        }
    }

    /// Returns a copy with page snapping turned off on the host surface.
    pub fn without_paging(self) -> Self {
        Self {
            paging_enabled: false,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_one_neighbor_per_side() {
        let config = PagerConfig::default();
        assert_eq!(config.window_radius, 1);
        assert!(config.paging_enabled);
    }

    #[test]
    fn without_paging_keeps_radius() {
        let config = PagerConfig::new(2).without_paging();
        assert_eq!(config.window_radius, 2);
        assert!(!config.paging_enabled);
    }
}
