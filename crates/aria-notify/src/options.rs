// Action options for locator interactions
//
// Configuration for click and press actions. Use the builder pattern to
// construct options; a bare None gets the defaults.

/// Click options
///
/// # Example
///
/// ```ignore
/// use aria_notify_rs::ClickOptions;
///
/// // Bypass actionability checks (the control's own handling still applies)
/// let options = ClickOptions::builder().force(true).build();
///
/// // Actionability checks only, without clicking
/// let options = ClickOptions::builder().trial(true).build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClickOptions {
    /// Whether to bypass actionability checks (visible, enabled).
    ///
    /// A forced click is delivered even to a disabled element; whether it
    /// has any effect is then up to the element's own handling.
    pub force: Option<bool>,
    /// Perform actionability checks without clicking.
    pub trial: Option<bool>,
    /// Maximum time in milliseconds to wait for actionability.
    pub timeout: Option<f64>,
}

impl ClickOptions {
    /// Create a new builder for ClickOptions
    pub fn builder() -> ClickOptionsBuilder {
        ClickOptionsBuilder::default()
    }
}

/// Builder for ClickOptions
#[derive(Debug, Clone, Default)]
pub struct ClickOptionsBuilder {
    force: Option<bool>,
    trial: Option<bool>,
    timeout: Option<f64>,
}

impl ClickOptionsBuilder {
    /// Set whether to bypass actionability checks
    pub fn force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }

    /// Set whether to only perform actionability checks
    pub fn trial(mut self, trial: bool) -> Self {
        self.trial = Some(trial);
        self
    }

    /// Set the actionability timeout in milliseconds
    pub fn timeout(mut self, timeout: f64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the ClickOptions
    pub fn build(self) -> ClickOptions {
        ClickOptions {
            force: self.force,
            trial: self.trial,
            timeout: self.timeout,
        }
    }
}

/// Press options
///
/// # Example
///
/// ```ignore
/// use aria_notify_rs::PressOptions;
///
/// let options = PressOptions::builder().timeout(500.0).build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PressOptions {
    /// Maximum time in milliseconds to wait for actionability.
    pub timeout: Option<f64>,
}

impl PressOptions {
    /// Create a new builder for PressOptions
    pub fn builder() -> PressOptionsBuilder {
        PressOptionsBuilder::default()
    }
}

/// Builder for PressOptions
#[derive(Debug, Clone, Default)]
pub struct PressOptionsBuilder {
    timeout: Option<f64>,
}

impl PressOptionsBuilder {
    /// Set the actionability timeout in milliseconds
    pub fn timeout(mut self, timeout: f64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the PressOptions
    pub fn build(self) -> PressOptions {
        PressOptions {
            timeout: self.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_options_default_to_none() {
        let options = ClickOptions::default();
        assert!(options.force.is_none());
        assert!(options.trial.is_none());
        assert!(options.timeout.is_none());
    }

    #[test]
    fn click_options_builder_sets_fields() {
        let options = ClickOptions::builder()
            .force(true)
            .trial(false)
            .timeout(250.0)
            .build();
        assert_eq!(options.force, Some(true));
        assert_eq!(options.trial, Some(false));
        assert_eq!(options.timeout, Some(250.0));
    }

    #[test]
    fn press_options_builder_sets_timeout() {
        let options = PressOptions::builder().timeout(100.0).build();
        assert_eq!(options.timeout, Some(100.0));
    }
}
