//! Plugin registry and the three-stage hook lists run by the host pipeline.
//!
//! A plugin contributes an `init` function that appends hooks to a
//! [`HookSet`]. Option hooks run once per chart and may append further
//! hooks; raw-data and datapoint hooks then run once per series.

use crate::context::ChartContext;
use crate::error::{ConfigError, Result};

/// Runs once per chart, after options are final and before data is read.
pub type OptionsHook = fn(ChartContext, &mut HookSet) -> Result<ChartContext>;

/// Runs once per series, identified by its index in the context.
pub type SeriesHook = fn(ChartContext, usize) -> Result<ChartContext>;

#[derive(Debug, Clone, Default)]
pub struct HookSet {
    pub process_options: Vec<OptionsHook>,
    pub process_raw_data: Vec<SeriesHook>,
    pub process_datapoints: Vec<SeriesHook>,
}

#[derive(Debug, Clone, Copy)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub version: &'static str,
    pub init: fn(&mut HookSet),
}

/// Plugins known to a host, in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    plugins: Vec<PluginDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the ratio plugin.
    pub fn with_defaults() -> Self {
        Self {
            plugins: vec![crate::ratio::PLUGIN],
        }
    }

    pub fn register(&mut self, plugin: PluginDescriptor) -> Result<()> {
        if self.get(plugin.name).is_some() {
            return Err(ConfigError::DuplicatePlugin { name: plugin.name });
        }
        tracing::debug!(
            target: "forhold::plugin",
            name = plugin.name,
            version = plugin.version,
            "plugin registered"
        );
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&PluginDescriptor> {
        self.plugins.iter().find(|plugin| plugin.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.plugins.iter()
    }

    /// Builds a fresh hook set by running every plugin's `init`.
    pub fn hooks(&self) -> HookSet {
        let mut hooks = HookSet::default();
        for plugin in &self.plugins {
            (plugin.init)(&mut hooks);
        }
        hooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_init(_hooks: &mut HookSet) {}

    #[test]
    fn test_defaults_include_ratio_plugin() {
        let registry = Registry::with_defaults();
        let ratio = registry.get("ratio").unwrap();
        assert_eq!(ratio.version, "0.0.1");
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let mut registry = Registry::with_defaults();
        let err = registry
            .register(PluginDescriptor {
                name: "ratio",
                version: "9.9.9",
                init: noop_init,
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePlugin { name: "ratio" }));
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    fn test_hooks_come_from_init() {
        let mut registry = Registry::new();
        registry
            .register(PluginDescriptor {
                name: "noop",
                version: "1.0.0",
                init: noop_init,
            })
            .unwrap();
        assert!(registry.hooks().process_options.is_empty());

        let hooks = Registry::with_defaults().hooks();
        assert_eq!(hooks.process_options.len(), 1);
        assert!(hooks.process_raw_data.is_empty());
    }
}
