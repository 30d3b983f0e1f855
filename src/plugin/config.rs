use std::collections::HashMap;
use std::sync::Arc;

use crate::model::label::ResourceLabel;
use crate::plugin::error::{DirectiveError, ValueError, parse_bool};
use crate::plugin::implementation::Plugin;
use crate::plugin::intent::Intent;
use crate::plugin::keyword::Keyword;
use crate::plugin::report::PluginReport;

/// Handle for the scope (package) a directive was found in.
///
/// Passed through to [`PluginConfig::apply_directive`] for diagnostics; it
/// never changes how a directive is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeContext {
    /// Package path relative to the workspace root; empty for the root.
    pub rel: String,
}

impl ScopeContext {
    /// Scope for the package at `rel`.
    pub fn new(rel: impl Into<String>) -> Self {
        Self { rel: rel.into() }
    }
}

/// Configuration of one named plugin within one scope.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    name: String,
    enabled: bool,
    label: Option<ResourceLabel>,
    tool: Option<ResourceLabel>,
    // false entries are never surfaced; negation deletes the key.
    options: HashMap<String, bool>,
    implementation: Option<Arc<dyn Plugin>>,
}

impl PluginConfig {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty(), "plugin config name must not be empty");

        Self {
            name,
            enabled: true,
            label: None,
            tool: None,
            options: HashMap::new(),
            implementation: None,
        }
    }

    /// Plugin name; fixed for the life of the record.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Label of the provider of the plugin metadata.
    pub fn label(&self) -> Option<&ResourceLabel> {
        self.label.as_ref()
    }

    /// Label of the executable tool.
    pub fn tool(&self) -> Option<&ResourceLabel> {
        self.tool.as_ref()
    }

    /// The registered behaviour, if one has been bound.
    pub fn implementation(&self) -> Option<&Arc<dyn Plugin>> {
        self.implementation.as_ref()
    }

    /// Attach the registered behaviour for this plugin.
    ///
    /// Directives never set or clear the handle; duplicates share it.
    pub fn bind_implementation(&mut self, implementation: Arc<dyn Plugin>) {
        self.implementation = Some(implementation);
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.get(option).copied().unwrap_or(false)
    }

    /// Active options in ascending lexicographic order.
    pub fn active_options(&self) -> Vec<String> {
        let mut options: Vec<String> = self
            .options
            .iter()
            .filter(|(_, want)| **want)
            .map(|(option, _)| option.clone())
            .collect();

        options.sort();
        options
    }

    /// Copy this config to seed a child scope.
    ///
    /// The option map is copied entry by entry; labels and the implementation
    /// handle are shared values.
    pub fn duplicate(&self) -> PluginConfig {
        tracing::trace!(
            plugin = %self.name,
            options = self.options.len(),
            "duplicating plugin config"
        );
        self.clone()
    }

    /// Apply one `(param, value)` directive found in `scope`.
    ///
    /// `directive` is the raw directive text and is only used in errors. On
    /// error the config is left untouched.
    pub fn apply_directive(
        &mut self,
        scope: &ScopeContext,
        directive: &str,
        param: &str,
        value: &str,
    ) -> Result<(), DirectiveError> {
        let intent = Intent::parse(param);
        let Ok(keyword) = intent.value.parse::<Keyword>() else {
            return Err(DirectiveError::UnknownParameter {
                directive: directive.to_string(),
                param: param.to_string(),
            });
        };

        let parse_error = |source: ValueError| DirectiveError::Parse {
            keyword,
            value: value.to_string(),
            source,
        };

        match keyword {
            Keyword::Enabled => {
                self.enabled = parse_bool(value).map_err(|err| parse_error(err.into()))?;
            }
            Keyword::Label => {
                let label = ResourceLabel::parse(value).map_err(|err| parse_error(err.into()))?;
                self.label = Some(label);
            }
            Keyword::Tool => {
                let tool = ResourceLabel::parse(value).map_err(|err| parse_error(err.into()))?;
                self.tool = Some(tool);
            }
            Keyword::Option if intent.negative => {
                self.options.remove(value);
            }
            Keyword::Option => {
                if value.trim().is_empty() {
                    return Err(DirectiveError::EmptyOption {
                        directive: directive.to_string(),
                    });
                }
                self.options.insert(value.to_string(), true);
            }
        }

        tracing::trace!(
            plugin = %self.name,
            scope = %scope.rel,
            %keyword,
            negative = intent.negative,
            value,
            "applied plugin directive"
        );
        Ok(())
    }

    /// Snapshot of the surfaced state, for deterministic output.
    pub fn report(&self) -> PluginReport {
        PluginReport {
            name: self.name.clone(),
            enabled: self.enabled,
            label: self.label.as_ref().map(ToString::to_string),
            tool: self.tool.as_ref().map(ToString::to_string),
            implementation: self
                .implementation
                .as_ref()
                .map(|implementation| implementation.name().to_string()),
            options: self.active_options(),
        }
    }
}
