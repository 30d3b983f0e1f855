//! Per-plugin configuration records driven by build-file directives.
//!
//! A [`PluginConfig`] starts with defaults, is updated in place by
//! `proto_plugin` directives found while scanning a scope, and is
//! [duplicated](PluginConfig::duplicate) to seed child scopes.

pub mod model;
pub mod plugin;

pub use model::label::{LabelError, ResourceLabel};
pub use plugin::{DirectiveError, DirectiveLine, ErrorKind, Plugin, PluginConfig, ScopeContext};
