pub mod config;
pub mod directive;
pub mod error;
pub mod implementation;
pub mod intent;
pub mod keyword;
pub mod report;

pub use config::{PluginConfig, ScopeContext};
pub use directive::DirectiveLine;
pub use error::{DirectiveError, ErrorKind};
pub use implementation::Plugin;
pub use report::PluginReport;
