use std::fmt::Debug;

/// A registered plugin behaviour bound to a [`PluginConfig`](super::PluginConfig).
///
/// The config only carries the handle; it never calls into it.
pub trait Plugin: Debug + Send + Sync {
    /// Registry name of the implementation.
    fn name(&self) -> &str;
}
