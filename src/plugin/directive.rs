use crate::model::config::DirectiveConfig;
use crate::plugin::config::{PluginConfig, ScopeContext};
use crate::plugin::error::DirectiveError;

/// A plugin directive split out of a build-file comment.
///
/// `# gazelle:proto_plugin go_grpc option paths=source_relative` yields
/// name `go_grpc`, param `option` and value `paths=source_relative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveLine<'a> {
    /// Directive text with the comment marker and prefix removed.
    pub text: &'a str,
    pub name: &'a str,
    pub param: &'a str,
    /// Remainder of the line after `param`; may contain spaces.
    pub value: &'a str,
}

impl<'a> DirectiveLine<'a> {
    /// Returns `Ok(None)` for lines that are not plugin directives.
    pub fn parse(
        line: &'a str,
        settings: &DirectiveConfig,
    ) -> Result<Option<Self>, DirectiveError> {
        let Some(comment) = line.trim().strip_prefix('#') else {
            return Ok(None);
        };
        let Some(text) = comment.trim_start().strip_prefix(settings.prefix.as_str()) else {
            return Ok(None);
        };
        let text = text.trim();

        let (key, args) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
        if key != settings.keyword {
            return Ok(None);
        }

        let malformed = || DirectiveError::Malformed {
            directive: text.to_string(),
        };
        let (name, rest) = args
            .trim_start()
            .split_once(char::is_whitespace)
            .ok_or_else(malformed)?;
        let (param, value) = rest
            .trim_start()
            .split_once(char::is_whitespace)
            .ok_or_else(malformed)?;
        let value = value.trim();
        if value.is_empty() {
            return Err(malformed());
        }

        Ok(Some(Self {
            text,
            name,
            param,
            value,
        }))
    }

    pub fn apply_to(
        &self,
        config: &mut PluginConfig,
        scope: &ScopeContext,
    ) -> Result<(), DirectiveError> {
        config.apply_directive(scope, self.text, self.param, self.value)
    }
}
