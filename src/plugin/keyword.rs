use std::fmt;
use std::str::FromStr;

/// Base keywords accepted by [`PluginConfig::apply_directive`](super::PluginConfig::apply_directive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `enabled` or `enable`: boolean literal.
    Enabled,
    /// `label`: provider of the plugin metadata.
    Label,
    /// `tool`: executable resource.
    Tool,
    /// `option`: add (or, negated, remove) an option string.
    Option,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Enabled => "enabled",
            Keyword::Label => "label",
            Keyword::Tool => "tool",
            Keyword::Option => "option",
        }
    }
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" | "enable" => Ok(Keyword::Enabled),
            "label" => Ok(Keyword::Label),
            "tool" => Ok(Keyword::Tool),
            "option" => Ok(Keyword::Option),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
