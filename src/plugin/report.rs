use serde::Serialize;
use std::fmt;

/// Serializable view of a [`PluginConfig`](super::PluginConfig).
///
/// Only surfaced state appears here: options are the active ones, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginReport {
    pub name: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
    pub options: Vec<String>,
}

impl fmt::Display for PluginReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.enabled { "enabled" } else { "disabled" };
        write!(f, "plugin {} [{status}]", self.name)?;
        if let Some(label) = &self.label {
            write!(f, " label={label}")?;
        }
        if let Some(tool) = &self.tool {
            write!(f, " tool={tool}")?;
        }
        if !self.options.is_empty() {
            write!(f, " options={}", self.options.join(","))?;
        }
        Ok(())
    }
}

/// TOML document for a set of reports, one `[[plugin]]` table each.
pub fn reports_to_toml(reports: &[PluginReport]) -> Result<String, toml::ser::Error> {
    #[derive(Serialize)]
    struct Document<'a> {
        plugin: &'a [PluginReport],
    }

    toml::to_string(&Document { plugin: reports })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> PluginReport {
        PluginReport {
            name: "go".to_string(),
            enabled: false,
            label: Some("//plugins:go".to_string()),
            tool: None,
            implementation: None,
            options: vec!["a".to_string(), "b".to_string()],
        }
    }

    #[test]
    fn text_line() {
        assert_eq!(
            report().to_string(),
            "plugin go [disabled] label=//plugins:go options=a,b"
        );
    }

    #[test]
    fn toml_document_skips_absent_labels() {
        let text = reports_to_toml(&[report()]).unwrap();
        assert!(text.contains("[[plugin]]"));
        assert!(text.contains("name = \"go\""));
        assert!(text.contains("label = \"//plugins:go\""));
        assert!(!text.contains("tool"));
        assert!(!text.contains("implementation"));
    }

    #[test]
    fn toml_document_names_bound_implementation() {
        let mut bound = report();
        bound.implementation = Some("builtin:go".to_string());

        let text = reports_to_toml(&[bound]).unwrap();
        assert!(text.contains("implementation = \"builtin:go\""));
    }
}
