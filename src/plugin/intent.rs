/// A directive parameter split into its base keyword and polarity.
///
/// A leading `-` marks the parameter as negative ("remove/unset"); a leading
/// `+` is an explicit positive marker. Both are stripped from `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent<'a> {
    pub value: &'a str,
    pub negative: bool,
}

impl<'a> Intent<'a> {
    pub fn parse(param: &'a str) -> Self {
        let param = param.trim();
        if let Some(value) = param.strip_prefix('-') {
            return Self {
                value,
                negative: true,
            };
        }

        Self {
            value: param.strip_prefix('+').unwrap_or(param),
            negative: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Intent;

    #[test]
    fn plain_parameter_is_positive() {
        assert_eq!(
            Intent::parse("option"),
            Intent {
                value: "option",
                negative: false
            }
        );
    }

    #[test]
    fn markers_are_stripped() {
        assert_eq!(
            Intent::parse("-option"),
            Intent {
                value: "option",
                negative: true
            }
        );
        assert_eq!(
            Intent::parse("+option"),
            Intent {
                value: "option",
                negative: false
            }
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(Intent::parse("  -label ").value, "label");
        assert!(Intent::parse("  -label ").negative);
    }

    #[test]
    fn only_one_marker_is_consumed() {
        assert_eq!(Intent::parse("--option").value, "-option");
    }
}
