use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.~+-]*$").expect("valid repo regex"));
static PKG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9/._@+=,~-]*$").expect("valid package regex"));
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"^[A-Za-z0-9!%@^_"#$&'()*+,;<=>?\[\]{|}~/.-]+$"##).expect("valid name regex")
});

/// Errors produced while parsing a [`ResourceLabel`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("label parse error: empty label")]
    Empty,

    #[error("label parse error: invalid repository name {repo:?} in {input:?}")]
    InvalidRepo { input: String, repo: String },

    #[error("label parse error: invalid package {pkg:?} in {input:?}")]
    InvalidPackage { input: String, pkg: String },

    #[error("label parse error: empty target name in {input:?}")]
    EmptyName { input: String },

    #[error("label parse error: invalid target name {name:?} in {input:?}")]
    InvalidName { input: String, name: String },
}

/// A structured reference to a build target: `@repo//pkg:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceLabel {
    pub repo: Option<String>,
    pub pkg: String,
    pub name: String,
    /// Set when the text had no `//`, e.g. `:name` or `pkg:name`.
    pub relative: bool,
}

impl ResourceLabel {
    /// Parse the textual form of a label.
    ///
    /// Accepts `@repo//pkg:name`, `@repo//pkg`, `@repo`, `//pkg:name`,
    /// `//pkg`, `:name`, `pkg:name` and a bare `name`. When the name is
    /// omitted it defaults to the last package segment (or the repository
    /// name for a bare `@repo`).
    pub fn parse(input: &str) -> Result<Self, LabelError> {
        if input.is_empty() {
            return Err(LabelError::Empty);
        }

        let mut rest = input;
        let mut repo = None;
        let mut relative = true;

        // `@@repo` is the canonical spelling; keep a single `@`.
        if rest.starts_with("@@") {
            rest = &rest[1..];
        }

        if let Some(after_at) = rest.strip_prefix('@') {
            relative = false;
            let (repo_name, tail) = match after_at.find("//") {
                Some(end) => (&after_at[..end], &after_at[end..]),
                None => (after_at, ""),
            };
            if !REPO_RE.is_match(repo_name) {
                return Err(LabelError::InvalidRepo {
                    input: input.to_string(),
                    repo: repo_name.to_string(),
                });
            }
            repo = Some(repo_name.to_string());
            if tail.is_empty() {
                return Ok(Self {
                    repo,
                    pkg: String::new(),
                    name: repo_name.to_string(),
                    relative,
                });
            }
            rest = tail;
        }

        let (pkg, name) = if let Some(after_slashes) = rest.strip_prefix("//") {
            relative = false;
            match after_slashes.split_once(':') {
                Some((pkg, name)) => (pkg, Some(name)),
                None => (after_slashes, None),
            }
        } else if let Some(name) = rest.strip_prefix(':') {
            ("", Some(name))
        } else {
            match rest.split_once(':') {
                Some((pkg, name)) => (pkg, Some(name)),
                None => ("", Some(rest)),
            }
        };

        validate_package(input, pkg)?;

        let name = match name {
            Some(name) => name,
            None => pkg.rsplit('/').next().unwrap_or_default(),
        };
        validate_name(input, name)?;

        Ok(Self {
            repo,
            pkg: pkg.to_string(),
            name: name.to_string(),
            relative,
        })
    }
}

fn validate_package(input: &str, pkg: &str) -> Result<(), LabelError> {
    let invalid = || LabelError::InvalidPackage {
        input: input.to_string(),
        pkg: pkg.to_string(),
    };

    if pkg.is_empty() {
        return Ok(());
    }
    if !PKG_RE.is_match(pkg) || pkg.starts_with('/') || pkg.ends_with('/') {
        return Err(invalid());
    }
    if pkg
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(invalid());
    }
    Ok(())
}

fn validate_name(input: &str, name: &str) -> Result<(), LabelError> {
    if name.is_empty() {
        return Err(LabelError::EmptyName {
            input: input.to_string(),
        });
    }

    let bad_segment = name
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if !NAME_RE.is_match(name) || bad_segment {
        return Err(LabelError::InvalidName {
            input: input.to_string(),
            name: name.to_string(),
        });
    }
    Ok(())
}

impl FromStr for ResourceLabel {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative {
            return write!(f, "{}:{}", self.pkg, self.name);
        }

        if let Some(repo) = &self.repo {
            write!(f, "@{repo}")?;
        }
        let last_segment = self.pkg.rsplit('/').next().unwrap_or_default();
        if !self.pkg.is_empty() && last_segment == self.name {
            write!(f, "//{}", self.pkg)
        } else {
            write!(f, "//{}:{}", self.pkg, self.name)
        }
    }
}
