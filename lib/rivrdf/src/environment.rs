use crate::named_node::NamedNode;
use oxiri::{Iri, IriParseError};
use std::fmt::Write;
use std::io;
use std::path::Path;

/// The namespace state shared by readers and writers: an optional base IRI
/// plus an ordered prefix table.
///
/// The table keeps prefixes in declaration order and [`Environment::qualify`]
/// returns the first match, so the abbreviations chosen by a writer are
/// deterministic.
///
/// ```
/// use rivrdf::Environment;
///
/// let mut env = Environment::new();
/// env.set_base("http://example.com/dir/")?;
/// env.set_prefix("ex", "ns#")?; // resolved against the base
/// assert_eq!(
///     env.expand("ex:foo")?,
///     ("http://example.com/dir/ns#", "foo")
/// );
/// assert_eq!(
///     env.qualify("http://example.com/dir/ns#foo"),
///     Some(("ex", "foo"))
/// );
/// # Result::<_,rivrdf::EnvironmentError>::Ok(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    base: Option<Iri<String>>,
    prefixes: Vec<(String, NamedNode)>,
}

impl Environment {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current base IRI, if any.
    #[inline]
    pub fn base(&self) -> Option<&str> {
        self.base.as_ref().map(Iri::as_str)
    }

    /// Sets the base IRI.
    ///
    /// A relative reference is resolved against the current base and fails if
    /// there is none. The empty string clears the base. The installed base is
    /// always absolute.
    pub fn set_base(&mut self, base: &str) -> Result<(), EnvironmentError> {
        self.base = if base.is_empty() {
            None
        } else if let Some(current) = &self.base {
            Some(current.resolve(base)?)
        } else {
            Some(Iri::parse(base.to_owned())?)
        };
        Ok(())
    }

    /// Sets the base IRI from a filesystem path, converted to a `file:` IRI.
    ///
    /// A relative path is resolved against the current directory. A trailing
    /// path separator is kept, so directory paths yield bases that relative
    /// references resolve under.
    pub fn set_base_path(&mut self, path: impl AsRef<Path>) -> Result<(), EnvironmentError> {
        let uri = file_uri_from_path(path.as_ref())?;
        self.base = Some(Iri::parse(uri)?);
        Ok(())
    }

    /// Declares a prefix.
    ///
    /// A relative IRI value is resolved against the current base and fails if
    /// there is none. Redeclaring an existing name overwrites its value but
    /// keeps its position in the declaration order.
    pub fn set_prefix(
        &mut self,
        name: impl Into<String>,
        iri: &str,
    ) -> Result<(), EnvironmentError> {
        let iri = match Iri::parse(iri.to_owned()) {
            Ok(iri) => iri,
            Err(e) => match &self.base {
                Some(base) => base.resolve(iri)?,
                None => return Err(e.into()),
            },
        };
        let name = name.into();
        let iri = NamedNode::new_from_iri(iri);
        if let Some(entry) = self.prefixes.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = iri;
        } else {
            self.prefixes.push((name, iri));
        }
        Ok(())
    }

    /// Removes a prefix declaration. Unknown names are ignored.
    pub fn unset_prefix(&mut self, name: &str) {
        self.prefixes.retain(|(n, _)| n != name);
    }

    /// The declared prefixes as (name, IRI) pairs, in declaration order.
    #[inline]
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(name, iri)| (name.as_str(), iri.as_str()))
    }

    /// Splits an absolute IRI into a declared prefix name and a suffix.
    ///
    /// The first declared prefix whose IRI is a prefix of the input wins.
    /// The suffix is returned raw; writers must check that it is usable as a
    /// prefixed-name local part.
    pub fn qualify<'a>(&'a self, iri: &'a str) -> Option<(&'a str, &'a str)> {
        self.prefixes.iter().find_map(|(name, prefix_iri)| {
            iri.strip_prefix(prefix_iri.as_str())
                .map(|suffix| (name.as_str(), suffix))
        })
    }

    /// Expands a CURIE of the form `prefix:suffix` into its
    /// `(prefix IRI, suffix)` parts, without copying.
    pub fn expand<'a>(&'a self, curie: &'a str) -> Result<(&'a str, &'a str), EnvironmentError> {
        let (name, suffix) = curie
            .split_once(':')
            .ok_or_else(|| EnvironmentError::MissingColon {
                curie: curie.to_owned(),
            })?;
        let (_, iri) = self
            .prefixes
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| EnvironmentError::UnknownPrefix {
                prefix: name.to_owned(),
            })?;
        Ok((iri.as_str(), suffix))
    }

    /// Resolves a possibly-relative IRI reference against the base.
    ///
    /// Without a base, the reference must be absolute.
    pub fn resolve(&self, reference: &str) -> Result<NamedNode, IriParseError> {
        Ok(NamedNode::new_from_iri(match &self.base {
            Some(base) => base.resolve(reference)?,
            None => Iri::parse(reference.to_owned())?,
        }))
    }

    /// Resolves a possibly-relative IRI reference against the base, skipping
    /// validation.
    ///
    /// The result is only meaningful when `reference` is a valid IRI
    /// reference.
    pub fn resolve_unchecked(&self, reference: &str) -> NamedNode {
        NamedNode::new_from_iri(match &self.base {
            Some(base) => base.resolve_unchecked(reference),
            None => Iri::parse_unchecked(reference.to_owned()),
        })
    }
}

/// An error raised by [`Environment`] operations.
#[derive(Debug, thiserror::Error)]
pub enum EnvironmentError {
    /// The CURIE handed to [`Environment::expand`] contains no colon.
    #[error("the CURIE {curie:?} contains no ':'")]
    MissingColon { curie: String },
    /// The CURIE prefix is not declared.
    #[error("the prefix {prefix}: has not been declared")]
    UnknownPrefix { prefix: String },
    /// The IRI is invalid, or relative without a base to resolve it against.
    #[error(transparent)]
    InvalidIri(#[from] IriParseError),
    /// The current directory could not be read while resolving a relative path.
    #[error("unable to resolve the current directory: {0}")]
    CurrentDir(#[from] io::Error),
}

fn file_uri_from_path(path: &Path) -> Result<String, EnvironmentError> {
    let path = path.to_string_lossy().replace('\\', "/");
    let mut uri = String::with_capacity(path.len() + 8);
    uri.push_str("file://");
    if path_has_drive_letter(&path) {
        // Windows-style C:/dir paths get an empty authority
        uri.push('/');
        encode_path(&path, &mut uri);
    } else if let Some(absolute) = path.strip_prefix('/') {
        uri.push('/');
        encode_path(absolute, &mut uri);
    } else {
        let current_dir = std::env::current_dir()?;
        let mut current_dir = current_dir.to_string_lossy().replace('\\', "/");
        if !current_dir.ends_with('/') {
            current_dir.push('/');
        }
        if !path_has_drive_letter(&current_dir) {
            current_dir = current_dir.trim_start_matches('/').to_owned();
        }
        uri.push('/');
        encode_path(&current_dir, &mut uri);
        encode_path(&path, &mut uri);
    }
    Ok(uri)
}

fn path_has_drive_letter(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn encode_path(path: &str, output: &mut String) {
    for byte in path.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' | b':' => {
                output.push(char::from(byte));
            }
            _ => {
                write!(output, "%{byte:02X}").expect("writing to a String cannot fail");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_base_requires_base() {
        let mut env = Environment::new();
        env.set_base("dir/").unwrap_err();
        env.set_base("http://example.com/a/b").unwrap();
        env.set_base("dir/").unwrap();
        assert_eq!(env.base(), Some("http://example.com/a/dir/"));
        env.set_base("").unwrap();
        assert_eq!(env.base(), None);
    }

    #[test]
    fn prefix_overwrite_keeps_order() {
        let mut env = Environment::new();
        env.set_prefix("a", "http://example.com/a#").unwrap();
        env.set_prefix("b", "http://example.com/b#").unwrap();
        env.set_prefix("a", "http://example.com/a2#").unwrap();
        assert_eq!(
            env.prefixes().collect::<Vec<_>>(),
            [
                ("a", "http://example.com/a2#"),
                ("b", "http://example.com/b#")
            ]
        );
    }

    #[test]
    fn qualify_first_declared_wins() {
        let mut env = Environment::new();
        env.set_prefix("ns", "http://example.com/").unwrap();
        env.set_prefix("long", "http://example.com/dir/").unwrap();
        assert_eq!(
            env.qualify("http://example.com/dir/x"),
            Some(("ns", "dir/x"))
        );
        assert_eq!(env.qualify("http://other.example/x"), None);
    }

    #[test]
    fn expand_failures() {
        let mut env = Environment::new();
        env.set_prefix("ex", "http://example.com/").unwrap();
        assert!(matches!(
            env.expand("nocolon"),
            Err(EnvironmentError::MissingColon { .. })
        ));
        assert!(matches!(
            env.expand("nope:x"),
            Err(EnvironmentError::UnknownPrefix { .. })
        ));
        assert_eq!(env.expand("ex:x").unwrap(), ("http://example.com/", "x"));
    }

    #[test]
    fn relative_prefix_requires_base() {
        let mut env = Environment::new();
        env.set_prefix("ex", "ns#").unwrap_err();
        env.set_base("http://example.com/dir/").unwrap();
        env.set_prefix("ex", "ns#").unwrap();
        assert_eq!(
            env.prefixes().collect::<Vec<_>>(),
            [("ex", "http://example.com/dir/ns#")]
        );
    }

    #[test]
    fn file_base_from_absolute_path() {
        let mut env = Environment::new();
        env.set_base_path("/tmp/some dir/").unwrap();
        assert_eq!(env.base(), Some("file:///tmp/some%20dir/"));
    }

    #[test]
    fn file_base_from_windows_path() {
        let mut env = Environment::new();
        env.set_base_path("C:\\data\\graphs\\").unwrap();
        assert_eq!(env.base(), Some("file:///C:/data/graphs/"));
    }

    #[test]
    fn resolve_against_base() {
        let mut env = Environment::new();
        env.resolve("x").unwrap_err();
        env.set_base("http://example.com/dir/").unwrap();
        assert_eq!(env.resolve("x").unwrap(), "http://example.com/dir/x");
    }
}
