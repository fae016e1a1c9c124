use crate::blank_node::{is_pn_chars, is_pn_chars_u};
use std::fmt;

/// An owned pattern [variable](https://www.w3.org/TR/sparql11-query/#sparqlQueryVariables).
///
/// Variables are an extension of the RDF data model used by the readers in
/// pattern contexts.
///
/// The default string formatter is returning a SPARQL compatible representation:
/// ```
/// use rivrdf::Variable;
///
/// assert_eq!("?foo", Variable::new("foo")?.to_string());
/// # Result::<_,rivrdf::VariableNameParseError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Creates a variable name from a unique identifier.
    ///
    /// The variable name must be valid according to the SPARQL grammar.
    pub fn new(name: impl Into<String>) -> Result<Self, VariableNameParseError> {
        let name = name.into();
        validate_variable_identifier(&name)?;
        Ok(Self::new_unchecked(name))
    }

    /// Creates a variable name from a unique identifier without validation.
    ///
    /// It is the caller's responsibility to ensure that `name` is a valid variable name.
    ///
    /// [`Variable::new()`] is a safe version of this constructor and should be used for untrusted data.
    #[inline]
    pub fn new_unchecked(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.name
    }

    #[inline]
    pub fn as_ref(&self) -> VariableRef<'_> {
        VariableRef::new_unchecked(&self.name)
    }
}

impl fmt::Display for Variable {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_ref().fmt(f)
    }
}

/// A borrowed pattern [variable](https://www.w3.org/TR/sparql11-query/#sparqlQueryVariables).
///
/// The default string formatter is returning a SPARQL compatible representation:
/// ```
/// use rivrdf::VariableRef;
///
/// assert_eq!("?foo", VariableRef::new("foo")?.to_string());
/// # Result::<_,rivrdf::VariableNameParseError>::Ok(())
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Clone, Copy, Hash)]
pub struct VariableRef<'a> {
    name: &'a str,
}

impl<'a> VariableRef<'a> {
    /// Creates a variable name from a unique identifier.
    ///
    /// The variable name must be valid according to the SPARQL grammar.
    pub fn new(name: &'a str) -> Result<Self, VariableNameParseError> {
        validate_variable_identifier(name)?;
        Ok(Self::new_unchecked(name))
    }

    /// Creates a variable name from a unique identifier without validation.
    ///
    /// It is the caller's responsibility to ensure that `name` is a valid variable name.
    ///
    /// [`VariableRef::new()`] is a safe version of this constructor and should be used for untrusted data.
    #[inline]
    pub const fn new_unchecked(name: &'a str) -> Self {
        Self { name }
    }

    #[inline]
    pub const fn as_str(self) -> &'a str {
        self.name
    }

    #[inline]
    pub fn into_owned(self) -> Variable {
        Variable::new_unchecked(self.name)
    }
}

impl fmt::Display for VariableRef<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

impl From<VariableRef<'_>> for Variable {
    #[inline]
    fn from(variable: VariableRef<'_>) -> Self {
        variable.into_owned()
    }
}

impl<'a> From<&'a Variable> for VariableRef<'a> {
    #[inline]
    fn from(variable: &'a Variable) -> Self {
        variable.as_ref()
    }
}

impl PartialEq<Variable> for VariableRef<'_> {
    #[inline]
    fn eq(&self, other: &Variable) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<VariableRef<'_>> for Variable {
    #[inline]
    fn eq(&self, other: &VariableRef<'_>) -> bool {
        self.as_str() == other.as_str()
    }
}

// [166]  VARNAME  ::=  (PN_CHARS_U | [0-9]) (PN_CHARS_U | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040])*
fn validate_variable_identifier(id: &str) -> Result<(), VariableNameParseError> {
    let mut chars = id.chars();
    let front = chars.next().ok_or(VariableNameParseError)?;
    if !is_pn_chars_u(front) && !front.is_ascii_digit() {
        return Err(VariableNameParseError);
    }
    for c in chars {
        // '-' and '.' are excluded from variable names
        if !(is_pn_chars(c) && c != '-') {
            return Err(VariableNameParseError);
        }
    }
    Ok(())
}

/// An error raised during [`Variable`] name validation.
#[derive(Debug, thiserror::Error)]
#[error("the variable name is invalid")]
pub struct VariableNameParseError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validation() {
        Variable::new("foo").unwrap();
        Variable::new("42bar").unwrap();
        Variable::new("").unwrap_err();
        Variable::new("a-b").unwrap_err();
        Variable::new("a b").unwrap_err();
    }
}
