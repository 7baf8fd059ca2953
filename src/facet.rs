use crate::error::{Result, RinthError};
use std::fmt;
use std::str::FromStr;

/// The filter dimensions the search index supports server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetType {
    Categories,
    Versions,
    License,
    ProjectType,
}

impl FacetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetType::Categories => "categories",
            FacetType::Versions => "versions",
            FacetType::License => "license",
            FacetType::ProjectType => "project_type",
        }
    }
}

impl FromStr for FacetType {
    type Err = RinthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "categories" => Ok(FacetType::Categories),
            "versions" => Ok(FacetType::Versions),
            "license" => Ok(FacetType::License),
            "project_type" => Ok(FacetType::ProjectType),
            _ => Err(RinthError::InvalidArgument(format!(
                "Unknown facet type: {s}"
            ))),
        }
    }
}

impl fmt::Display for FacetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One search filter criterion. Immutable once constructed; the value is
/// guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Facet {
    facet_type: FacetType,
    value: String,
}

impl Facet {
    pub fn new(facet_type: FacetType, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(RinthError::InvalidArgument(
                "Facet value must not be empty".to_string(),
            ));
        }
        Ok(Self { facet_type, value })
    }

    pub fn facet_type(&self) -> FacetType {
        self.facet_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The quoted wire token, e.g. `"categories:forge"`. The quotes are part
    /// of the token; groups of tokens are joined verbatim into the `facets`
    /// query parameter.
    pub fn to_query_token(&self) -> String {
        format!("\"{}:{}\"", self.facet_type, self.value)
    }

    /// Parse a `type:value` token, with or without surrounding quotes.
    /// Returns `None` for anything that does not match the expected shape;
    /// a malformed token is a recoverable no-match, not an error.
    pub fn parse(input: &str) -> Option<Facet> {
        let token = input.trim();
        let token = token
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(token);
        let (key, value) = token.split_once(':')?;
        let facet_type = key.parse().ok()?;
        Facet::new(facet_type, value).ok()
    }

    pub fn category(value: impl Into<String>) -> Result<Facet> {
        Facet::new(FacetType::Categories, value)
    }

    pub fn categories<I, S>(values: I) -> Result<Vec<Facet>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Facet::category).collect()
    }

    pub fn version(value: impl Into<String>) -> Result<Facet> {
        Facet::new(FacetType::Versions, value)
    }

    pub fn versions<I, S>(values: I) -> Result<Vec<Facet>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Facet::version).collect()
    }

    pub fn license(value: impl Into<String>) -> Result<Facet> {
        Facet::new(FacetType::License, value)
    }

    pub fn licenses<I, S>(values: I) -> Result<Vec<Facet>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Facet::license).collect()
    }

    pub fn project_type(value: impl Into<String>) -> Result<Facet> {
        Facet::new(FacetType::ProjectType, value)
    }

    pub fn project_types<I, S>(values: I) -> Result<Vec<Facet>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Facet::project_type).collect()
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.facet_type, self.value)
    }
}

/// AND-of-ORs filter structure: the outer groups are AND-combined, facets
/// within one group are OR-combined. Group order is preserved so repeated
/// requests serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetGroup(Vec<Vec<Facet>>);

impl FacetGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn groups(&self) -> &[Vec<Facet>] {
        &self.0
    }

    /// AND a group of alternatives onto the filter. Empty groups are ignored;
    /// they would serialize to `[]` which the search endpoint rejects.
    pub fn and(mut self, any_of: Vec<Facet>) -> Self {
        if !any_of.is_empty() {
            self.0.push(any_of);
        }
        self
    }

    /// AND a single facet onto the filter.
    pub fn and_single(self, facet: Facet) -> Self {
        self.and(vec![facet])
    }

    /// The JSON array-of-arrays of quoted tokens sent as the `facets` query
    /// parameter, e.g. `[["categories:forge","categories:fabric"],["versions:1.20.1"]]`.
    pub fn to_query_value(&self) -> String {
        let groups: Vec<String> = self
            .0
            .iter()
            .map(|group| {
                let tokens: Vec<String> = group.iter().map(Facet::to_query_token).collect();
                format!("[{}]", tokens.join(","))
            })
            .collect();
        format!("[{}]", groups.join(","))
    }
}

impl From<Vec<Vec<Facet>>> for FacetGroup {
    fn from(groups: Vec<Vec<Facet>>) -> Self {
        groups
            .into_iter()
            .fold(FacetGroup::new(), |acc, group| acc.and(group))
    }
}
