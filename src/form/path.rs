use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use super::error::FormError;

static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^\[\].]+)(?P<indices>(?:\[\d+\])*)$").expect("segment pattern is valid")
});
static INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("index pattern is valid"));

/// Qualified address of a field instance: `rules[0].domain`, `servers[1]`,
/// `labels[2]` (map entry), `upstream.port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(String),
    Index(usize),
}

impl FieldPath {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Field(name.into())],
        }
    }

    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.segments.push(Segment::Field(name.into()));
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Path of the containing list when this path ends in an index.
    pub fn split_index(&self) -> Option<(FieldPath, usize)> {
        match self.segments.split_last() {
            Some((Segment::Index(index), parent)) if !parent.is_empty() => Some((
                FieldPath {
                    segments: parent.to_vec(),
                },
                *index,
            )),
            _ => None,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, FormError> {
        let invalid = || FormError::InvalidPath(raw.to_string());
        let mut segments = Vec::new();
        for part in raw.split('.') {
            let captures = SEGMENT.captures(part.trim()).ok_or_else(invalid)?;
            segments.push(Segment::Field(captures["name"].to_string()));
            for index in INDEX.captures_iter(&captures["indices"]) {
                let index = index[1].parse::<usize>().map_err(|_| invalid())?;
                segments.push(Segment::Index(index));
            }
        }
        if segments.is_empty() {
            return Err(invalid());
        }
        Ok(Self { segments })
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if position == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
