//! Locations inside a candidate value

use std::fmt;

/// Borrowed path segment used while walking a value
#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

/// One step of an [`InstancePath`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Structural path to a value, rendered as `incident.session.alerts[0].severity`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancePath(Vec<PathSegment>);

impl InstancePath {
    #[must_use]
    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    #[must_use]
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// RFC 6901 JSON Pointer form, e.g. `/incident/session/alerts/0`
    #[must_use]
    #[inline]
    pub fn to_pointer(&self) -> String {
        self.0
            .iter()
            .map(|segment| match segment {
                PathSegment::Key(key) => {
                    format!("/{}", key.replace('~', "~0").replace('/', "~1"))
                }
                PathSegment::Index(index) => format!("/{index}"),
            })
            .collect()
    }
}

impl InstancePath {
    pub(crate) fn from_segments(segments: &[Segment<'_>]) -> Self {
        Self(
            segments
                .iter()
                .map(|segment| match *segment {
                    Segment::Key(key) => PathSegment::Key(key.to_owned()),
                    Segment::Index(index) => PathSegment::Index(index),
                })
                .collect(),
        )
    }
}

impl FromIterator<PathSegment> for InstancePath {
    #[inline]
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Keys that would be ambiguous in dotted form are rendered as `["..."]`
fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(['.', '[', ']', '"', ' '])
}

impl fmt::Display for InstancePath {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (position, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if is_plain_key(key) => {
                    if position > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
