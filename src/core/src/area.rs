use std::fmt;

/// Search-area shape selected by the `type` request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaKind {
    /// Spots within `radius` of the origin, tested with `ST_DWithin`.
    Circle,
    /// Spots whose distance to the origin is at most `radius`.
    ///
    /// Despite the tag this is not an envelope test: the predicate is the
    /// same inclusive radial filter as [`AreaKind::Circle`], evaluated with
    /// `ST_Distance` instead of the index-assisted `ST_DWithin`. Only the
    /// tie-break of the ranking differs.
    Square,
}

impl AreaKind {
    /// Resolves a wire tag. Matching is exact; unknown tags, including the
    /// empty string, are unsupported rather than erroneous.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "circle" => Some(AreaKind::Circle),
            "square" => Some(AreaKind::Square),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            AreaKind::Circle => "circle",
            AreaKind::Square => "square",
        }
    }
}

impl fmt::Display for AreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
