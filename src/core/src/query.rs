use std::sync::LazyLock;

use crate::area::AreaKind;
use crate::rank::NEAR_THRESHOLD;
use crate::spot::SearchArea;

/// Table holding the spot population. Managed outside this service.
pub(crate) const SPOT_TABLE: &str = r#""MY_TABLE""#;

/// Origin point built from the `$1` (x = longitude) and `$2` (y = latitude) binds.
const ORIGIN: &str = "ST_SetSRID(ST_MakePoint($1, $2), 4326)";

static CIRCLE_SQL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "WITH spots_with_distance AS ( \
            SELECT id::text AS id, name, website, description, rating::float8 AS rating, \
                ST_AsText(coordinates) AS coordinates, \
                ST_Distance(coordinates, {ORIGIN}) AS distance \
            FROM {SPOT_TABLE} \
            WHERE ST_DWithin(coordinates, {ORIGIN}, $3) \
        ) \
        SELECT id, name, website, description, rating, coordinates, distance \
        FROM spots_with_distance \
        ORDER BY \
            CASE WHEN distance < {NEAR_THRESHOLD} THEN rating ELSE distance END, \
            CASE WHEN distance < {NEAR_THRESHOLD} THEN NULL ELSE rating END NULLS LAST"
    )
});

static SQUARE_SQL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT id, name, website, description, rating, coordinates, distance \
        FROM ( \
            SELECT id::text AS id, name, website, description, rating::float8 AS rating, \
                ST_AsText(coordinates) AS coordinates, \
                ST_Distance(coordinates, {ORIGIN}) AS distance \
            FROM {SPOT_TABLE} \
            WHERE ST_Distance(coordinates, {ORIGIN}) <= $3 \
        ) AS spots_with_distance \
        ORDER BY \
            CASE WHEN distance < {NEAR_THRESHOLD} THEN rating ELSE distance END, \
            rating NULLS LAST"
    )
});

/// A ranked spatial query ready to hand to a [`SpotStore`](crate::SpotStore):
/// SQL text plus positional binds `($1, $2, $3) = (longitude, latitude, radius)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpotQuery {
    kind: AreaKind,
    area: SearchArea,
}

impl SpotQuery {
    /// Returns `None` for unsupported area tags; no query is to be run then.
    pub fn build(area_tag: &str, area: SearchArea) -> Option<Self> {
        AreaKind::from_tag(area_tag).map(|kind| Self::for_kind(kind, area))
    }

    pub fn for_kind(kind: AreaKind, area: SearchArea) -> Self {
        Self { kind, area }
    }

    pub fn kind(&self) -> AreaKind {
        self.kind
    }

    pub fn area(&self) -> &SearchArea {
        &self.area
    }

    pub fn sql(&self) -> &'static str {
        match self.kind {
            AreaKind::Circle => CIRCLE_SQL.as_str(),
            AreaKind::Square => SQUARE_SQL.as_str(),
        }
    }

    /// Bind values in placeholder order. Longitude comes first, matching
    /// `ST_MakePoint(x, y)`.
    pub fn params(&self) -> [f64; 3] {
        [self.area.longitude, self.area.latitude, self.area.radius]
    }
}
