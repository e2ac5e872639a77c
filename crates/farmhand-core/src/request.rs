//! Build requests and their route encoding.
//!
//! A request is a list of `(kind, id)` pairs. The route form joins them with
//! `+`, each written as the kind's prefix letter followed by the id, e.g.
//! `w1203+a87+c14`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FarmhandError, Result};
use crate::types::{CatalogKind, ItemId};

/// A single requested item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildRequest {
    pub kind: CatalogKind,
    pub id: ItemId,
}

impl BuildRequest {
    pub fn new(kind: CatalogKind, id: ItemId) -> Self {
        Self { kind, id }
    }

    pub fn weapon(id: ItemId) -> Self {
        Self::new(CatalogKind::Weapon, id)
    }

    pub fn armor(id: ItemId) -> Self {
        Self::new(CatalogKind::Armor, id)
    }

    pub fn charm(id: ItemId) -> Self {
        Self::new(CatalogKind::Charm, id)
    }
}

impl fmt::Display for BuildRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.route_prefix(), self.id)
    }
}

impl FromStr for BuildRequest {
    type Err = FarmhandError;

    fn from_str(segment: &str) -> Result<Self> {
        let mut chars = segment.chars();
        let prefix = chars
            .next()
            .ok_or_else(|| FarmhandError::InvalidRequest("empty route segment".to_string()))?;

        let kind = CatalogKind::from_route_prefix(prefix).ok_or_else(|| {
            FarmhandError::InvalidRequest(format!("unknown item prefix '{}' in '{}'", prefix, segment))
        })?;

        let id = chars.as_str().parse::<ItemId>().map_err(|_| {
            FarmhandError::InvalidRequest(format!("invalid item id in '{}'", segment))
        })?;

        Ok(Self { kind, id })
    }
}

/// Parse a route such as `w12+a3+c7`. An empty route is an empty request.
pub fn parse_route(route: &str) -> Result<Vec<BuildRequest>> {
    let route = route.trim();
    if route.is_empty() {
        return Ok(Vec::new());
    }

    route.split('+').map(str::parse).collect()
}

/// Encode requests into route form.
pub fn encode_route(requests: &[BuildRequest]) -> String {
    requests
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route() {
        let requests = parse_route("w12+a3+c7").unwrap();
        assert_eq!(
            requests,
            vec![
                BuildRequest::weapon(12),
                BuildRequest::armor(3),
                BuildRequest::charm(7),
            ]
        );
        assert_eq!(encode_route(&requests), "w12+a3+c7");
    }

    #[test]
    fn test_parse_route_keeps_duplicates() {
        let requests = parse_route("a3+a3").unwrap();
        assert_eq!(requests.len(), 2);
    }

    #[test]
    fn test_parse_empty_route() {
        assert!(parse_route("").unwrap().is_empty());
        assert_eq!(encode_route(&[]), "");
    }

    #[test]
    fn test_parse_route_rejects_bad_segments() {
        assert!(matches!(parse_route("x12"), Err(FarmhandError::InvalidRequest(_))));
        assert!(matches!(parse_route("w"), Err(FarmhandError::InvalidRequest(_))));
        assert!(matches!(parse_route("wabc"), Err(FarmhandError::InvalidRequest(_))));
        assert!(matches!(parse_route("w1++a2"), Err(FarmhandError::InvalidRequest(_))));
        assert!(matches!(parse_route("w-4"), Err(FarmhandError::InvalidRequest(_))));
    }
}
