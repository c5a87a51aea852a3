//! Overpass QL construction.

use std::fmt;

use crate::OverpassConfig;

/// Default `admin_level` for the search area; 4 is a U.S. state.
pub const DEFAULT_ADMIN_LEVEL: u8 = 4;

/// Default server-side query timeout in seconds.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 60;

/// A skatepark query scoped to one named administrative area.
///
/// The rendered query matches both dedicated skateparks
/// (`leisure=skatepark`) and skateboard pitches
/// (`leisure=pitch` + `sport=skateboard`) as nodes and ways, and asks the
/// server for a centroid on every way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassQuery {
    region: String,
    admin_level: u8,
    server_timeout: u64,
}

impl OverpassQuery {
    /// Creates a skatepark query for the given region name.
    pub fn skateparks(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            admin_level: DEFAULT_ADMIN_LEVEL,
            server_timeout: DEFAULT_QUERY_TIMEOUT_SECS,
        }
    }

    /// Applies the query-related settings of a client configuration.
    #[must_use]
    pub fn with_config(self, config: &OverpassConfig) -> Self {
        self.with_admin_level(config.admin_level)
            .with_server_timeout(config.query_timeout)
    }

    /// Sets the `admin_level` the search area must carry.
    #[must_use]
    pub fn with_admin_level(mut self, admin_level: u8) -> Self {
        self.admin_level = admin_level;
        self
    }

    /// Sets the `[timeout:..]` setting sent to the server.
    #[must_use]
    pub fn with_server_timeout(mut self, seconds: u64) -> Self {
        self.server_timeout = seconds;
        self
    }

    /// Returns the region this query is scoped to.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the `admin_level` of the search area.
    pub fn admin_level(&self) -> u8 {
        self.admin_level
    }

    /// Returns the server-side timeout in seconds.
    pub fn server_timeout(&self) -> u64 {
        self.server_timeout
    }

    /// Renders the query as Overpass QL.
    pub fn to_ql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OverpassQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let region = escape_literal(&self.region);

        writeln!(f, "[out:json][timeout:{}];", self.server_timeout)?;
        writeln!(
            f,
            "area[\"name\"=\"{region}\"][\"admin_level\"=\"{}\"]->.searchArea;",
            self.admin_level
        )?;
        writeln!(f, "(")?;
        for element in ["node", "way"] {
            writeln!(f, "  {element}[\"leisure\"=\"skatepark\"](area.searchArea);")?;
        }
        for element in ["node", "way"] {
            writeln!(
                f,
                "  {element}[\"leisure\"=\"pitch\"][\"sport\"=\"skateboard\"](area.searchArea);"
            )?;
        }
        writeln!(f, ");")?;
        write!(f, "out center;")
    }
}

/// Escapes a value for use inside a double-quoted Overpass string literal.
fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_state_query() {
        let query = OverpassQuery::skateparks("New Mexico");

        let expected = "[out:json][timeout:60];\n\
            area[\"name\"=\"New Mexico\"][\"admin_level\"=\"4\"]->.searchArea;\n\
            (\n\
            \x20 node[\"leisure\"=\"skatepark\"](area.searchArea);\n\
            \x20 way[\"leisure\"=\"skatepark\"](area.searchArea);\n\
            \x20 node[\"leisure\"=\"pitch\"][\"sport\"=\"skateboard\"](area.searchArea);\n\
            \x20 way[\"leisure\"=\"pitch\"][\"sport\"=\"skateboard\"](area.searchArea);\n\
            );\n\
            out center;";

        assert_eq!(query.to_ql(), expected);
    }

    #[test]
    fn test_builder_overrides() {
        let query = OverpassQuery::skateparks("Bavaria")
            .with_admin_level(4)
            .with_server_timeout(180);

        assert_eq!(query.region(), "Bavaria");
        assert_eq!(query.server_timeout(), 180);
        assert!(query.to_ql().starts_with("[out:json][timeout:180];"));
    }

    #[test]
    fn test_with_config() {
        let config = OverpassConfig::default()
            .with_query_timeout(25)
            .with_admin_level(6);
        let query = OverpassQuery::skateparks("Multnomah County").with_config(&config);

        assert_eq!(query.admin_level(), 6);
        assert_eq!(query.server_timeout(), 25);
        assert!(query.to_ql().contains("[\"admin_level\"=\"6\"]"));
    }

    #[test]
    fn test_region_is_escaped() {
        let query = OverpassQuery::skateparks(r#"Evil"] ; out; ["x"#);
        let ql = query.to_ql();

        assert!(ql.contains(r#"area["name"="Evil\"] ; out; [\"x"]"#));
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal("Hawaii"), "Hawaii");
        assert_eq!(escape_literal(r"a\b"), r"a\\b");
        assert_eq!(escape_literal("a\"b"), "a\\\"b");
    }
}
