//! Waypoint tables, categories, and the derived exit-waypoint index.
//!
//! Waypoints are externally supplied, read-only records partitioned into a
//! contiguous index range per deployment region. Exits (jetties, ladders,
//! surface points) follow a label convention: any waypoint whose label
//! starts with [`EXIT_LABEL_PREFIX`] is an exit. The exit index is built
//! once at initialization into a bounded list; matches beyond its capacity
//! are silently ignored.
//!
//! Target selection compares the first three label characters, so button
//! menus can address waypoints by short code ("A1 ", "B2 ") without exact
//! label matches.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::Vec;

use crate::colors::{BLACK, BLUE, BROWN, GOLD, GREEN, MAGENTA, ORANGE, WHITE};
use crate::config::{EXIT_LABEL_PREFIX, MAX_EXIT_WAYPOINTS, TARGET_LABEL_PREFIX_LEN};
use crate::geo::{GeoPoint, distance_between};

// =============================================================================
// Waypoint Categories
// =============================================================================

/// How a feature is marked on the water, which fixes its marker color.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WaypointCategory {
    /// Feature with a blue surface buoy.
    BlueBuoy,
    /// Feature known to have lost its buoy.
    NoBuoy,
    /// Fixed platform.
    Platform,
    /// Sunken container.
    Container,
    /// Feature with an orange surface buoy.
    OrangeBuoy,
    /// Jetty or other entry/exit structure.
    Jetty,
    /// Charted but unmarked feature.
    Unmarked,
    /// Everything else.
    Unknown,
}

impl WaypointCategory {
    /// All categories in legend order.
    pub const ALL: [Self; 8] = [
        Self::BlueBuoy,
        Self::NoBuoy,
        Self::Platform,
        Self::Container,
        Self::OrangeBuoy,
        Self::Jetty,
        Self::Unmarked,
        Self::Unknown,
    ];

    /// Fixed category -> marker color table.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::BlueBuoy => BLUE,
            Self::NoBuoy => MAGENTA,
            Self::Platform => WHITE,
            Self::Container => BLACK,
            Self::OrangeBuoy => ORANGE,
            Self::Jetty => GREEN,
            Self::Unmarked => GOLD,
            Self::Unknown => BROWN,
        }
    }

    /// Legend label for the category.
    pub const fn label(self) -> &'static str {
        match self {
            Self::BlueBuoy => "BLUE BUOY",
            Self::NoBuoy => "NO BUOY",
            Self::Platform => "PLATFORM",
            Self::Container => "CONTAINER",
            Self::OrangeBuoy => "ORANGE BUOY",
            Self::Jetty => "JETTY",
            Self::Unmarked => "UNMARKED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

// =============================================================================
// Waypoint Records
// =============================================================================

/// One charted feature. Externally supplied, read-only.
pub struct Waypoint {
    /// Feature position.
    pub position: GeoPoint,
    /// Marker category.
    pub category: WaypointCategory,
    /// Label; exits start with the exit prefix.
    pub label: &'static str,
}

/// The deployment's waypoint table plus its active index range.
#[derive(Clone, Copy)]
pub struct WaypointTable {
    /// Full waypoint array.
    pub waypoints: &'static [Waypoint],
    /// First index of the active region range (inclusive).
    pub first: usize,
    /// End of the active region range (exclusive).
    pub end: usize,
}

impl WaypointTable {
    /// Iterate the active range with global indices.
    pub fn iter_range(&self) -> impl Iterator<Item = (usize, &'static Waypoint)> {
        let waypoints: &'static [Waypoint] = self.waypoints;
        let first = self.first;
        waypoints[self.first..self.end]
            .iter()
            .enumerate()
            .map(move |(offset, wp)| (first + offset, wp))
    }

    /// Look up a waypoint by global index.
    #[inline]
    pub fn get(
        &self,
        index: usize,
    ) -> &'static Waypoint {
        &self.waypoints[index]
    }

    /// Build the exit index: active-range waypoints whose label starts with
    /// the exit prefix, in table order, truncated at capacity.
    pub fn exit_indices(&self) -> Vec<usize, MAX_EXIT_WAYPOINTS> {
        let mut exits = Vec::new();
        for (index, wp) in self.iter_range() {
            if wp.label.starts_with(EXIT_LABEL_PREFIX) && exits.push(index).is_err() {
                break;
            }
        }
        exits
    }

    /// Find a waypoint in the active range by its first three label
    /// characters. Returns `None` when nothing matches.
    pub fn find_by_label_prefix(
        &self,
        label: &str,
    ) -> Option<usize> {
        self.iter_range()
            .find(|(_, wp)| {
                wp.label
                    .bytes()
                    .take(TARGET_LABEL_PREFIX_LEN)
                    .eq(label.bytes().take(TARGET_LABEL_PREFIX_LEN))
            })
            .map(|(index, _)| index)
    }

    /// Closest waypoint of the active range to a position.
    pub fn nearest(
        &self,
        from: GeoPoint,
    ) -> Option<(usize, f64)> {
        self.nearest_of(from, self.iter_range().map(|(index, _)| index))
    }

    /// Closest waypoint among an explicit index set (e.g. the exit index).
    pub fn nearest_of(
        &self,
        from: GeoPoint,
        indices: impl Iterator<Item = usize>,
    ) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for index in indices {
            let distance = distance_between(from, self.get(index).position);
            if best.is_none_or(|(_, shortest)| distance < shortest) {
                best = Some((index, distance));
            }
        }
        best
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const fn wp(
        lat: f64,
        lon: f64,
        category: WaypointCategory,
        label: &'static str,
    ) -> Waypoint {
        Waypoint {
            position: GeoPoint::new(lat, lon),
            category,
            label,
        }
    }

    static WAYPOINTS: [Waypoint; 6] = [
        wp(51.4600, -0.450, WaypointCategory::BlueBuoy, "A1 Bus"),
        wp(51.4610, -0.451, WaypointCategory::Platform, "A2 Platform"),
        wp(51.4620, -0.452, WaypointCategory::Jetty, "Z01 Main Jetty"),
        wp(51.4630, -0.453, WaypointCategory::Container, "B1 Container"),
        wp(51.4640, -0.454, WaypointCategory::Jetty, "Z02 Cafe Steps"),
        wp(51.4650, -0.455, WaypointCategory::Unknown, "C1 Anchor"),
    ];

    const TABLE: WaypointTable = WaypointTable {
        waypoints: &WAYPOINTS,
        first: 0,
        end: 6,
    };

    #[test]
    fn test_exit_index_matches_label_prefix() {
        let exits = TABLE.exit_indices();
        assert_eq!(exits.as_slice(), &[2, 4], "Exactly the Z0-prefixed waypoints are exits");
    }

    #[test]
    fn test_exit_index_truncates_at_capacity() {
        // A table with more exits than the index can hold keeps the first
        // MAX_EXIT_WAYPOINTS and silently ignores the rest.
        static MANY_EXITS: [Waypoint; 12] = [
            wp(51.0, -0.400, WaypointCategory::Jetty, "Z01"),
            wp(51.0, -0.401, WaypointCategory::Jetty, "Z02"),
            wp(51.0, -0.402, WaypointCategory::Jetty, "Z03"),
            wp(51.0, -0.403, WaypointCategory::Jetty, "Z04"),
            wp(51.0, -0.404, WaypointCategory::Jetty, "Z05"),
            wp(51.0, -0.405, WaypointCategory::Jetty, "Z06"),
            wp(51.0, -0.406, WaypointCategory::Jetty, "Z07"),
            wp(51.0, -0.407, WaypointCategory::Jetty, "Z08"),
            wp(51.0, -0.408, WaypointCategory::Jetty, "Z09"),
            wp(51.0, -0.409, WaypointCategory::Jetty, "Z0A"),
            wp(51.0, -0.410, WaypointCategory::Jetty, "Z0B"),
            wp(51.0, -0.411, WaypointCategory::Jetty, "Z0C"),
        ];
        let table = WaypointTable {
            waypoints: &MANY_EXITS,
            first: 0,
            end: 12,
        };
        let exits = table.exit_indices();
        assert_eq!(exits.len(), MAX_EXIT_WAYPOINTS, "The exit index truncates silently at capacity");
        assert_eq!(exits[0], 0);
        assert_eq!(exits[MAX_EXIT_WAYPOINTS - 1], MAX_EXIT_WAYPOINTS - 1);
    }

    #[test]
    fn test_find_by_label_prefix() {
        assert_eq!(TABLE.find_by_label_prefix("A2 anything"), Some(1));
        assert_eq!(TABLE.find_by_label_prefix("Z02"), Some(4));
        assert_eq!(TABLE.find_by_label_prefix("Q9 "), None, "No match selects no target");
    }

    #[test]
    fn test_nearest_feature() {
        let (index, distance) = TABLE.nearest(GeoPoint::new(51.4601, -0.4501)).unwrap();
        assert_eq!(index, 0, "The closest waypoint of the range wins");
        assert!(distance < 20.0, "Distance should be a few meters, got {distance}");
    }

    #[test]
    fn test_nearest_exit_uses_only_the_exit_index() {
        let exits = TABLE.exit_indices();
        // Right next to a non-exit waypoint; the nearest exit is still a Z0.
        let (index, _) = TABLE
            .nearest_of(GeoPoint::new(51.4600, -0.450), exits.iter().copied())
            .unwrap();
        assert_eq!(index, 2, "Only exit waypoints compete for nearest-exit");
    }

    #[test]
    fn test_nearest_of_empty_is_none() {
        assert!(
            TABLE.nearest_of(GeoPoint::new(51.0, 0.0), core::iter::empty()).is_none(),
            "An empty exit catalog yields no nearest exit"
        );
    }

    #[test]
    fn test_category_colors_are_distinct_per_marking() {
        assert_eq!(WaypointCategory::Jetty.color(), GREEN);
        assert_eq!(WaypointCategory::BlueBuoy.color(), BLUE);
        assert_eq!(WaypointCategory::ALL.len(), 8);
    }

    #[test]
    fn test_range_restricts_scans() {
        let table = WaypointTable {
            waypoints: &WAYPOINTS,
            first: 3,
            end: 6,
        };
        assert_eq!(table.exit_indices().as_slice(), &[4]);
        assert_eq!(table.find_by_label_prefix("A1 "), None, "Out-of-range waypoints are invisible");
    }
}
