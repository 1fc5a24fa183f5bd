//! Named configurations.
//!
//! Each preset is a complete [`GeneratorConfig`] for one kind of scene, from
//! the full "cube of cubes" lattice to a bare set of reference rods.

use std::fmt;
use std::str::FromStr;

use vesselgrid_core::{Axis, AxisMaterials, GridSpec, RodConfig, VisibilityPolicy, ZoneThresholds};
use vesselgrid_scene::{MaterialAssignment, VolumeKind, ZoneMaterials};

use crate::config::GeneratorConfig;

/// The built-in configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// A row of ten unit boxes cycling Red, Green, Blue.
    CubeRow,
    /// A full 10x10x10 lattice of small boxes cycling Red, Green, Blue, no
    /// filtering, no rods.
    CubeOfCubes,
    /// A Z-axis tube cut from a 40^3 lattice, with rods.
    Vessel,
    /// The same tube from an 80^3 lattice.
    VesselFine,
    /// A tube of spheres with a wider middle band.
    SphereVessel,
    /// An X-axis tube in an elongated lattice, with 15-unit rods.
    VesselAlongX,
    /// No lattice, rods only.
    RodsOnly,
}

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 7] = [
        Preset::CubeRow,
        Preset::CubeOfCubes,
        Preset::Vessel,
        Preset::VesselFine,
        Preset::SphereVessel,
        Preset::VesselAlongX,
        Preset::RodsOnly,
    ];

    /// Snake-case name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Preset::CubeRow => "cube_row",
            Preset::CubeOfCubes => "cube_of_cubes",
            Preset::Vessel => "vessel",
            Preset::VesselFine => "vessel_fine",
            Preset::SphereVessel => "sphere_vessel",
            Preset::VesselAlongX => "vessel_along_x",
            Preset::RodsOnly => "rods_only",
        }
    }

    /// Builds the configuration.
    #[must_use]
    pub fn config(self) -> GeneratorConfig {
        let base = GeneratorConfig {
            name: self.name().to_string(),
            ..GeneratorConfig::default()
        };
        let vessel_rods = RodConfig {
            half_length: 6.0,
            thickness: 0.02,
            mark_spacing: 1.0,
            mark_size: 0.08,
            ..RodConfig::default()
        };

        let rgb = MaterialAssignment::cycle(["Red", "Green", "Blue"]);

        match self {
            // Unit scale: 10 cells of edge 2 with a 0.2 gap.
            Preset::CubeRow => GeneratorConfig {
                grid: GridSpec::new(10, 1, 1, 21.8),
                visibility: VisibilityPolicy::Full,
                cell_materials: rgb,
                rods: None,
                ..base
            },
            // 10 cells of edge 0.2 with a 0.02 gap.
            Preset::CubeOfCubes => GeneratorConfig {
                grid: GridSpec::cube(10, 2.18),
                visibility: VisibilityPolicy::Full,
                cell_materials: rgb,
                rods: None,
                ..base
            },
            Preset::Vessel => GeneratorConfig {
                grid: GridSpec::cube(40, 10.0),
                zones: ZoneThresholds::new(2.0, 2.5),
                rods: Some(vessel_rods),
                ..base
            },
            Preset::VesselFine => GeneratorConfig {
                grid: GridSpec::cube(80, 10.0),
                zones: ZoneThresholds::new(2.0, 2.5),
                rods: Some(vessel_rods),
                progress_interval: 10_000,
                ..base
            },
            Preset::SphereVessel => GeneratorConfig {
                grid: GridSpec::cube(30, 10.0),
                zones: ZoneThresholds::new(3.0, 4.0),
                element_kind: VolumeKind::Sphere,
                cell_materials: MaterialAssignment::ByZone(ZoneMaterials {
                    inner: "Magenta".to_string(),
                    middle: "Cyan".to_string(),
                    outer: "Blue".to_string(),
                }),
                rods: Some(RodConfig {
                    materials: AxisMaterials::uniform("Yellow"),
                    mark_material: "Red".to_string(),
                    ..vessel_rods
                }),
                ..base
            },
            Preset::VesselAlongX => GeneratorConfig {
                grid: GridSpec::new(60, 20, 20, 30.0),
                zones: ZoneThresholds::new(2.0, 3.5),
                principal_axis: Axis::X,
                rods: Some(RodConfig::default()),
                ..base
            },
            Preset::RodsOnly => GeneratorConfig {
                grid: GridSpec::cube(0, 1.0),
                rods: Some(RodConfig::default()),
                ..base
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                let names: Vec<_> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset '{s}' (expected one of: {})", names.join(", "))
            })
    }
}
