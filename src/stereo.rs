//! Extended stereo descriptors for 4-, 5- and 6-coordinate centers.
//!
//! A [`StereoDescriptor`] records a focus atom, its carriers in a listing
//! order, and the configuration order that listing has within its geometry
//! class. The numbering follows the OpenSMILES classes: `@SP1..3`,
//! `@TB1..20` and `@OH1..30`. A descriptor in any order can be rewritten
//! into order 1 with [`StereoDescriptor::normalize`], which is the form the
//! resolver works on.

use std::fmt;

use petgraph::graph::NodeIndex;

use crate::catalog;
use crate::error::StereoError;

/// Coordination geometry of an extended stereocenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryClass {
    /// Four carriers in a plane around the focus.
    SquarePlanar,
    /// Two axial carriers and three equatorial ones.
    TrigonalBipyramidal,
    /// Two axial carriers and four equatorial ones.
    Octahedral,
}

impl GeometryClass {
    pub const ALL: [GeometryClass; 3] = [
        GeometryClass::SquarePlanar,
        GeometryClass::TrigonalBipyramidal,
        GeometryClass::Octahedral,
    ];

    /// The geometry class for a ligand count, if there is one.
    pub fn from_coordination(count: usize) -> Option<Self> {
        match count {
            4 => Some(Self::SquarePlanar),
            5 => Some(Self::TrigonalBipyramidal),
            6 => Some(Self::Octahedral),
            _ => None,
        }
    }

    /// Number of carriers a center of this class has.
    pub fn coordination(self) -> usize {
        match self {
            Self::SquarePlanar => 4,
            Self::TrigonalBipyramidal => 5,
            Self::Octahedral => 6,
        }
    }

    /// Tag used for this class in the serialized layer.
    pub fn tag(self) -> &'static str {
        match self {
            Self::SquarePlanar => "sp",
            Self::TrigonalBipyramidal => "tb",
            Self::Octahedral => "o",
        }
    }

    /// Number of distinct configurations (3, 20 or 30).
    pub fn config_count(self) -> u8 {
        catalog::family_count(self)
    }
}

impl fmt::Display for GeometryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SquarePlanar => write!(f, "square-planar"),
            Self::TrigonalBipyramidal => write!(f, "trigonal-bipyramidal"),
            Self::Octahedral => write!(f, "octahedral"),
        }
    }
}

/// Path traced by four square-planar carriers taken in listing order.
///
/// `U` walks around the square, `Four` crosses the middle between the second
/// and third carriers, `Z` between the third and fourth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquarePlanarShape {
    U,
    Four,
    Z,
}

impl SquarePlanarShape {
    pub fn config_order(self) -> u8 {
        match self {
            Self::U => 1,
            Self::Four => 2,
            Self::Z => 3,
        }
    }
}

/// Turning sense of the equatorial carriers seen from the first axial one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    /// `@`, configuration order 1.
    Anticlockwise,
    /// `@@`, configuration order 2.
    Clockwise,
}

impl Handedness {
    pub fn config_order(self) -> u8 {
        match self {
            Self::Anticlockwise => 1,
            Self::Clockwise => 2,
        }
    }
}

/// A perceived or declared extended stereocenter.
///
/// Carriers for trigonal-bipyramidal and octahedral centers list the first
/// axial carrier, then the equatorial ring, then the second axial carrier
/// when the configuration order is 1. Other orders permute that listing as
/// the catalog defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StereoDescriptor {
    focus: NodeIndex,
    class: GeometryClass,
    carriers: Vec<NodeIndex>,
    config: u8,
}

impl StereoDescriptor {
    /// Build a descriptor, checking the carrier count, that carriers are
    /// distinct, and that `config` exists for `class`.
    pub fn new(
        focus: NodeIndex,
        class: GeometryClass,
        carriers: Vec<NodeIndex>,
        config: u8,
    ) -> Result<Self, StereoError> {
        let expected = class.coordination();
        if carriers.len() != expected {
            return Err(StereoError::CarrierCount {
                atom: focus.index(),
                class,
                expected,
                got: carriers.len(),
            });
        }
        for (i, carrier) in carriers.iter().enumerate() {
            if carriers[..i].contains(carrier) {
                return Err(StereoError::DuplicateCarrier {
                    atom: focus.index(),
                    carrier: carrier.index(),
                });
            }
        }
        if config == 0 || config > class.config_count() {
            return Err(StereoError::ConfigOutOfRange { class, config });
        }
        Ok(Self {
            focus,
            class,
            carriers,
            config,
        })
    }

    pub fn square_planar(
        focus: NodeIndex,
        carriers: [NodeIndex; 4],
        shape: SquarePlanarShape,
    ) -> Result<Self, StereoError> {
        Self::new(
            focus,
            GeometryClass::SquarePlanar,
            carriers.to_vec(),
            shape.config_order(),
        )
    }

    pub fn trigonal_bipyramidal(
        focus: NodeIndex,
        carriers: [NodeIndex; 5],
        handedness: Handedness,
    ) -> Result<Self, StereoError> {
        Self::new(
            focus,
            GeometryClass::TrigonalBipyramidal,
            carriers.to_vec(),
            handedness.config_order(),
        )
    }

    pub fn octahedral(
        focus: NodeIndex,
        carriers: [NodeIndex; 6],
        handedness: Handedness,
    ) -> Result<Self, StereoError> {
        Self::new(
            focus,
            GeometryClass::Octahedral,
            carriers.to_vec(),
            handedness.config_order(),
        )
    }

    pub fn focus(&self) -> NodeIndex {
        self.focus
    }

    pub fn class(&self) -> GeometryClass {
        self.class
    }

    pub fn carriers(&self) -> &[NodeIndex] {
        &self.carriers
    }

    /// Configuration order of the carrier listing, starting at 1.
    pub fn config(&self) -> u8 {
        self.config
    }

    /// Shape of a square-planar listing.
    pub fn shape(&self) -> Option<SquarePlanarShape> {
        match (self.class, self.config) {
            (GeometryClass::SquarePlanar, 1) => Some(SquarePlanarShape::U),
            (GeometryClass::SquarePlanar, 2) => Some(SquarePlanarShape::Four),
            (GeometryClass::SquarePlanar, 3) => Some(SquarePlanarShape::Z),
            _ => None,
        }
    }

    /// Handedness of an axial listing whose axis runs from the first to the
    /// last carrier (configuration orders 1 and 2).
    pub fn handedness(&self) -> Option<Handedness> {
        match (self.class, self.config) {
            (GeometryClass::SquarePlanar, _) => None,
            (_, 1) => Some(Handedness::Anticlockwise),
            (_, 2) => Some(Handedness::Clockwise),
            _ => None,
        }
    }

    /// Re-list the carriers so the descriptor is in configuration order 1.
    ///
    /// The seed permutation `s` of order `n` says which listed carrier sits
    /// at each position of the order-1 arrangement:
    /// `normalized[p] = carriers[s[p]]`.
    pub fn normalize(&self) -> StereoDescriptor {
        if self.config == 1 {
            return self.clone();
        }
        let seed = catalog::seed(self.class, self.config);
        let carriers = seed.iter().map(|&i| self.carriers[i as usize]).collect();
        StereoDescriptor {
            focus: self.focus,
            class: self.class,
            carriers,
            config: 1,
        }
    }
}
