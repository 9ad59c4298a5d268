//! Geometry perception of square-planar, trigonal-bipyramidal and
//! octahedral centers from 3D coordinates.
//!
//! Degenerate geometry is not an error. A center whose ligands are not
//! planar, or that has no axis passing the collinearity and coplanarity
//! tests, simply gets no descriptor.

use petgraph::graph::NodeIndex;

use crate::config::PerceptionConfig;
use crate::error::StereoError;
use crate::geometry::{self, Point};
use crate::mol::Mol;
use crate::stereo::{Handedness, SquarePlanarShape, StereoDescriptor};
use crate::traits::{HasHydrogenCount, HasPosition3D};

/// Classify one center from its position and its ligands in input order.
///
/// Returns `Ok(None)` for geometry that matches no shape within tolerance.
///
/// Square-planar descriptors keep the input order and record its shape.
/// Trigonal-bipyramidal and octahedral descriptors list the near axis
/// ligand, the equatorial ligands, then the far axis ligand, and record
/// their handedness. Octahedral equators are re-listed to walk around the
/// square first.
pub fn classify(
    focus: NodeIndex,
    center: Point,
    ligands: &[(NodeIndex, Point)],
    config: &PerceptionConfig,
) -> Result<Option<StereoDescriptor>, StereoError> {
    config.validate()?;
    let atoms: Vec<NodeIndex> = ligands.iter().map(|&(atom, _)| atom).collect();
    let points: Vec<Point> = ligands.iter().map(|&(_, p)| p).collect();
    match ligands.len() {
        4 => square_planar(focus, center, &atoms, &points, config),
        5 => trigonal_bipyramidal(focus, center, &atoms, &points, config),
        6 => octahedral(focus, center, &atoms, &points, config),
        count => Err(StereoError::UnsupportedCoordination {
            atom: focus.index(),
            count,
        }),
    }
}

fn square_planar(
    focus: NodeIndex,
    center: Point,
    atoms: &[NodeIndex],
    points: &[Point],
    config: &PerceptionConfig,
) -> Result<Option<StereoDescriptor>, StereoError> {
    if !geometry::is_coplanar(center, points, config.coplanar_tolerance) {
        log::debug!("atom {}: ligands are not planar", focus.index());
        return Ok(None);
    }
    let shape = geometry::square_planar_shape(points[0], points[1], points[2], points[3]);
    let carriers = [atoms[0], atoms[1], atoms[2], atoms[3]];
    StereoDescriptor::square_planar(focus, carriers, shape).map(Some)
}

fn trigonal_bipyramidal(
    focus: NodeIndex,
    center: Point,
    atoms: &[NodeIndex],
    points: &[Point],
    config: &PerceptionConfig,
) -> Result<Option<StereoDescriptor>, StereoError> {
    let pairs = (0..5).flat_map(|b| (b + 1..5).map(move |e| (b, e)));
    let Some(axis) = find_axis(focus, center, points, pairs, config) else {
        return Ok(None);
    };
    let handedness = handedness(center, points, &axis);
    let order = axis.listing();
    let carriers = [
        atoms[order[0]],
        atoms[order[1]],
        atoms[order[2]],
        atoms[order[3]],
        atoms[order[4]],
    ];
    StereoDescriptor::trigonal_bipyramidal(focus, carriers, handedness).map(Some)
}

fn octahedral(
    focus: NodeIndex,
    center: Point,
    atoms: &[NodeIndex],
    points: &[Point],
    config: &PerceptionConfig,
) -> Result<Option<StereoDescriptor>, StereoError> {
    let pairs = (1..6).map(|i| (0, i));
    let Some(mut axis) = find_axis(focus, center, points, pairs, config) else {
        return Ok(None);
    };
    let eq = &mut axis.equator;
    match geometry::square_planar_shape(
        points[eq[0]],
        points[eq[1]],
        points[eq[2]],
        points[eq[3]],
    ) {
        SquarePlanarShape::U => {}
        SquarePlanarShape::Four => eq.swap(1, 2),
        SquarePlanarShape::Z => eq.swap(0, 1),
    }
    let handedness = handedness(center, points, &axis);
    let order = axis.listing();
    let carriers = [
        atoms[order[0]],
        atoms[order[1]],
        atoms[order[2]],
        atoms[order[3]],
        atoms[order[4]],
        atoms[order[5]],
    ];
    StereoDescriptor::octahedral(focus, carriers, handedness).map(Some)
}

/// Ligand positions of an accepted axis and its equator.
struct Axis {
    near: usize,
    far: usize,
    equator: Vec<usize>,
}

impl Axis {
    fn listing(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.equator.len() + 2);
        order.push(self.near);
        order.extend_from_slice(&self.equator);
        order.push(self.far);
        order
    }
}

/// First candidate pair that is collinear through the focus and leaves a
/// coplanar equator. With `unique_axis`, a second passing pair rejects the
/// center.
fn find_axis(
    focus: NodeIndex,
    center: Point,
    points: &[Point],
    pairs: impl Iterator<Item = (usize, usize)>,
    config: &PerceptionConfig,
) -> Option<Axis> {
    let mut passing = pairs.filter_map(|(near, far)| {
        if !geometry::is_collinear(points[near], center, points[far], config.collinear_tolerance) {
            return None;
        }
        let equator: Vec<usize> = (0..points.len()).filter(|&i| i != near && i != far).collect();
        let ring: Vec<Point> = equator.iter().map(|&i| points[i]).collect();
        if !geometry::is_coplanar(center, &ring, config.coplanar_tolerance) {
            return None;
        }
        Some(Axis { near, far, equator })
    });

    let Some(axis) = passing.next() else {
        log::debug!("atom {}: no axis with a planar equator", focus.index());
        return None;
    };
    if config.unique_axis && passing.next().is_some() {
        log::debug!("atom {}: more than one axis qualifies", focus.index());
        return None;
    }
    Some(axis)
}

/// Sign of the volume spanned by the far axis ligand, the focus and the
/// first two equatorial ligands.
fn handedness(center: Point, points: &[Point], axis: &Axis) -> Handedness {
    let volume = geometry::signed_volume(
        points[axis.far],
        center,
        points[axis.equator[0]],
        points[axis.equator[1]],
    );
    if volume < 0.0 {
        Handedness::Clockwise
    } else {
        Handedness::Anticlockwise
    }
}

/// Classify one atom of a molecule, taking ligands in bond order.
///
/// Fails if the atom has no supported ligand count or if the atom or any
/// ligand lacks coordinates.
pub fn classify_atom<A: HasPosition3D, B>(
    mol: &Mol<A, B>,
    atom: NodeIndex,
    config: &PerceptionConfig,
) -> Result<Option<StereoDescriptor>, StereoError> {
    let ligands = mol.ligands(atom);
    if !(4..=6).contains(&ligands.len()) {
        return Err(StereoError::UnsupportedCoordination {
            atom: atom.index(),
            count: ligands.len(),
        });
    }
    let center = position(mol, atom)?;
    let placed = ligands
        .into_iter()
        .map(|ligand| position(mol, ligand).map(|p| (ligand, p)))
        .collect::<Result<Vec<_>, _>>()?;
    classify(atom, center, &placed, config)
}

fn position<A: HasPosition3D, B>(mol: &Mol<A, B>, atom: NodeIndex) -> Result<Point, StereoError> {
    mol.atom(atom)
        .position_3d()
        .ok_or(StereoError::MissingCoordinates { atom: atom.index() })
}

/// Perceive extended stereocenters with the default tolerances.
pub fn perceive<A, B>(mol: &mut Mol<A, B>) -> Result<usize, StereoError>
where
    A: HasPosition3D + HasHydrogenCount,
{
    perceive_with(mol, &PerceptionConfig::default())
}

/// Classify every atom with 4, 5 or 6 neighbors and attach the descriptors
/// found to the molecule. Returns how many were attached.
///
/// Atoms with implicit hydrogens or missing coordinates are skipped.
pub fn perceive_with<A, B>(
    mol: &mut Mol<A, B>,
    config: &PerceptionConfig,
) -> Result<usize, StereoError>
where
    A: HasPosition3D + HasHydrogenCount,
{
    config.validate()?;
    let candidates: Vec<NodeIndex> = mol
        .atoms()
        .filter(|&atom| (4..=6).contains(&mol.degree(atom)))
        .collect();

    let mut found = Vec::new();
    for atom in candidates {
        if mol.atom(atom).hydrogen_count() > 0 {
            log::debug!("atom {}: skipped, has implicit hydrogens", atom.index());
            continue;
        }
        match classify_atom(mol, atom, config) {
            Ok(Some(descriptor)) => found.push(descriptor),
            Ok(None) => {}
            Err(StereoError::MissingCoordinates { atom: missing }) => {
                log::debug!("atom {}: skipped, atom {missing} has no coordinates", atom.index());
            }
            Err(e) => return Err(e),
        }
    }

    let count = found.len();
    for descriptor in found {
        mol.add_stereo(descriptor);
    }
    log::debug!("perceived {count} extended stereocenters");
    Ok(count)
}
