/// Default atom type for a molecular graph node.
///
/// `Atom` stores intrinsic atomic properties. Coordinates are not part of
/// it; wrap it in [`WithPosition3D`](crate::WithPosition3D) to perceive
/// stereo from geometry.
///
/// # Examples
///
/// ```
/// use metalstereo::Atom;
///
/// let platinum = Atom {
///     atomic_num: 78,
///     formal_charge: 0,
///     isotope: 0,
///     hydrogen_count: 0,
/// };
/// assert_eq!(platinum.atomic_num, 78);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 78 = Pt, …).
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Mass number. `0` means natural isotopic abundance.
    pub isotope: u16,
    /// Number of implicit hydrogens on this atom.
    ///
    /// These are not graph nodes and have no coordinates, so an atom with
    /// implicit hydrogens is never perceived as an extended stereocenter.
    pub hydrogen_count: u8,
}

impl Atom {
    /// A neutral atom of natural isotopic abundance with no implicit
    /// hydrogens.
    pub fn element(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }
}

impl crate::traits::HasAtomicNum for Atom {
    fn atomic_num(&self) -> u8 {
        self.atomic_num
    }
}

impl crate::traits::HasFormalCharge for Atom {
    fn formal_charge(&self) -> i8 {
        self.formal_charge
    }
}

impl crate::traits::HasIsotope for Atom {
    fn isotope(&self) -> u16 {
        self.isotope
    }
}

impl crate::traits::HasHydrogenCount for Atom {
    fn hydrogen_count(&self) -> u8 {
        self.hydrogen_count
    }
}
