use crate::traits::*;

/// Adds optional 3D coordinates to an atom type.
#[derive(Debug, Clone, PartialEq)]
pub struct WithPosition3D<T> {
    pub inner: T,
    pub position_3d: Option<[f64; 3]>,
}

impl<T> WithPosition3D<T> {
    pub fn new(inner: T, position_3d: [f64; 3]) -> Self {
        Self {
            inner,
            position_3d: Some(position_3d),
        }
    }

    pub fn unplaced(inner: T) -> Self {
        Self {
            inner,
            position_3d: None,
        }
    }
}

impl<T> HasPosition3D for WithPosition3D<T> {
    fn position_3d(&self) -> Option<[f64; 3]> {
        self.position_3d
    }
    fn set_position_3d(&mut self, pos: Option<[f64; 3]>) {
        self.position_3d = pos;
    }
}

macro_rules! delegate_trait {
    ($wrapper:ident, $trait:ident, $method:ident, $ret:ty) => {
        impl<T: $trait> $trait for $wrapper<T> {
            fn $method(&self) -> $ret {
                self.inner.$method()
            }
        }
    };
}

delegate_trait!(WithPosition3D, HasAtomicNum, atomic_num, u8);
delegate_trait!(WithPosition3D, HasFormalCharge, formal_charge, i8);
delegate_trait!(WithPosition3D, HasIsotope, isotope, u16);
delegate_trait!(WithPosition3D, HasHydrogenCount, hydrogen_count, u8);
delegate_trait!(WithPosition3D, HasBondOrder, bond_order, crate::bond::BondOrder);
