/// Default atom type for a molecular graph node.
///
/// Ring perception never inspects the payload; it is carried along so that
/// ring fragments keep the atoms they were cut from.
///
/// # Examples
///
/// ```
/// use ringcrab::Atom;
///
/// let carbon = Atom::new(6);
/// assert_eq!(carbon.atomic_num, 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, …).
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub formal_charge: i8,
    /// Number of implicit hydrogens.
    pub hydrogen_count: u8,
}

impl Atom {
    pub fn new(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }
}
