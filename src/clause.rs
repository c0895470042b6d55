use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use itertools::Itertools;

use crate::error::ClauseError;
use crate::literal::Literal;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Or {}
    impl Sealed for super::Xor {}
}

/// Tags a [`ClauseValue`]/[`crate::list::ClauseList`] as holding ordinary
/// disjunctive clauses or parity (XOR) clauses.
///
/// This is the compile-time analogue of the source library's class
/// hierarchy: cross-kind operations (adding an `XorClause` to a `CNF`,
/// comparing a `Clause` to an `XorClause`) simply have no implementation to
/// call, rather than raising at runtime.
pub trait ClauseKind: sealed::Sealed + Copy + Clone + fmt::Debug + Eq + Hash + 'static {
    /// Lower-case tag used in error messages and the CLI summary.
    const NAME: &'static str;
}

/// Marker for ordinary disjunctive clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Or;

/// Marker for parity (XOR) clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Xor;

impl ClauseKind for Or {
    const NAME: &'static str = "cnf";
}

impl ClauseKind for Xor {
    const NAME: &'static str = "xor";
}

/// An immutable, owned sequence of nonzero literals tagged with its kind.
///
/// `Clause` (disjunction) and `XorClause` (parity) are type aliases of this
/// one generic value type. Literal order and duplicates are preserved
/// verbatim; no normalization (sorting, dedup, tautology elimination) is
/// performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClauseValue<K: ClauseKind> {
    literals: Vec<Literal>,
    _kind: PhantomData<K>,
}

/// A disjunctive clause: `Clause([1, -2, 3])` asserts `x1 \/ !x2 \/ x3`.
pub type Clause = ClauseValue<Or>;
/// A parity clause: `XorClause([1, -2, 3])` asserts `x1 XOR !x2 XOR x3`.
pub type XorClause = ClauseValue<Xor>;

impl<K: ClauseKind> ClauseValue<K> {
    /// Builds a clause from raw literals, rejecting any zero entry.
    ///
    /// ```
    /// use cnf_toolkit::Clause;
    /// assert!(Clause::new([1, 2, 3]).is_ok());
    /// assert!(Clause::new([1, 2, 0]).is_err());
    /// ```
    pub fn new(literals: impl IntoIterator<Item = i32>) -> Result<Self, ClauseError> {
        let literals = literals
            .into_iter()
            .map(Literal::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_literals(literals))
    }

    pub(crate) fn from_literals(literals: Vec<Literal>) -> Self {
        ClauseValue {
            literals,
            _kind: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn iter(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    /// Python-style indexing: `-1` is the last literal, `-len..len` is valid.
    pub fn get(&self, index: isize) -> Result<Literal, ClauseError> {
        let len = self.literals.len() as isize;
        let normalized = if index < 0 { index + len } else { index };
        if normalized < 0 || normalized >= len {
            return Err(ClauseError::IndexOutOfRange {
                index,
                len: self.literals.len(),
            });
        }
        Ok(self.literals[normalized as usize])
    }

    /// Largest variable magnitude in the clause, or 0 if empty.
    pub fn maxvar(&self) -> u32 {
        self.literals.iter().map(|l| l.variable()).max().unwrap_or(0)
    }
}

impl<K: ClauseKind> fmt::Display for ClauseValue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            Itertools::intersperse(self.literals.iter().map(Literal::to_string), " ".to_string())
                .collect::<String>()
        )
    }
}

/// ```compile_fail
/// use cnf_toolkit::{Clause, XorClause};
/// let a = Clause::new([1, 2, 3]).unwrap();
/// let b = XorClause::new([1, 2, 3]).unwrap();
/// // Clause and XorClause are distinct types: there is no PartialEq impl
/// // across them, so this simply does not compile.
/// assert!(a != b);
/// ```
#[allow(dead_code)]
struct CrossKindEqualityDoesNotCompile;
