//! The combined formula: a `CNF` and an `XorClauseList` sharing a variable count.

use crate::dimacs;
use crate::error::{ClauseListError, DimacsError, XorError};
use crate::list::{CNF, XorClauseList};
use crate::xor::tseitin_expand;

/// A formula mixing ordinary disjunctive clauses with parity (XOR) clauses,
/// sharing one logical variable count across both parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorCNF {
    cnf: CNF,
    xors: XorClauseList,
}

impl Default for XorCNF {
    fn default() -> Self {
        XorCNF {
            cnf: CNF::new(),
            xors: XorClauseList::new(),
        }
    }
}

impl XorCNF {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(cnf: CNF, xors: XorClauseList) -> Self {
        XorCNF { cnf, xors }
    }

    pub fn cnf(&self) -> &CNF {
        &self.cnf
    }

    pub fn xors(&self) -> &XorClauseList {
        &self.xors
    }

    /// `max(cnf.nvars(), xors.nvars())`, never tracked separately.
    pub fn nvars(&self) -> u32 {
        self.cnf.nvars().max(self.xors.nvars())
    }

    pub fn extend_cnf(&mut self, other: &CNF) -> Result<(), ClauseListError> {
        self.cnf.concat_from(other)
    }

    pub fn extend_xors(&mut self, other: &XorClauseList) -> Result<(), ClauseListError> {
        self.xors.concat_from(other)
    }

    /// Appends `k` equal-width XOR groups directly to the stored XOR part
    /// (undoes no expansion; see [`Self::to_cnf`] for that).
    pub fn create_xor(&mut self, groups: &[&[i32]], rhs: Option<&[bool]>) -> Result<(), XorError> {
        self.xors.create_xor(groups, rhs)
    }

    /// In-place concatenation of another whole formula: forwards to both parts.
    ///
    /// Mirrors [`crate::list::ClauseList::concat_from`]'s self-aliasing guard:
    /// ordinary owned bindings can never reach this with `other` being
    /// `self`, since the borrow checker already rejects it: the fallback
    /// guard on each part's `concat_from` only matters for shared, interior
    /// mutable state.
    pub fn concat_from(&mut self, other: &XorCNF) -> Result<(), ClauseListError> {
        self.cnf.concat_from(&other.cnf)?;
        self.xors.concat_from(&other.xors)
    }

    /// Returns a CNF equivalent to the whole formula: the stored CNF part
    /// plus the Tseitin expansion of every stored XOR clause, preserving
    /// `nvars`.
    pub fn to_cnf(&self) -> CNF {
        let mut out = self.cnf.clone();
        let _ = out.set_nvars(self.nvars());
        for xor_clause in self.xors.iter() {
            let literals: Vec<i32> = xor_clause.iter().collect();
            for clause in tseitin_expand(&literals) {
                out.add_clause(&clause)
                    .expect("expanded clause reuses already-validated literals");
            }
        }
        let _ = out.set_nvars(out.nvars().max(self.nvars()));
        out
    }

    /// Emits this formula as DIMACS text (spec.md §4.6).
    pub fn to_dimacs(&self) -> String {
        dimacs::emit(self)
    }

    /// Parses a DIMACS/XOR-CNF document (spec.md §4.6).
    pub fn from_dimacs(input: &str) -> Result<Self, DimacsError> {
        dimacs::parse(input)
    }
}

impl std::ops::AddAssign<&CNF> for XorCNF {
    fn add_assign(&mut self, other: &CNF) {
        self.extend_cnf(other).expect("cannot concatenate an aliased CNF part");
    }
}

impl std::ops::AddAssign<&XorClauseList> for XorCNF {
    fn add_assign(&mut self, other: &XorClauseList) {
        self.extend_xors(other).expect("cannot concatenate an aliased XOR part");
    }
}

impl std::ops::AddAssign<&XorCNF> for XorCNF {
    fn add_assign(&mut self, other: &XorCNF) {
        self.concat_from(other).expect("cannot concatenate an aliased formula");
    }
}
