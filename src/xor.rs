//! Tseitin expansion and the `create_xor` construction.

use crate::error::{ClauseError, XorError};
use crate::list::{CNF, XorClauseList};

/// Folds `k` equal-width literal groups and an optional RHS bit vector into
/// `w` stored parity-clause literal sequences (one per column), with the
/// RHS bit of each folded into the sign of its first literal per spec.md
/// §4.4.
pub(crate) fn fold_xor_groups(
    groups: &[&[i32]],
    rhs: Option<&[bool]>,
) -> Result<Vec<Vec<i32>>, XorError> {
    if groups.is_empty() {
        return Err(XorError::NoGroups);
    }
    let width = groups[0].len();
    if width == 0 {
        return Err(XorError::EmptyGroup);
    }
    if groups.iter().any(|g| g.len() != width) {
        return Err(XorError::WidthMismatch);
    }
    for group in groups {
        if group.iter().any(|&lit| lit == 0) {
            return Err(XorError::Clause(ClauseError::ZeroLiteral));
        }
    }

    let owned_zero_rhs;
    let rhs_bits: &[bool] = match rhs {
        Some(bits) => {
            if bits.len() != width {
                return Err(XorError::WidthMismatch);
            }
            bits
        }
        None => {
            owned_zero_rhs = vec![false; width];
            &owned_zero_rhs
        }
    };

    let mut columns = Vec::with_capacity(width);
    for j in 0..width {
        let mut literals: Vec<i32> = groups.iter().map(|g| g[j]).collect();
        if rhs_bits[j] {
            literals[0] = -literals[0];
        }
        columns.push(literals);
    }
    Ok(columns)
}

/// Expands one stored parity clause into the ordinary clauses of its truth
/// table.
///
/// `literals` is the clause exactly as stored: the RHS bit of the relation
/// is already folded into the sign of `literals[0]` (see
/// [`fold_xor_groups`]), so this function always expands against a formal
/// RHS of 0: flipping `literals[0]`'s sign at storage time already shifts
/// every emitted sign pattern's parity to compensate, so no separate bit
/// needs to be threaded through here.
///
/// Enumerates sign bitmasks `0..2^k` in ascending order (bit `i` set means
/// literal `i` is negated) and emits the clause for mask `m` iff
/// `m.count_ones()` is odd. This is the canonical order required by
/// spec.md §4.5. An empty literal sequence (`k = 0`) has no representable
/// RHS and expands to nothing.
pub fn tseitin_expand(literals: &[i32]) -> Vec<Vec<i32>> {
    let k = literals.len();
    if k == 0 {
        return Vec::new();
    }

    let mut clauses = Vec::with_capacity(1usize << (k - 1));
    for mask in 0u32..(1u32 << k) {
        if mask.count_ones() % 2 == 0 {
            continue;
        }
        let clause: Vec<i32> = literals
            .iter()
            .enumerate()
            .map(|(i, &lit)| if mask & (1 << i) != 0 { -lit } else { lit })
            .collect();
        clauses.push(clause);
    }
    clauses
}

impl XorClauseList {
    /// Builds the stored (RHS-folded) parity clauses for `k` equal-width
    /// literal groups and appends them, one per column.
    pub fn create_xor(&mut self, groups: &[&[i32]], rhs: Option<&[bool]>) -> Result<(), XorError> {
        for column in fold_xor_groups(groups, rhs)? {
            self.add_clause(&column)?;
        }
        Ok(())
    }
}

impl CNF {
    /// Builds the equivalent CNF of `k` equal-width XOR groups directly,
    /// via Tseitin expansion of each column (spec.md §4.4).
    pub fn create_xor(&mut self, groups: &[&[i32]], rhs: Option<&[bool]>) -> Result<(), XorError> {
        for column in fold_xor_groups(groups, rhs)? {
            for clause in tseitin_expand(&column) {
                self.add_clause(&clause)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_plain_rhs_zero_is_identity() {
        let groups: [&[i32]; 3] = [&[1], &[2], &[3]];
        let folded = fold_xor_groups(&groups, None).unwrap();
        assert_eq!(folded, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn fold_rhs_one_flips_leading_literal() {
        let groups: [&[i32]; 2] = [&[1, 3], &[2, 4]];
        let folded = fold_xor_groups(&groups, Some(&[false, true])).unwrap();
        assert_eq!(folded, vec![vec![1, 2], vec![-3, 4]]);
    }

    #[test]
    fn fold_rejects_empty_groups_and_width_mismatch() {
        let empty: &[&[i32]] = &[];
        assert_eq!(fold_xor_groups(empty, None), Err(XorError::NoGroups));

        let zero_width: [&[i32]; 1] = [&[]];
        assert_eq!(fold_xor_groups(&zero_width, None), Err(XorError::EmptyGroup));

        let mismatched: [&[i32]; 2] = [&[1, 2], &[3]];
        assert_eq!(fold_xor_groups(&mismatched, None), Err(XorError::WidthMismatch));
    }

    #[test]
    fn fold_rejects_zero_literal() {
        let groups: [&[i32]; 2] = [&[1, 0], &[2, 3]];
        assert_eq!(
            fold_xor_groups(&groups, None),
            Err(XorError::Clause(ClauseError::ZeroLiteral))
        );
    }

    #[test]
    fn tseitin_expand_three_literals_rhs_zero() {
        let mut clauses = tseitin_expand(&[1, 2, 3]);
        clauses.sort();
        let mut expected = vec![
            vec![1, 2, -3],
            vec![1, -2, 3],
            vec![-1, 2, 3],
            vec![-1, -2, -3],
        ];
        expected.sort();
        assert_eq!(clauses, expected);
    }

    #[test]
    fn tseitin_expand_rhs_one_via_folded_sign() {
        let folded = fold_xor_groups(&[&[1], &[2], &[3]], Some(&[true])).unwrap();
        assert_eq!(folded, vec![vec![-1, 2, 3]]);

        let mut clauses = tseitin_expand(&folded[0]);
        clauses.sort();
        let mut expected = vec![
            vec![1, 2, 3],
            vec![1, -2, -3],
            vec![-1, 2, -3],
            vec![-1, -2, 3],
        ];
        expected.sort();
        assert_eq!(clauses, expected);
    }

    #[test]
    fn tseitin_expand_single_literal() {
        // k=1, no fold (stored rhs=0): the relation "literal 5 == false" forces
        // the unit clause asserting its negation.
        assert_eq!(tseitin_expand(&[5]), vec![vec![-5]]);
        // A folded leading sign (stored rhs=1) flips the forced polarity.
        assert_eq!(tseitin_expand(&[-5]), vec![vec![5]]);
    }

    #[test]
    fn tseitin_expand_empty_is_empty() {
        assert!(tseitin_expand(&[]).is_empty());
    }

    #[test]
    fn cnf_create_xor_scenario() {
        let mut cnf = CNF::new();
        cnf.create_xor(&[&[1], &[2], &[3]], None).unwrap();
        assert_eq!(cnf.len(), 4);

        use crate::clause::Clause;
        for literals in [[1, 2, -3], [1, -2, 3], [-1, 2, 3], [-1, -2, -3]] {
            assert!(cnf.contains(&Clause::new(literals).unwrap()));
        }
    }

    #[test]
    fn xor_clause_list_create_xor_stores_folded_columns() {
        let mut xors = XorClauseList::new();
        xors.create_xor(&[&[1, 4], &[2, 5]], Some(&[false, true])).unwrap();
        assert_eq!(xors.len(), 2);

        use crate::clause::XorClause;
        assert_eq!(xors.get(0).unwrap(), XorClause::new([1, 2]).unwrap());
        assert_eq!(xors.get(1).unwrap(), XorClause::new([-4, 5]).unwrap());
    }

    #[test]
    fn create_xor_propagates_group_errors() {
        let mut cnf = CNF::new();
        assert_eq!(cnf.create_xor(&[], None), Err(XorError::NoGroups));
        assert!(cnf.is_empty());
    }
}
