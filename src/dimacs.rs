//! DIMACS CNF / XOR-CNF text codec: parsing and emission for [`crate::XorCNF`].

use itertools::Itertools;
use nom::{
    bytes::complete::tag,
    character::complete::{digit1, multispace1},
    combinator::recognize,
    sequence::tuple,
    IResult, Parser,
};

use crate::error::DimacsError;
use crate::list::{CNF, XorClauseList};
use crate::xor_cnf::XorCNF;

struct Header {
    nvars: u32,
    nclauses: u32,
}

fn parse_unsigned_u32(input: &str) -> IResult<&str, u32> {
    nom::combinator::map_res(recognize(digit1), str::parse).parse(input)
}

fn parse_header_line(input: &str) -> IResult<&str, Header> {
    let (input, (_, _, _, _, nvars, _, nclauses)) = tuple((
        tag("p"),
        multispace1,
        tag("cnf"),
        multispace1,
        parse_unsigned_u32,
        multispace1,
        parse_unsigned_u32,
    ))
    .parse(input)?;
    Ok((input, Header { nvars, nclauses }))
}

fn parse_token_i32(token: &str) -> Result<i32, DimacsError> {
    token
        .parse::<i32>()
        .map_err(|_| DimacsError::MalformedToken(token.to_string()))
}

/// Strips a glued `x` prefix from a clause's opening token, returning the
/// literal it carries. `None` if `token` is not an `x`-prefixed token.
fn strip_xor_prefix(token: &str) -> Option<&str> {
    token.strip_prefix('x')
}

enum PendingClause {
    Ordinary(Vec<i32>),
    Xor(Vec<i32>),
}

/// Parses a DIMACS/XOR-CNF document into the equivalent [`XorCNF`].
///
/// Accepts leading `c`-prefixed comment lines before the header. Clause
/// tokens are read across physical newlines: a clause does not need to fit
/// on one line, and a `0` token anywhere ends the clause in progress.
pub fn parse(input: &str) -> Result<XorCNF, DimacsError> {
    let mut header: Option<Header> = None;
    let mut ordinary: Vec<Vec<i32>> = Vec::new();
    let mut xors: Vec<Vec<i32>> = Vec::new();
    let mut pending: Option<PendingClause> = None;

    for raw_line in input.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('c') && header.is_none() {
            continue;
        }
        if line.starts_with('p') {
            if header.is_some() {
                return Err(DimacsError::DuplicateHeader);
            }
            let (_, parsed) = parse_header_line(line)
                .map_err(|_| DimacsError::MalformedToken(line.to_string()))?;
            header = Some(parsed);
            continue;
        }
        if header.is_none() {
            return Err(DimacsError::MissingHeader);
        }

        for token in line.split_whitespace() {
            if pending.is_none() {
                if let Some(rest) = strip_xor_prefix(token) {
                    let lit = parse_token_i32(rest)?;
                    if lit == 0 {
                        return Err(DimacsError::MalformedToken(token.to_string()));
                    }
                    pending = Some(PendingClause::Xor(vec![lit]));
                    continue;
                }
                pending = Some(PendingClause::Ordinary(Vec::new()));
            }

            let value = parse_token_i32(token)?;
            match pending.as_mut().expect("just set above") {
                PendingClause::Ordinary(literals) | PendingClause::Xor(literals) => {
                    if value == 0 {
                        match pending.take().expect("checked Some above") {
                            PendingClause::Ordinary(literals) => ordinary.push(literals),
                            PendingClause::Xor(literals) => xors.push(literals),
                        }
                    } else {
                        literals.push(value);
                    }
                }
            }
        }
    }

    let header = header.ok_or(DimacsError::MissingHeader)?;
    if pending.is_some() {
        return Err(DimacsError::MalformedToken(
            "unterminated clause (missing trailing 0)".to_string(),
        ));
    }

    let mut cnf = CNF::new();
    for literals in ordinary {
        cnf.add_clause(&literals)?;
    }
    let mut xor_list = XorClauseList::new();
    for literals in xors {
        xor_list.add_clause(&literals)?;
    }
    cnf.raise_nvars_floor(header.nvars);

    let _ = header.nclauses; // advisory only, never checked against the actual count
    Ok(XorCNF::from_parts(cnf, xor_list))
}

fn write_clause(out: &mut String, literals: impl Iterator<Item = i32>, xor_prefix: bool) {
    let mut tokens: Vec<String> = literals.map(|l| l.to_string()).collect();
    let had_tokens = !tokens.is_empty();
    if xor_prefix {
        // the 'x' glues directly onto the first literal, no separating space
        match tokens.first_mut() {
            Some(first) => first.insert(0, 'x'),
            None => tokens.push("x".to_string()),
        }
    }
    out.push_str(&Itertools::intersperse(tokens.into_iter(), " ".to_string()).collect::<String>());
    if had_tokens || xor_prefix {
        out.push(' ');
    }
    out.push_str("0\n");
}

/// Emits `formula` as DIMACS text: header, then every ordinary clause in
/// stored order, then every parity clause (each `x`-prefixed) in stored
/// order.
pub fn emit(formula: &XorCNF) -> String {
    let cnf = formula.cnf();
    let xors = formula.xors();
    let total_clauses = cnf.len() + xors.len();

    let mut out = String::new();
    out.push_str(&format!("p cnf {} {}\n", formula.nvars(), total_clauses));

    for clause in cnf.iter() {
        write_clause(&mut out, clause.iter(), false);
    }
    for clause in xors.iter() {
        write_clause(&mut out, clause.iter(), true);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_formula() -> XorCNF {
        let cnf = CNF::from_flat(vec![1, -2, 3, 0, -4, 5, -6, 0]).unwrap();
        let xors = XorClauseList::from_flat(vec![1, 3, 6, 0, -2, 4, 5, 0]).unwrap();
        XorCNF::from_parts(cnf, xors)
    }

    #[test]
    fn emits_exact_bytes() {
        let emitted = emit(&scenario_formula());
        assert_eq!(
            emitted,
            "p cnf 6 4\n1 -2 3 0\n-4 5 -6 0\nx1 3 6 0\nx-2 4 5 0\n"
        );
    }

    #[test]
    fn round_trips_through_parse() {
        let formula = scenario_formula();
        let emitted = emit(&formula);
        let parsed = parse(&emitted).unwrap();
        assert_eq!(parsed, formula);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse(""), Err(DimacsError::MissingHeader));
    }

    #[test]
    fn rejects_non_integer_clause_count() {
        assert!(matches!(parse("p cnf 6 x\n"), Err(DimacsError::MalformedToken(_))));
    }

    #[test]
    fn rejects_non_integer_var_count() {
        assert!(matches!(parse("p cnf x 0\n"), Err(DimacsError::MalformedToken(_))));
    }

    #[test]
    fn rejects_duplicate_header() {
        assert_eq!(
            parse("p cnf 6 0\np cnf 6 0\n"),
            Err(DimacsError::DuplicateHeader)
        );
    }

    #[test]
    fn declared_clause_count_is_advisory() {
        let parsed = parse("p cnf 3 100\n1 2 3 0\n").unwrap();
        assert_eq!(parsed.cnf().len(), 1);
        assert_eq!(parsed.nvars(), 3);
    }

    #[test]
    fn clause_may_span_multiple_lines() {
        let parsed = parse("p cnf 3 1\n1 2\n3 0\n").unwrap();
        assert_eq!(parsed.cnf().len(), 1);
        assert_eq!(parsed.cnf().get(0).unwrap().iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn leading_comments_are_skipped() {
        let parsed = parse("c a comment\nc another\np cnf 2 1\n1 2 0\n").unwrap();
        assert_eq!(parsed.cnf().len(), 1);
    }

    #[test]
    fn missing_header_before_clauses_fails() {
        assert_eq!(parse("1 2 0\n"), Err(DimacsError::MissingHeader));
    }

    #[test]
    fn nvars_is_max_of_header_and_observed_literals() {
        let parsed = parse("p cnf 2 1\n1 2 9 0\n").unwrap();
        assert_eq!(parsed.nvars(), 9);

        let parsed = parse("p cnf 9 1\n1 2 0\n").unwrap();
        assert_eq!(parsed.nvars(), 9);
    }
}
