use std::fs;

use bit_set::BitSet;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, space1};
use nom::combinator::map_res;
use nom::sequence::{preceded, separated_pair, tuple};

use crate::error::KvcsError;


/// reads an instance from file, returns (n,m,adj_list)
pub fn read_from_file(filename:&str) -> Result<(usize, usize, Vec<Vec<usize>>), KvcsError> {
    let content = fs::read_to_string(filename)
        .map_err(|source| KvcsError::Io { path: filename.to_string(), source })?;
    read_from_str(&content)
}

/** reads an instance from a string, returns (n,m,adj_list).
duplicated edges (in any direction) are only counted once, self-loops are ignored.
m is the number of distinct edges read (not the number announced by the header).
*/
pub fn read_from_str(content:&str) -> Result<(usize, usize, Vec<Vec<usize>>), KvcsError> {
    let mut header:Option<usize> = None;
    let mut adj_list:Vec<Vec<usize>> = Vec::new();
    let mut adj_matrix:Vec<BitSet> = Vec::new();
    let mut m = 0;
    for (i,raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('c') { continue; }
        if let Ok((_,(n,_))) = read_header(line) {
            header = Some(n);
            adj_list = vec![Vec::new() ; n];
            adj_matrix = vec![BitSet::with_capacity(n) ; n];
            continue;
        }
        match read_edge(line) {
            Ok((_,(a,b))) => {
                let n = header.ok_or(KvcsError::MissingHeader(i+1))?;
                if a == 0 || b == 0 || a > n || b > n {
                    return Err(KvcsError::VertexOutOfRange { u:a, v:b, n });
                }
                let (a,b) = (a-1, b-1); // WARNING: indices start at 1 in the DIMACS format
                if a != b && !adj_matrix[a].contains(b) {
                    adj_matrix[a].insert(b);
                    adj_matrix[b].insert(a);
                    adj_list[a].push(b);
                    adj_list[b].push(a);
                    m += 1;
                }
            }
            Err(_) => return Err(KvcsError::Format { line: i+1, content: raw_line.to_string() })
        }
    }
    match header {
        None => Err(KvcsError::Format { line: 0, content: "no problem line".to_string() }),
        Some(n) => Ok((n, m, adj_list)),
    }
}

/// reads a non-negative integer
fn integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    separated_pair(integer, space1, integer)(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("p"), space1, alt((tag("edge"), tag("col"))), space1)),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(tuple((tag("e"), space1)), read_two_integers)(s)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_instance() {
        let (n,m,adj) = read_from_file("insts/c5.col").unwrap();
        assert_eq!(n, 5);
        assert_eq!(m, 5);
        assert_eq!(adj[0], vec![1,4]);
    }

    #[test]
    fn test_read_header() {
        let s = "p edge 2 1";
        assert_eq!(read_header(s).unwrap().1, (2,1));
    }

    #[test]
    fn test_read_header_col() {
        let s = "p col 2 1";
        assert_eq!(read_header(s).unwrap().0, "");
        assert_eq!(read_header(s).unwrap().1, (2,1));
    }

    #[test]
    fn test_read_edge() {
        let s = "e 1 2";
        assert_eq!(read_edge(s).unwrap().1, (1,2));
        assert_eq!(read_edge(s).unwrap().0, "");
    }

    #[test]
    fn test_comments_and_duplicates() {
        let s = "c this is a test comment\n\np edge 3 3\ne 1 2\ne 2 1\n  e 2 3\ne 3 3\n";
        let (n,m,adj) = read_from_str(s).unwrap();
        assert_eq!((n,m), (3,2));
        assert_eq!(adj[1], vec![0,2]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(read_from_str("e 1 2\n"), Err(KvcsError::MissingHeader(1))));
        assert!(matches!(
            read_from_str("p edge 2 1\ne 1 3\n"),
            Err(KvcsError::VertexOutOfRange { u:1, v:3, n:2 })
        ));
        assert!(matches!(read_from_str("p edge 2 1\nx 1 2\n"), Err(KvcsError::Format { line:2, .. })));
        assert!(matches!(read_from_file("insts/does_not_exist.col"), Err(KvcsError::Io { .. })));
    }
}
