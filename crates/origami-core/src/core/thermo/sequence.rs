use super::ThermoError;

/// Watson-Crick partner of a base, `None` for anything outside `ACGT`.
#[inline]
pub fn complementary_base(base: char) -> Option<char> {
    match base {
        'A' => Some('T'),
        'T' => Some('A'),
        'G' => Some('C'),
        'C' => Some('G'),
        _ => None,
    }
}

/// Rejects empty sequences and any character outside `ACGT`.
pub fn validate_sequence(seq: &str) -> Result<(), ThermoError> {
    if seq.is_empty() {
        return Err(ThermoError::EmptySequence);
    }
    match seq.chars().find(|&b| complementary_base(b).is_none()) {
        Some(base) => Err(ThermoError::InvalidBase {
            sequence: seq.to_string(),
            base,
        }),
        None => Ok(()),
    }
}

/// Base-by-base complement of `seq`, in the same (not reversed) order.
pub fn calc_comp_seq(seq: &str) -> Result<String, ThermoError> {
    validate_sequence(seq)?;
    Ok(seq.chars().filter_map(complementary_base).collect())
}

/// Reverse complement of `seq`, i.e. the antiparallel partner strand read 5' to 3'.
pub fn calc_rev_comp_seq(seq: &str) -> Result<String, ThermoError> {
    Ok(calc_comp_seq(seq)?.chars().rev().collect())
}

/// True iff `seq` equals the reverse of its own complement.
pub fn seq_is_palindromic(seq: &str) -> Result<bool, ThermoError> {
    Ok(calc_rev_comp_seq(seq)? == seq)
}

/// Finds every longest contiguous stretch of `seq_i` that can pair antiparallel with a
/// stretch of `seq_j`.
///
/// The returned subsequences are taken from `seq_i`, are distinct, and are ordered by their
/// first occurrence. An empty vector means no single base pair can form.
pub fn find_longest_contig_complement(
    seq_i: &str,
    seq_j: &str,
) -> Result<Vec<String>, ThermoError> {
    validate_sequence(seq_i)?;
    let partner: Vec<char> = calc_rev_comp_seq(seq_j)?.chars().collect();
    let bases: Vec<char> = seq_i.chars().collect();

    // Longest common substring of seq_i and the reverse complement of seq_j.
    let mut run = vec![0usize; partner.len() + 1];
    let mut longest = 0;
    let mut ends: Vec<usize> = Vec::new();
    for (a, &base) in bases.iter().enumerate() {
        let mut previous_diagonal = 0;
        for (b, &partner_base) in partner.iter().enumerate() {
            let above = run[b + 1];
            run[b + 1] = if base == partner_base {
                previous_diagonal + 1
            } else {
                0
            };
            previous_diagonal = above;

            let length = run[b + 1];
            if length > longest {
                longest = length;
                ends.clear();
                ends.push(a + 1);
            } else if length == longest && length > 0 && !ends.contains(&(a + 1)) {
                ends.push(a + 1);
            }
        }
    }

    let mut contigs: Vec<String> = Vec::new();
    for end in ends {
        let contig: String = bases[end - longest..end].iter().collect();
        if !contigs.contains(&contig) {
            contigs.push(contig);
        }
    }
    Ok(contigs)
}
