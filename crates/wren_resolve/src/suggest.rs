//! "Did you mean" suggestions for undefined names.

/// How many edits away a name may be and still get suggested.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Pick the candidate closest to `name`, if any is within the
/// suggestion distance. Ties keep the earliest candidate.
pub fn suggest(name: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter(|candidate| **candidate != name)
        .map(|candidate| (edit_distance(name, candidate), *candidate))
        .filter(|&(distance, _)| distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|&(distance, _)| distance)
        .map(|(_, candidate)| candidate.to_string())
}

/// Edit distance, computed one dynamic-programming row at a time.
/// The cell diagonally up-left is carried in `diagonal` rather than
/// in a second row.
fn edit_distance(from: &str, to: &str) -> usize {
    let to: Vec<char> = to.chars().collect();
    let mut row: Vec<usize> = (0..=to.len()).collect();

    for (i, from_char) in from.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &to_char) in to.iter().enumerate() {
            let substitution = if from_char == to_char {
                diagonal
            } else {
                diagonal + 1
            };
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[to.len()]
}
