//! A-priori win odds for one die against another.

use super::Die;

/// Probability that `a` strictly beats `b`, over the full ordered cross
/// product of face pairs. Ties count for neither side, so the reported
/// figure understates the chance of "not losing".
pub fn win_probability(a: &Die, b: &Die) -> f64 {
    pair_fraction(a, b, |u, c| u > c)
}

/// Probability that `a` and `b` show equal values
pub fn tie_probability(a: &Die, b: &Die) -> f64 {
    pair_fraction(a, b, |u, c| u == c)
}

fn pair_fraction(a: &Die, b: &Die, hit: impl Fn(i64, i64) -> bool) -> f64 {
    let hits = a
        .faces()
        .iter()
        .flat_map(|&u| b.faces().iter().map(move |&c| (u, c)))
        .filter(|&(u, c)| hit(u, c))
        .count();
    hits as f64 / (a.faces().len() * b.faces().len()) as f64
}
