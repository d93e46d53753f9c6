//! Extracts the midpoint of each reaction's P-T samples. The renderer places
//! reaction labels at these midpoints; the computation itself is plain data
//! work over the sample vectors, so it lives here and not in any plotting
//! code.

use crate::RxnData::records::ReactionRecord;

/// label anchor of one reaction curve
#[derive(Debug, Clone, PartialEq)]
pub struct CurveMidpoint {
    pub id: String,
    pub rxn: String,
    pub t: f64,
    pub p: f64,
}

/// One midpoint per reaction that has at least one finite (T, P) sample.
/// Samples are sorted by temperature first; an odd sample count takes the
/// central sample, an even count averages the two central ones. Rows without
/// finite samples are skipped.
pub fn calculate_curve_midpoints(records: &[ReactionRecord]) -> Vec<CurveMidpoint> {
    let mut midpoints = Vec::new();
    for record in records {
        let mut samples: Vec<(f64, f64)> = record
            .t_mid
            .iter()
            .zip(record.p_mid.iter())
            .filter(|(t, p)| t.is_finite() && p.is_finite())
            .map(|(t, p)| (*t, *p))
            .collect();
        if samples.is_empty() {
            continue;
        }
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        let n = samples.len();
        let (t, p) = if n % 2 == 1 {
            samples[n / 2]
        } else {
            let (t1, p1) = samples[n / 2 - 1];
            let (t2, p2) = samples[n / 2];
            ((t1 + t2) / 2.0, (p1 + p2) / 2.0)
        };
        midpoints.push(CurveMidpoint {
            id: record.id.clone(),
            rxn: record.rxn.clone(),
            t,
            p,
        });
    }
    midpoints
}
