#![allow(dead_code)]

use wavefront_aligner::ScoreParams;

const NEG_INF: i32 = i32::MIN / 2;

/// Row-major Gotoh over full `(len_t + 1) x (len_d + 1)` matrices.
pub fn reference_score(target: &[u8], database: &[u8], scoring: &ScoreParams) -> u32 {
    let rows = target.len() + 1;
    let cols = database.len() + 1;
    let mut d = vec![vec![0i32; cols]; rows];
    let mut p = vec![vec![NEG_INF; cols]; rows];
    let mut q = vec![vec![NEG_INF; cols]; rows];

    let gap_first = scoring.gap_open + scoring.gap_ext;
    let mut max_score = 0;
    for i in 1..rows {
        for j in 1..cols {
            p[i][j] = (p[i - 1][j] + scoring.gap_ext).max(d[i - 1][j] + gap_first);
            q[i][j] = (q[i][j - 1] + scoring.gap_ext).max(d[i][j - 1] + gap_first);

            let substitution = if target[i - 1] == database[j - 1] {
                scoring.match_score
            } else {
                scoring.mismatch
            };
            d[i][j] = (d[i - 1][j - 1] + substitution)
                .max(0)
                .max(p[i][j])
                .max(q[i][j]);
            max_score = max_score.max(d[i][j]);
        }
    }
    max_score as u32
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
