//! Synthetic aggregates generation.
//!
//! Produces CSV bytes schema-identical to the real dataset exports so the
//! chart can be exercised (TUI demos, tests, `sentiment sample`) without the
//! published files. Generation is deterministic for a given
//! (scheme, metric, seed) triple, and every series carries one interior run
//! of missing values so the dashed gap reconstruction always has work to do.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{GroupLabel, GroupingScheme};
use crate::error::AppError;

pub const FIRST_YEAR: i32 = 2000;
pub const LAST_YEAR: i32 = 2024;

/// Year-to-year noise on top of the drifting base level.
const NOISE_STD: f64 = 0.008;

/// Generate one scheme's CSV with a `year` column, the scheme's grouping
/// column (grouped schemes only), and one value column named `metric`.
pub fn sample_csv(scheme: GroupingScheme, metric: &str, seed: u64) -> Result<Vec<u8>, AppError> {
    let mut rng = StdRng::seed_from_u64(mix_seed(scheme, metric, seed));
    let normal = Normal::new(0.0, NOISE_STD)
        .map_err(|e| AppError::runtime(format!("Noise distribution error: {e}")))?;

    let mut writer = csv::Writer::from_writer(Vec::new());

    let header: Vec<&str> = match scheme.group_column() {
        Some(col) => vec!["year", col, metric],
        None => vec!["year", metric],
    };
    writer
        .write_record(&header)
        .map_err(|e| AppError::runtime(format!("CSV write error: {e}")))?;

    for (i, &label) in scheme.members().iter().enumerate() {
        // Stagger the base level per member so the series separate visually.
        let base = 0.18 + i as f64 * 0.03;
        let drift = rng.gen_range(-0.002..0.002);
        let (gap_start, gap_len) = pick_gap(&mut rng);

        for year in FIRST_YEAR..=LAST_YEAR {
            let offset = year - FIRST_YEAR;
            let missing = offset >= gap_start && offset < gap_start + gap_len;
            let value = if missing {
                String::new()
            } else {
                let level = base + drift * offset as f64 + normal.sample(&mut rng);
                format!("{:.4}", level.clamp(0.12, 0.37))
            };

            let year_s = year.to_string();
            let record: Vec<&str> = match scheme.group_column() {
                Some(_) => vec![&year_s, label.csv_name(), &value],
                None => vec![&year_s, &value],
            };
            writer
                .write_record(&record)
                .map_err(|e| AppError::runtime(format!("CSV write error: {e}")))?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| AppError::runtime(format!("CSV flush error: {e}")))
}

/// Choose an interior missing stretch: never the first or last year, so the
/// gap always has anchors on both sides.
fn pick_gap(rng: &mut StdRng) -> (i32, i32) {
    let span = LAST_YEAR - FIRST_YEAR;
    let gap_len = rng.gen_range(1..=3);
    let gap_start = rng.gen_range(1..span - gap_len);
    (gap_start, gap_len)
}

fn mix_seed(scheme: GroupingScheme, metric: &str, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    scheme.csv_file().hash(&mut hasher);
    metric.hash(&mut hasher);
    seed.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::parse_rows;

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = sample_csv(GroupingScheme::Region, "sentiment", 7).unwrap();
        let b = sample_csv(GroupingScheme::Region, "sentiment", 7).unwrap();
        let c = sample_csv(GroupingScheme::Region, "sentiment", 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn samples_round_trip_through_ingest() {
        for scheme in GroupingScheme::ALL {
            let bytes = sample_csv(scheme, "sentiment", 42).unwrap();
            let out = parse_rows(&bytes, scheme, "sentiment").unwrap();

            let expected =
                scheme.members().len() * (LAST_YEAR - FIRST_YEAR + 1) as usize;
            assert_eq!(out.rows_used(), expected);
            assert!(out.row_errors.is_empty(), "row errors for {scheme:?}");

            // Every member has some values and some missing years.
            for &label in scheme.members() {
                let series: Vec<_> =
                    out.rows.iter().filter(|r| r.group == label).collect();
                assert!(series.iter().any(|r| r.value.is_some()));
                assert!(series.iter().any(|r| r.value.is_none()));
                // First and last years are always present, so the gap is
                // interior.
                assert!(series.first().unwrap().value.is_some());
                assert!(series.last().unwrap().value.is_some());
            }
        }
    }

    #[test]
    fn values_stay_inside_the_fixed_y_domain() {
        let bytes = sample_csv(GroupingScheme::FullDataset, "sentiment", 1).unwrap();
        let out = parse_rows(&bytes, GroupingScheme::FullDataset, "sentiment").unwrap();
        for row in out.rows {
            if let Some(v) = row.value {
                assert!((0.12..=0.37).contains(&v));
            }
        }
    }
}
