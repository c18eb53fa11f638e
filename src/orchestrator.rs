//! Full conformance run across the conversion matrix.
//!
//! The orchestrator walks every supported (source float, destination int)
//! pair in a fixed order, and for each pair runs:
//!
//! 1. the edge battery: canonical values broadcast to all lanes, exact for
//!    finite values and relaxed for Inf/NaN;
//! 2. the iota battery: an arithmetic progression masked to the
//!    destination's safe magnitude;
//! 3. `reps * rep_multiplier` in-range batteries: uniformly sampled
//!    in-range vectors, each also re-run with Inf/NaN planted in alternate
//!    lanes to prove special values stay confined to their own lane;
//! 4. the same count of out-of-range batteries under the relaxed
//!    two-valued invariant.
//!
//! Widening pairs additionally get the half-width selection battery
//! (lower/upper/even/odd). Execution is single-threaded and strictly
//! sequential; the first failing lane aborts the whole run with full
//! reproduction context. Random state is reseeded per pair from the
//! configured seed, so a failure replays deterministically within a run.

use crate::arith::ArithFloat;
use crate::bounds::ConversionBounds;
use crate::checker::{check_exact, check_interleaved, check_relaxed, CheckContext};
use crate::convert::ConversionProvider;
use crate::edge::EdgeCases;
use crate::error::{ensure, Result};
use crate::sampler::{BitStream, InRangeSampler, OutOfRangeSampler};
use crate::types::{DestInt, SourceFloat};
use half::f16;
use serde::{Deserialize, Serialize};

/// Repetition count for each sampling battery before scaling.
pub const DEFAULT_REPS: usize = 200;

/// Knobs for a conformance run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Base seed; each pair derives its own stream from this
    pub seed: u64,
    /// Repetitions of each sampling battery
    pub reps: usize,
    /// Multiplier applied to `reps` (mirrors slow-target scaling)
    pub rep_multiplier: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            reps: DEFAULT_REPS,
            rep_multiplier: 1,
        }
    }
}

impl HarnessConfig {
    fn total_reps(&self) -> usize {
        self.reps * self.rep_multiplier
    }
}

/// Outcome of one pair's batteries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairReport {
    /// Type pair name, e.g. `f32->i32`
    pub pair: String,
    /// Lane count the backend declared for this pair
    pub lanes: usize,
    /// Vectors validated under the exact invariant
    pub exact_vectors: u64,
    /// Vectors validated under the relaxed invariant
    pub relaxed_vectors: u64,
}

/// Outcome of a full conformance run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-pair results in execution order
    pub pairs: Vec<PairReport>,
    /// Pairs the provider declared unsupported
    pub skipped: Vec<String>,
}

/// Run the full conversion matrix against `provider`.
///
/// Pair order matches hardware capability tiers: f16 sources first (when
/// supported), then f32 same-width, f32 widening, f64 narrowing, and f64
/// same-width, followed by the half-width selection batteries for the
/// widening pairs.
///
/// # Errors
///
/// The first conformance failure or harness invariant violation aborts the
/// run; see [`crate::ConvalidarError`] for the context carried.
pub fn run_all<P: ConversionProvider>(provider: &P, config: &HarnessConfig) -> Result<RunReport> {
    let mut report = RunReport::default();
    let mut ordinal = 0u64;

    run_pair::<f16, i16, P>(provider, config, &mut report, &mut ordinal)?;
    run_pair::<f16, u16, P>(provider, config, &mut report, &mut ordinal)?;
    run_pair::<f32, i32, P>(provider, config, &mut report, &mut ordinal)?;
    run_pair::<f32, u32, P>(provider, config, &mut report, &mut ordinal)?;
    run_pair::<f32, i64, P>(provider, config, &mut report, &mut ordinal)?;
    run_pair::<f32, u64, P>(provider, config, &mut report, &mut ordinal)?;
    run_pair::<f64, i32, P>(provider, config, &mut report, &mut ordinal)?;
    run_pair::<f64, u32, P>(provider, config, &mut report, &mut ordinal)?;
    run_pair::<f64, i64, P>(provider, config, &mut report, &mut ordinal)?;
    run_pair::<f64, u64, P>(provider, config, &mut report, &mut ordinal)?;

    run_half_width::<f32, i64, P>(provider, &mut report)?;
    run_half_width::<f32, u64, P>(provider, &mut report)?;

    Ok(report)
}

fn pair_name<F: SourceFloat, I: DestInt>() -> String {
    format!("{}->{}", F::NAME, I::NAME)
}

fn run_pair<F: SourceFloat, I: DestInt, P: ConversionProvider>(
    provider: &P,
    config: &HarnessConfig,
    report: &mut RunReport,
    ordinal: &mut u64,
) -> Result<()> {
    let pair = pair_name::<F, I>();
    *ordinal += 1;

    let Some(conv) = provider.converter::<F, I>() else {
        report.skipped.push(pair);
        return Ok(());
    };

    let n = conv.lanes();
    ensure(n >= 2 && n % 2 == 0, "lane count is even and >= 2", || {
        format!("{pair}: lanes = {n}")
    })?;

    let bounds = ConversionBounds::<F>::compute::<I>()?;
    let edges = EdgeCases::new(&bounds);

    // Scratch lane vectors, scoped to this pair's batteries
    let mut src = vec![edges.zero; n];
    let mut dst = vec![I::from_u64_bits(0); n];

    let mut pair_report = PairReport {
        pair: pair.clone(),
        lanes: n,
        exact_vectors: 0,
        relaxed_vectors: 0,
    };

    // --- edge battery: exact invariant on canonical finite values -------
    let mut exact_edges = vec![edges.zero, edges.one, edges.lowest, edges.highest];
    if I::SIGNED {
        exact_edges.push(edges.neg_one);
    }
    for value in exact_edges {
        src.fill(value);
        conv.fast_convert(&src, &mut dst);
        let ctx = CheckContext {
            pair: &pair,
            battery: "edge",
            rep: 0,
        };
        check_exact(&ctx, &src, &dst)?;
        pair_report.exact_vectors += 1;
    }

    // --- edge battery: relaxed invariant on Inf/NaN ----------------------
    for value in [edges.pos_inf, edges.neg_inf, edges.pos_nan, edges.neg_nan] {
        src.fill(value);
        conv.fast_convert(&src, &mut dst);
        let ctx = CheckContext {
            pair: &pair,
            battery: "edge-special",
            rep: 0,
        };
        check_relaxed(&ctx, &src, &dst)?;
        pair_report.relaxed_vectors += 1;
    }

    // --- iota battery: arithmetic progression inside the safe magnitude --
    let iota_mask = F::mantissa_mask64() & (I::MAX_U64 / 2);
    for (i, lane) in src.iter_mut().enumerate() {
        let value = (i as u64 & iota_mask) + 1;
        *lane = F::from_arith(<F::Arith as ArithFloat>::from_f64_lossy(value as f64));
    }
    conv.fast_convert(&src, &mut dst);
    let ctx = CheckContext {
        pair: &pair,
        battery: "iota",
        rep: 0,
    };
    check_exact(&ctx, &src, &dst)?;
    pair_report.exact_vectors += 1;

    // --- in-range sampling battery ---------------------------------------
    let mut stream = BitStream::seeded(config.seed.wrapping_add(*ordinal));
    let in_sampler = InRangeSampler::<F>::new::<I>(&bounds)?;
    let specials = [
        ("in-range+pos-nan", edges.pos_nan),
        ("in-range+neg-nan", edges.neg_nan),
        ("in-range+pos-inf", edges.pos_inf),
        ("in-range+neg-inf", edges.neg_inf),
    ];

    for rep in 0..config.total_reps() {
        for lane in &mut src {
            *lane = in_sampler.sample(&mut stream)?;
        }
        conv.fast_convert(&src, &mut dst);
        let ctx = CheckContext {
            pair: &pair,
            battery: "in-range",
            rep,
        };
        check_exact(&ctx, &src, &dst)?;
        pair_report.exact_vectors += 1;

        for (battery, special) in specials {
            let ctx = CheckContext {
                pair: &pair,
                battery,
                rep,
            };
            check_interleaved(&ctx, conv, &src, special)?;
            pair_report.exact_vectors += 1;
        }
    }

    // --- out-of-range sampling battery ------------------------------------
    let out_sampler = OutOfRangeSampler::new(&bounds)?;
    for rep in 0..config.total_reps() {
        for lane in &mut src {
            *lane = out_sampler.sample(&mut stream)?;
        }
        conv.fast_convert(&src, &mut dst);
        let ctx = CheckContext {
            pair: &pair,
            battery: "out-of-range",
            rep,
        };
        check_relaxed(&ctx, &src, &dst)?;
        pair_report.relaxed_vectors += 1;
    }

    report.pairs.push(pair_report);
    Ok(())
}

/// Half-width selection battery for a widening pair.
fn run_half_width<F: SourceFloat, I: DestInt, P: ConversionProvider>(
    provider: &P,
    report: &mut RunReport,
) -> Result<()> {
    let pair = format!("{} (half-width)", pair_name::<F, I>());

    let Some(conv) = provider.converter::<F, I>() else {
        report.skipped.push(pair);
        return Ok(());
    };
    if !conv.half_width_supported() {
        report.skipped.push(pair);
        return Ok(());
    }

    let n = conv.lanes();
    ensure(n >= 2 && n % 2 == 0, "lane count is even and >= 2", || {
        format!("{pair}: lanes = {n}")
    })?;

    let iota_mask = F::mantissa_mask64() & (I::MAX_U64 / 2);
    let src: Vec<F> = (0..n)
        .map(|i| {
            let value = (i as u64 & iota_mask) + 1;
            F::from_arith(<F::Arith as ArithFloat>::from_f64_lossy(value as f64))
        })
        .collect();
    let mut dst = vec![I::from_u64_bits(0); n / 2];

    let mut pair_report = PairReport {
        pair: pair.clone(),
        lanes: n,
        exact_vectors: 0,
        relaxed_vectors: 0,
    };
    let mut check = |battery: &'static str, selected: &[F], dst: &[I]| -> Result<()> {
        let ctx = CheckContext {
            pair: &pair,
            battery,
            rep: 0,
        };
        check_exact(&ctx, selected, dst)?;
        pair_report.exact_vectors += 1;
        Ok(())
    };

    conv.fast_promote_lower(&src, &mut dst);
    check("promote-lower", &src[..n / 2], &dst)?;

    conv.fast_promote_upper(&src, &mut dst);
    check("promote-upper", &src[n / 2..], &dst)?;

    let even_lanes: Vec<F> = src.iter().copied().step_by(2).collect();
    conv.fast_promote_even(&src, &mut dst);
    check("promote-even", &even_lanes, &dst)?;

    let odd_lanes: Vec<F> = src.iter().copied().skip(1).step_by(2).collect();
    conv.fast_promote_odd(&src, &mut dst);
    check("promote-odd", &odd_lanes, &dst)?;

    report.pairs.push(pair_report);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSimd;

    fn quick_config() -> HarnessConfig {
        HarnessConfig {
            seed: 7,
            reps: 10,
            rep_multiplier: 1,
        }
    }

    #[test]
    fn test_run_all_against_mock() {
        let report = run_all(&MockSimd::new(8), &quick_config()).unwrap();
        assert_eq!(report.pairs.len(), 12);
        assert!(report.skipped.is_empty());
        assert!(report.pairs.iter().all(|p| p.exact_vectors > 0));
    }

    #[test]
    fn test_rep_multiplier_scales_batteries() {
        let mut config = quick_config();
        config.reps = 4;
        config.rep_multiplier = 3;
        let report = run_all(&MockSimd::new(4), &config).unwrap();
        // per full pair: 12 relaxed = 4 edge specials + 12 out-of-range reps
        let first = &report.pairs[0];
        assert_eq!(first.relaxed_vectors, 4 + 12);
    }

    #[test]
    fn test_default_config_matches_protocol() {
        let config = HarnessConfig::default();
        assert_eq!(config.reps, DEFAULT_REPS);
        assert_eq!(config.total_reps(), 200);
    }
}
