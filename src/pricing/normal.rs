//! Univariate and bivariate standard normal distribution functions.

use std::f64::consts::PI;

/// Standard normal CDF, Zelen & Severo rational approximation
/// (Abramowitz and Stegun 26.2.17, absolute error below 7.5e-8).
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    const B1: f64 = 0.319_381_5;
    const B2: f64 = -0.356_563_8;
    const B3: f64 = 1.781_478;
    const B4: f64 = -1.821_256;
    const B5: f64 = 1.330_274;
    const P: f64 = 0.231_641_9;

    let t = 1.0 / (1.0 + P * x.abs());
    let tail = norm_pdf(x) * t * (B1 + t * (B2 + t * (B3 + t * (B4 + t * B5))));
    if x > 0.0 { 1.0 - tail } else { tail }
}

/// Standard normal probability density.
#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Inverse standard normal CDF (Acklam's rational approximation, relative
/// error below 1.2e-9). Returns NaN outside `(0, 1)`.
#[must_use]
pub fn norm_inv(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_276_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;

    if !(p > 0.0 && p < 1.0) {
        return f64::NAN;
    }

    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

// Gauss-Legendre half-abscissas and weights for 6, 12 and 20 point rules.
const GL3_W: [f64; 3] = [0.171_324_492_379_17, 0.360_761_573_048_138, 0.467_913_934_572_69];
const GL3_X: [f64; 3] = [-0.932_469_514_203_152, -0.661_209_386_466_265, -0.238_619_186_083_197];

const GL6_W: [f64; 6] = [
    0.047_175_336_386_511_8,
    0.106_939_325_995_318,
    0.160_078_328_543_346,
    0.203_167_426_723_066,
    0.233_492_536_538_355,
    0.249_147_045_813_403,
];
const GL6_X: [f64; 6] = [
    -0.981_560_634_246_719,
    -0.904_117_256_370_475,
    -0.769_902_674_194_305,
    -0.587_317_954_286_617,
    -0.367_831_498_998_18,
    -0.125_233_408_511_469,
];

const GL10_W: [f64; 10] = [
    0.017_614_007_139_152_1,
    0.040_601_429_800_386_9,
    0.062_672_048_334_109_1,
    0.083_276_741_576_704_8,
    0.101_930_119_817_24,
    0.118_194_531_961_518,
    0.131_688_638_449_177,
    0.142_096_109_318_382,
    0.149_172_986_472_604,
    0.152_753_387_130_726,
];
const GL10_X: [f64; 10] = [
    -0.993_128_599_185_095,
    -0.963_971_927_277_914,
    -0.912_234_428_251_326,
    -0.839_116_971_822_219,
    -0.746_331_906_460_151,
    -0.636_053_680_726_515,
    -0.510_867_001_950_827,
    -0.373_706_088_715_42,
    -0.227_785_851_141_645,
    -0.076_526_521_133_497_3,
];

/// Bivariate standard normal CDF `P(X < x, Y < y)` with correlation `rho`.
///
/// Genz (2004) algorithm using Gauss-Legendre quadrature; accurate to
/// about 1e-15 given an exact univariate CDF.
#[must_use]
pub fn bivariate_norm_cdf(x: f64, y: f64, rho: f64) -> f64 {
    let (weights, nodes): (&[f64], &[f64]) = if rho.abs() < 0.3 {
        (&GL3_W, &GL3_X)
    } else if rho.abs() < 0.75 {
        (&GL6_W, &GL6_X)
    } else {
        (&GL10_W, &GL10_X)
    };

    let h = -x;
    let mut k = -y;
    let mut hk = h * k;
    let mut bvn = 0.0;

    if rho.abs() < 0.925 {
        if rho.abs() > 0.0 {
            let hs = (h * h + k * k) / 2.0;
            let asr = rho.asin();
            for (w, node) in weights.iter().zip(nodes) {
                for sign in [-1.0, 1.0] {
                    let sn = (asr * (sign * node + 1.0) / 2.0).sin();
                    bvn += w * ((sn * hk - hs) / (1.0 - sn * sn)).exp();
                }
            }
            bvn *= asr / (4.0 * PI);
        }
        return bvn + norm_cdf(-h) * norm_cdf(-k);
    }

    if rho < 0.0 {
        k = -k;
        hk = -hk;
    }

    if rho.abs() < 1.0 {
        let ass = (1.0 - rho) * (1.0 + rho);
        let mut a = ass.sqrt();
        let bs = (h - k).powi(2);
        let c = (4.0 - hk) / 8.0;
        let d = (12.0 - hk) / 16.0;

        let asr = -(bs / ass + hk) / 2.0;
        if asr > -100.0 {
            bvn = a
                * asr.exp()
                * (1.0 - c * (bs - ass) * (1.0 - d * bs / 5.0) / 3.0 + c * d * ass * ass / 5.0);
        }
        if -hk < 100.0 {
            let b = bs.sqrt();
            bvn -= (-hk / 2.0).exp()
                * (2.0 * PI).sqrt()
                * norm_cdf(-b / a)
                * b
                * (1.0 - c * bs * (1.0 - d * bs / 5.0) / 3.0);
        }

        a /= 2.0;
        for (w, node) in weights.iter().zip(nodes) {
            for sign in [-1.0, 1.0] {
                let xs = (a * (sign * node + 1.0)).powi(2);
                let rs = (1.0 - xs).sqrt();
                let asr = -(bs / xs + hk) / 2.0;
                if asr > -100.0 {
                    bvn += a
                        * w
                        * asr.exp()
                        * ((-hk * (1.0 - rs) / (2.0 * (1.0 + rs))).exp() / rs
                            - (1.0 + c * xs * (1.0 + d * xs)));
                }
            }
        }
        bvn = -bvn / (2.0 * PI);
    }

    if rho > 0.0 {
        bvn + norm_cdf(-h.max(k))
    } else {
        let mut bvn = -bvn;
        if k > h {
            bvn += norm_cdf(k) - norm_cdf(h);
        }
        bvn
    }
}
