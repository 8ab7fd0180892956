//! Trigonometric kernels built on the Cephes polynomial approximations.
//!
//! These do not round the same way as the platform `libm` behind `f64::sin`
//! and friends: `tan(1.0)` gives `1.557407724654902` here, one ulp below
//! `f64::tan` on glibc. Only basic IEEE operations are used, so results are
//! the same on every platform.

use std::f64::consts::{FRAC_2_PI, FRAC_PI_2, FRAC_PI_4};

/// Arguments at or above this go through the Payne-Hanek reduction
const REDUCE_THRESHOLD: f64 = (1u64 << 29) as f64;

/// 4/π rounded to the nearest `f64`
const FOUR_OVER_PI: f64 = 2.0 * FRAC_2_PI;

/// π/4 split into three parts, for extended precision reduction
const PI4A: f64 = 7.853_981_256_484_985_351_56e-1;
const PI4B: f64 = 3.774_894_707_930_798_176_68e-8;
const PI4C: f64 = 2.695_151_429_079_059_526_45e-15;

const SIN: [f64; 6] = [
    1.589_623_015_765_465_680_60e-10,
    -2.505_074_776_285_780_728_66e-8,
    2.755_731_362_138_572_452_13e-6,
    -1.984_126_982_958_953_859_96e-4,
    8.333_333_333_322_118_588_78e-3,
    -1.666_666_666_666_663_072_95e-1,
];

const COS: [f64; 6] = [
    -1.135_853_652_138_768_173_00e-11,
    2.087_570_084_197_473_167_78e-9,
    -2.755_731_417_929_673_881_12e-7,
    2.480_158_728_885_170_453_48e-5,
    -1.388_888_888_887_305_641_16e-3,
    4.166_666_666_666_659_292_18e-2,
];

const TAN_P: [f64; 3] = [
    -1.309_369_391_813_837_776_46e4,
    1.153_516_648_385_874_161_40e6,
    -1.795_652_519_764_848_779_88e7,
];

const TAN_Q: [f64; 4] = [
    1.368_129_634_706_929_546_78e4,
    -1.320_892_344_402_109_674_47e6,
    2.500_838_018_233_579_158_39e7,
    -5.386_957_559_294_546_298_81e7,
];

const ATAN_P: [f64; 5] = [
    -8.750_608_600_031_904_122_785e-1,
    -1.615_753_718_733_365_076_637e1,
    -7.500_855_792_314_704_667_340e1,
    -1.228_866_684_490_136_173_410e2,
    -6.485_021_904_942_025_371_773e1,
];

const ATAN_Q: [f64; 5] = [
    2.485_846_490_142_306_297_962e1,
    1.650_270_098_316_988_542_046e2,
    4.328_810_604_912_902_668_951e2,
    4.853_903_996_359_136_964_868e2,
    1.945_506_571_482_613_964_425e2,
];

/// Binary digits of 4/π, the first word holding the integer part
const FOUR_OVER_PI_BITS: [u64; 20] = [
    0x0000_0000_0000_0001,
    0x45f3_06dc_9c88_2a53,
    0xf84e_afa3_ea69_bb81,
    0xb6c5_2b32_7887_2083,
    0xfca2_c757_bd77_8ac3,
    0x6e48_dc74_849b_a5c0,
    0x0c92_5dd4_13a3_2439,
    0xfc3b_d639_6253_4e7d,
    0xd104_6bea_5d76_8909,
    0xd338_e04d_68be_fc82,
    0x7323_ac73_06a6_73e9,
    0x3908_bf17_7bf2_5076,
    0x3ff1_2fff_bc0b_301f,
    0xde5e_2316_b414_da3e,
    0xda6c_fd9e_4f96_136e,
    0x9e8c_7ecd_3cbf_d45a,
    0xea4f_758f_d7cb_e2f6,
    0x7a0e_73ef_14a5_25d4,
    0xd7f6_bf62_3f1a_ba10,
    0xac06_608d_f8f6_d757,
];

const MANTISSA_BITS: u32 = 52;
const EXPONENT_MASK: u64 = 0x7ff;
const EXPONENT_BIAS: i32 = 1023;

/// Sine of `x` radians
pub fn sin(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() {
        return x;
    }
    if x.is_infinite() {
        return f64::NAN;
    }
    let (mut octant, z) = reduce(x.abs());
    let mut negative = x < 0.0;
    if octant > 3 {
        negative = !negative;
        octant -= 4;
    }
    let y = if octant == 1 || octant == 2 {
        cos_polynomial(z)
    } else {
        sin_polynomial(z)
    };
    if negative {
        -y
    } else {
        y
    }
}

/// Cosine of `x` radians
pub fn cos(x: f64) -> f64 {
    if x.is_nan() || x.is_infinite() {
        return f64::NAN;
    }
    let (mut octant, z) = reduce(x.abs());
    let mut negative = false;
    if octant > 3 {
        negative = !negative;
        octant -= 4;
    }
    if octant > 1 {
        negative = !negative;
    }
    let y = if octant == 1 || octant == 2 {
        sin_polynomial(z)
    } else {
        cos_polynomial(z)
    };
    if negative {
        -y
    } else {
        y
    }
}

/// Tangent of `x` radians
pub fn tan(x: f64) -> f64 {
    if x == 0.0 || x.is_nan() {
        return x;
    }
    if x.is_infinite() {
        return f64::NAN;
    }
    let (octant, z) = reduce(x.abs());
    let zz = z * z;
    let mut y = if zz > 1e-14 {
        z + z
            * (zz * ((TAN_P[0] * zz + TAN_P[1]) * zz + TAN_P[2])
                / ((((zz + TAN_Q[0]) * zz + TAN_Q[1]) * zz + TAN_Q[2]) * zz + TAN_Q[3]))
    } else {
        z
    };
    if octant & 2 == 2 {
        y = -1.0 / y;
    }
    if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Arcsine of `x`, in radians. `NaN` outside of [-1, 1].
pub fn asin(x: f64) -> f64 {
    if x == 0.0 {
        return x;
    }
    let abs = x.abs();
    if abs > 1.0 {
        return f64::NAN;
    }
    let root = (1.0 - abs * abs).sqrt();
    let y = if abs > 0.7 {
        FRAC_PI_2 - reduced_atan(root / abs)
    } else {
        reduced_atan(abs / root)
    };
    if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Arccosine of `x`, in radians. `NaN` outside of [-1, 1].
pub fn acos(x: f64) -> f64 {
    FRAC_PI_2 - asin(x)
}

/// Arctangent of `x`, in radians
pub fn atan(x: f64) -> f64 {
    if x == 0.0 {
        return x;
    }
    if x > 0.0 {
        reduced_atan(x)
    } else {
        -reduced_atan(-x)
    }
}

fn sin_polynomial(z: f64) -> f64 {
    let zz = z * z;
    z + z * zz * (((((SIN[0] * zz + SIN[1]) * zz + SIN[2]) * zz + SIN[3]) * zz + SIN[4]) * zz + SIN[5])
}

fn cos_polynomial(z: f64) -> f64 {
    let zz = z * z;
    1.0 - 0.5 * zz
        + zz * zz
            * (((((COS[0] * zz + COS[1]) * zz + COS[2]) * zz + COS[3]) * zz + COS[4]) * zz + COS[5])
}

/// Arctangent of `x` in [0, 0.66]
fn atan_series(x: f64) -> f64 {
    let z = x * x;
    let z = z * ((((ATAN_P[0] * z + ATAN_P[1]) * z + ATAN_P[2]) * z + ATAN_P[3]) * z + ATAN_P[4])
        / (((((z + ATAN_Q[0]) * z + ATAN_Q[1]) * z + ATAN_Q[2]) * z + ATAN_Q[3]) * z + ATAN_Q[4]);
    x * z + x
}

/// Arctangent of a positive `x`, brought back into the range of the series
fn reduced_atan(x: f64) -> f64 {
    // π/2 = FRAC_PI_2 + MORE_BITS
    const MORE_BITS: f64 = 6.123_233_995_736_765_886_130e-17;
    // tan(3π/8)
    const TAN_3PI_8: f64 = 2.414_213_562_373_095_048_80;
    if x <= 0.66 {
        atan_series(x)
    } else if x > TAN_3PI_8 {
        FRAC_PI_2 - atan_series(1.0 / x) + MORE_BITS
    } else {
        FRAC_PI_4 + atan_series((x - 1.0) / (x + 1.0)) + 0.5 * MORE_BITS
    }
}

/// Reduce a positive, finite `x` to `z` in [-π/4, π/4] and the octant `j`
/// such that `x = j * π/4 + z`, with `j` even and modulo 8.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn reduce(x: f64) -> (u64, f64) {
    if x >= REDUCE_THRESHOLD {
        return payne_hanek(x);
    }
    let mut octant = (x * FOUR_OVER_PI) as u64;
    let mut y = octant as f64;
    // map zeros to origin
    if octant & 1 == 1 {
        octant += 1;
        y += 1.0;
    }
    (octant & 7, ((x - y * PI4A) - y * PI4B) - y * PI4C)
}

/// Payne-Hanek reduction of a large `x`, multiplying its mantissa by just
/// enough digits of 4/π.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn payne_hanek(x: f64) -> (u64, f64) {
    let bits = x.to_bits();
    let exponent = ((bits >> MANTISSA_BITS) & EXPONENT_MASK) as i32 - EXPONENT_BIAS - MANTISSA_BITS as i32;
    let mantissa = (bits & !(EXPONENT_MASK << MANTISSA_BITS)) | (1 << MANTISSA_BITS);

    // Pick the three words of 4/π such that the leading digit of the
    // product has the exponent -61. exponent >= -53 since x >= π/4.
    let offset = (exponent + 61) as u32;
    let digit = (offset / 64) as usize;
    let shift = offset % 64;
    let window = |i: usize| {
        shl(FOUR_OVER_PI_BITS[digit + i], shift)
            | shr(FOUR_OVER_PI_BITS[digit + i + 1], 64 - shift)
    };
    let (z0, z1, z2) = (window(0), window(1), window(2));

    let z2_hi = mul_hi(z2, mantissa);
    let z1_hi = mul_hi(z1, mantissa);
    let z1_lo = z1.wrapping_mul(mantissa);
    let z0_lo = z0.wrapping_mul(mantissa);
    let (lo, carry) = z1_lo.overflowing_add(z2_hi);
    let hi = z0_lo.wrapping_add(z1_hi).wrapping_add(u64::from(carry));

    // The top 3 bits are the octant, the rest is the fraction
    let mut octant = hi >> 61;
    let hi = hi << 3 | lo >> 61;
    let leading = hi.leading_zeros() + 1;
    let fraction_exponent = (EXPONENT_BIAS as u64).wrapping_sub(u64::from(leading));
    let hi = (shl(hi, leading) | shr(lo, 64u32.wrapping_sub(leading))) >> (64 - MANTISSA_BITS);
    let mut z = f64::from_bits(hi | fraction_exponent << MANTISSA_BITS);

    // map zeros to origin
    if octant & 1 == 1 {
        octant = (octant + 1) & 7;
        z -= 1.0;
    }
    (octant, z * FRAC_PI_4)
}

#[allow(clippy::cast_possible_truncation)]
fn mul_hi(a: u64, b: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) >> 64) as u64
}

/// Shifts that give 0 for a shift of the whole width
fn shl(value: u64, shift: u32) -> u64 {
    value.checked_shl(shift).unwrap_or(0)
}

fn shr(value: u64, shift: u32) -> u64 {
    value.checked_shr(shift).unwrap_or(0)
}
