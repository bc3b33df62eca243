//! 256-bit word arithmetic with signed overlays.
//!
//! The unsigned domain is `primitive_types::U256`; the signed operations
//! round-trip through `i256::I256` as two's-complement reinterpretations of
//! the same 32 bytes. Every result is already reduced modulo 2^256.

use i256::I256;
use primitive_types::U512;

use crate::common::Word;

pub fn add(a: Word, b: Word) -> Word {
    a.overflowing_add(b).0
}

pub fn sub(a: Word, b: Word) -> Word {
    a.overflowing_sub(b).0
}

pub fn mul(a: Word, b: Word) -> Word {
    a.overflowing_mul(b).0
}

/// Division by zero yields zero, not a fault.
pub fn div(a: Word, b: Word) -> Word {
    if b.is_zero() {
        Word::zero()
    } else {
        a / b
    }
}

pub fn rem(a: Word, b: Word) -> Word {
    if b.is_zero() {
        Word::zero()
    } else {
        a % b
    }
}

pub fn sdiv(a: Word, b: Word) -> Word {
    let a_signed = I256::from_be_bytes(a.to_big_endian());
    let b_signed = I256::from_be_bytes(b.to_big_endian());
    let res = if b.is_zero() {
        I256::from(0)
    } else if a_signed == I256::MIN && b_signed == I256::from(-1) {
        // The one overflowing case: -2^255 / -1 wraps back to -2^255.
        I256::MIN
    } else {
        a_signed / b_signed
    };
    Word::from_big_endian(&res.to_be_bytes())
}

pub fn smod(a: Word, b: Word) -> Word {
    let a_signed = I256::from_be_bytes(a.to_big_endian());
    let b_signed = I256::from_be_bytes(b.to_big_endian());
    let res = if b.is_zero() {
        I256::from(0)
    } else if a_signed == I256::MIN && b_signed == I256::from(-1) {
        I256::from(0)
    } else {
        a_signed % b_signed
    };
    Word::from_big_endian(&res.to_be_bytes())
}

/// (a + b) mod n over the unbounded integers; n = 0 yields zero.
pub fn addmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    let wide = U512::from(a) + U512::from(b);
    low_half(wide % U512::from(n))
}

/// (a * b) mod n over the unbounded integers; n = 0 yields zero.
pub fn mulmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    low_half(a.full_mul(b) % U512::from(n))
}

fn low_half(wide: U512) -> Word {
    Word::from_big_endian(&wide.to_big_endian()[32..])
}

pub fn exp(base: Word, exponent: Word) -> Word {
    base.overflowing_pow(exponent).0
}

/// Byte length of the exponent, for the 50-per-byte dynamic EXP charge.
pub fn exp_byte_len(exponent: Word) -> u64 {
    exponent.bits().div_ceil(8) as u64
}

/// For b < 31, treat x as a (b+1)-byte two's-complement value and extend the
/// sign bit through the full word.
pub fn signextend(b: Word, x: Word) -> Word {
    if b >= Word::from(31) {
        return x;
    }
    let bytes = b.as_usize() + 1;
    let mask = (Word::one() << (bytes * 8)) - Word::one();
    if x.bit(bytes * 8 - 1) {
        x | !mask
    } else {
        x & mask
    }
}

/// The i-th big-endian byte of x, zero when i >= 32.
pub fn byte(i: Word, x: Word) -> Word {
    if i >= Word::from(32) {
        Word::zero()
    } else {
        Word::from(x.byte(31 - i.as_usize()))
    }
}

pub fn slt(a: Word, b: Word) -> Word {
    let a_signed = I256::from_be_bytes(a.to_big_endian());
    let b_signed = I256::from_be_bytes(b.to_big_endian());
    bool_word(a_signed < b_signed)
}

pub fn sgt(a: Word, b: Word) -> Word {
    let a_signed = I256::from_be_bytes(a.to_big_endian());
    let b_signed = I256::from_be_bytes(b.to_big_endian());
    bool_word(a_signed > b_signed)
}

pub fn shl(shift: Word, value: Word) -> Word {
    if shift >= Word::from(256) {
        Word::zero()
    } else {
        value << shift.as_usize()
    }
}

pub fn shr(shift: Word, value: Word) -> Word {
    if shift >= Word::from(256) {
        Word::zero()
    } else {
        value >> shift.as_usize()
    }
}

/// Arithmetic right shift: the sign bit fills in from the left.
pub fn sar(shift: Word, value: Word) -> Word {
    let negative = value.bit(255);
    if shift >= Word::from(256) {
        return if negative {
            Word::max_value()
        } else {
            Word::zero()
        };
    }
    let shift = shift.as_usize();
    if shift == 0 {
        return value;
    }
    let shifted = value >> shift;
    if negative {
        shifted | (Word::max_value() << (256 - shift))
    } else {
        shifted
    }
}

/// Comparison results are exactly 0 or 1.
pub fn bool_word(flag: bool) -> Word {
    if flag {
        Word::one()
    } else {
        Word::zero()
    }
}
