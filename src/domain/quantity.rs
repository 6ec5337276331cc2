// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resource quantity grammar
//!
//! ```text
//! <quantity>        ::= <sign><number><suffix>
//! <number>          ::= <digits> | <digits>.<digits> | <digits>. | .<digits>
//! <suffix>          ::= <binarySI> | <decimalExponent> | <decimalSI>
//! <binarySI>        ::= Ki | Mi | Gi | Ti | Pi | Ei
//! <decimalSI>       ::= n | u | m | "" | k | M | G | T | P | E
//! <decimalExponent> ::= "e" <signedNumber> | "E" <signedNumber>
//! ```
//!
//! Values are kept as a whole number of nano-units so that `1Gi` and
//! `1024Mi` compare equal. Anything finer than a nano-unit is rounded up.

use crate::shared::error::EverestError;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const NANOS_PER_UNIT: i128 = 1_000_000_000;

fn quantity_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([+-]?)([0-9]+\.?[0-9]*|\.[0-9]+)(Ki|Mi|Gi|Ti|Pi|Ei|[eE][+-]?[0-9]+|[numkMGTPE])?$",
        )
        .expect("quantity grammar is a valid regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityFormat {
    /// Powers of two, e.g. `4Gi`.
    BinarySI,
    /// Powers of ten with SI suffix, e.g. `500m`, `2`, `1G`.
    DecimalSI,
    /// Scientific notation, e.g. `12e6`.
    DecimalExponent,
}

#[derive(Debug, Clone)]
pub struct Quantity {
    original: String,
    nanos: i128,
    format: QuantityFormat,
}

impl Quantity {
    pub fn parse(text: &str) -> Result<Self, QuantityError> {
        if text.is_empty() {
            return Err(QuantityError::Empty);
        }

        let caps = quantity_regex()
            .captures(text)
            .ok_or(QuantityError::Format)?;

        let negative = &caps[1] == "-";
        let number = &caps[2];
        let suffix = caps.get(3).map(|m| m.as_str()).unwrap_or("");

        let (int_part, frac_part) = match number.split_once('.') {
            Some((i, f)) => (i, f),
            None => (number, ""),
        };

        let (format, multiplier) = suffix_multiplier(suffix)?;

        let digits = format!("{}{}", int_part, frac_part);
        let mantissa: i128 = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| QuantityError::OutOfRange)?
        };
        let scale = 10i128
            .checked_pow(frac_part.len() as u32)
            .ok_or(QuantityError::OutOfRange)?;

        let nanos = match multiplier {
            Multiplier::Times(factor) => {
                let scaled = mantissa
                    .checked_mul(factor)
                    .ok_or(QuantityError::OutOfRange)?;
                ceil_div(scaled, scale)
            }
            Multiplier::Divide(divisor) => {
                let divisor = divisor
                    .checked_mul(scale)
                    .ok_or(QuantityError::OutOfRange)?;
                ceil_div(mantissa, divisor)
            }
        };

        Ok(Self {
            original: text.to_string(),
            nanos: if negative { -nanos } else { nanos },
            format,
        })
    }

    /// The value expressed in nano-units.
    pub fn as_nanos(&self) -> i128 {
        self.nanos
    }

    /// The value rounded up to whole units.
    pub fn value(&self) -> i128 {
        ceil_div(self.nanos, NANOS_PER_UNIT)
    }

    pub fn format(&self) -> QuantityFormat {
        self.format
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

enum Multiplier {
    Times(i128),
    Divide(i128),
}

fn suffix_multiplier(suffix: &str) -> Result<(QuantityFormat, Multiplier), QuantityError> {
    let binary = |shift: u32| (QuantityFormat::BinarySI, Multiplier::Times((1i128 << shift) * NANOS_PER_UNIT));
    let decimal = |exp: i32| -> Result<(QuantityFormat, Multiplier), QuantityError> {
        Ok((QuantityFormat::DecimalSI, pow10_nanos(exp)?))
    };

    match suffix {
        "Ki" => Ok(binary(10)),
        "Mi" => Ok(binary(20)),
        "Gi" => Ok(binary(30)),
        "Ti" => Ok(binary(40)),
        "Pi" => Ok(binary(50)),
        "Ei" => Ok(binary(60)),
        "n" => decimal(-9),
        "u" => decimal(-6),
        "m" => decimal(-3),
        "" => decimal(0),
        "k" => decimal(3),
        "M" => decimal(6),
        "G" => decimal(9),
        "T" => decimal(12),
        "P" => decimal(15),
        "E" => decimal(18),
        exponent => {
            let exp: i32 = exponent[1..]
                .parse()
                .map_err(|_| QuantityError::OutOfRange)?;
            Ok((QuantityFormat::DecimalExponent, pow10_nanos(exp)?))
        }
    }
}

fn pow10_nanos(exp: i32) -> Result<Multiplier, QuantityError> {
    let shifted = exp.checked_add(9).ok_or(QuantityError::OutOfRange)?;
    if shifted >= 0 {
        10i128
            .checked_pow(shifted as u32)
            .map(Multiplier::Times)
            .ok_or(QuantityError::OutOfRange)
    } else {
        10i128
            .checked_pow(shifted.unsigned_abs())
            .map(Multiplier::Divide)
            .ok_or(QuantityError::OutOfRange)
    }
}

fn ceil_div(value: i128, divisor: i128) -> i128 {
    let quotient = value / divisor;
    if value % divisor > 0 {
        quotient + 1
    } else {
        quotient
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.nanos == other.nanos
    }
}

impl Eq for Quantity {}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::parse(s)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Quantity::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("quantities must match the regular expression '^([+-]?[0-9.]+)([eEinumkKMGTP]*[-+]?[0-9]*)$'")]
    Format,

    #[error("cannot parse an empty quantity")]
    Empty,

    #[error("quantity is out of the supported range")]
    OutOfRange,
}

/// Parse `raw` as a quantity, attributing any failure to `field`.
pub fn parse_field(field: &str, raw: &str) -> Result<Quantity, EverestError> {
    Quantity::parse(raw).map_err(|e| EverestError::validation(field, raw, e.to_string()))
}
