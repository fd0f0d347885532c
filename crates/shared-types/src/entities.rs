//! # Core Protocol Entities
//!
//! Value types every program speaks in.
//!
//! ## Clusters
//!
//! - **Identity**: `Name` (accounts, programs and action names)
//! - **Value**: `Symbol`, `Asset`
//! - **Time**: `Timestamp`
//! - **Payments**: `TransferArgs`, the decoded shape of a token transfer

use crate::errors::{AssetError, NameError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Account, program or action identifier.
///
/// 1-12 characters drawn from `a-z`, `1-5` and `.`, never ending in `.`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Maximum name length in characters.
    pub const MAX_LEN: usize = 12;

    /// Parse and validate a name.
    pub fn new(value: impl Into<String>) -> Result<Self, NameError> {
        let value = value.into();
        if value.is_empty() {
            return Err(NameError::Empty);
        }
        if value.len() > Self::MAX_LEN {
            return Err(NameError::TooLong {
                len: value.len(),
                max: Self::MAX_LEN,
            });
        }
        if let Some((position, ch)) = value
            .chars()
            .enumerate()
            .find(|(_, c)| !matches!(c, 'a'..='z' | '1'..='5' | '.'))
        {
            return Err(NameError::InvalidChar { ch, position });
        }
        if value.ends_with('.') {
            return Err(NameError::TrailingDot);
        }
        Ok(Self(value))
    }

    /// Name from a literal known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a valid name.
    pub fn from_static(value: &'static str) -> Self {
        match Self::new(value) {
            Ok(name) => name,
            Err(err) => panic!("invalid static name {value:?}: {err}"),
        }
    }

    /// Borrow the textual form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Name {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Name {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

// =============================================================================
// CLUSTER B: VALUE
// =============================================================================

/// Token symbol: code plus decimal precision, written `4,TLOS`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol {
    precision: u8,
    code: String,
}

impl Symbol {
    /// Maximum number of fractional digits.
    pub const MAX_PRECISION: u8 = 18;
    /// Maximum code length.
    pub const MAX_CODE_LEN: usize = 7;

    /// Create a validated symbol.
    pub fn new(precision: u8, code: impl Into<String>) -> Result<Self, AssetError> {
        let code = code.into();
        if precision > Self::MAX_PRECISION {
            return Err(AssetError::PrecisionTooHigh(precision));
        }
        if code.is_empty()
            || code.len() > Self::MAX_CODE_LEN
            || !code.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(AssetError::InvalidSymbolCode(code));
        }
        Ok(Self { precision, code })
    }

    /// Symbol from literals known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if the precision or code is invalid.
    pub fn from_static(precision: u8, code: &'static str) -> Self {
        match Self::new(precision, code) {
            Ok(symbol) => symbol,
            Err(err) => panic!("invalid static symbol {precision},{code}: {err}"),
        }
    }

    /// Number of fractional digits.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Symbol code, e.g. `TLOS`.
    pub fn code(&self) -> &str {
        &self.code
    }

    fn scale(&self) -> i64 {
        10i64.pow(u32::from(self.precision))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

impl FromStr for Symbol {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s
            .split_once(',')
            .ok_or_else(|| AssetError::Malformed(s.to_string()))?;
        let precision = precision
            .trim()
            .parse::<u8>()
            .map_err(|_| AssetError::Malformed(s.to_string()))?;
        Self::new(precision, code.trim())
    }
}

impl TryFrom<String> for Symbol {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.to_string()
    }
}

/// An amount of a token in its smallest unit, e.g. `50000` of `4,TLOS`
/// is `5.0000 TLOS`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    /// Amount in the smallest unit.
    pub amount: i64,
    /// Token symbol.
    pub symbol: Symbol,
}

impl Asset {
    /// Create an asset.
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    /// True if the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        let precision = usize::from(self.symbol.precision);
        if precision == 0 {
            return write!(f, "{sign}{abs} {}", self.symbol.code);
        }
        let scale = self.symbol.scale().unsigned_abs();
        write!(
            f,
            "{sign}{}.{:0width$} {}",
            abs / scale,
            abs % scale,
            self.symbol.code,
            width = precision
        )
    }
}

impl FromStr for Asset {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || AssetError::Malformed(s.to_string());
        let (number, code) = s.trim().split_once(' ').ok_or_else(malformed)?;
        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() || !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(malformed());
        }
        let precision = u8::try_from(fraction.len()).map_err(|_| malformed())?;
        let symbol = Symbol::new(precision, code.trim())?;

        let overflow = || AssetError::Overflow(s.to_string());
        let whole: i64 = whole.parse().map_err(|_| overflow())?;
        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().map_err(|_| overflow())?
        };
        let amount = whole
            .checked_mul(symbol.scale())
            .and_then(|v| v.checked_add(fraction))
            .ok_or_else(overflow)?;

        Ok(Self::new(if negative { -amount } else { amount }, symbol))
    }
}

impl TryFrom<String> for Asset {
    type Error = AssetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}

// =============================================================================
// CLUSTER C: TIME
// =============================================================================

/// Trusted transaction time, microseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Construct from microseconds.
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    /// Construct from whole seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(1_000_000))
    }

    /// Microseconds since the epoch.
    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, zero if `earlier` lies in the future.
    pub fn elapsed_since(self, earlier: Timestamp) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }

    /// `self + delta`, saturating at the far future.
    pub fn saturating_add(self, delta: Duration) -> Self {
        let micros = u64::try_from(delta.as_micros()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(micros))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

// =============================================================================
// CLUSTER D: PAYMENTS
// =============================================================================

/// Arguments of the payment program's `transfer` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferArgs {
    /// Paying account.
    pub from: Name,
    /// Receiving account.
    pub to: Name,
    /// Amount moved.
    pub quantity: Asset,
    /// Free-form memo.
    pub memo: String,
}
