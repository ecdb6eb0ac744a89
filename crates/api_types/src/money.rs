use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Signed money amount represented as **integer cents**.
///
/// The backend formats monetary fields as informal currency strings
/// (`"$1,000.00"`, `"-$60,000.00"`); this type is the boundary between that
/// wire format and arithmetic. All math happens on integer cents to avoid
/// floating-point drift.
///
/// The value is signed:
/// - positive = income / credit
/// - negative = expense / debit
///
/// # Examples
///
/// ```rust
/// use api_types::Money;
///
/// let amount = Money::parse_lenient("$1,000.00");
/// assert_eq!(amount.cents(), 100_000);
/// assert_eq!(amount.to_string(), "$1,000.00");
/// assert!(Money::parse_lenient("-$60,000.00").is_negative());
/// ```
///
/// Unparsable input never fails the lenient path; it degrades to zero:
///
/// ```rust
/// use api_types::Money;
///
/// assert_eq!(Money::parse_lenient(""), Money::ZERO);
/// assert_eq!(Money::parse_lenient("n/a"), Money::ZERO);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("too many decimals: {0}")]
    TooManyDecimals(String),
    #[error("amount too large")]
    Overflow,
}

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the value in major units as a float (display/chart math only).
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value. Amounts are stored signed everywhere; callers that
    /// need a positive figure take it through here rather than negating ad
    /// hoc at call sites.
    #[must_use]
    pub const fn magnitude(self) -> Money {
        Money(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Total parse for server-formatted currency strings.
    ///
    /// Strips every character that is not a digit, a dot or a minus sign
    /// (so `$`, thousands separators and stray currency codes all vanish),
    /// then reads the remainder as a decimal amount. Empty or unparsable
    /// remainders yield [`Money::ZERO`]; this function never fails.
    ///
    /// The zero fallback mirrors the backend's informal formatting contract:
    /// one malformed row must not take down a whole list. Values typed by a
    /// user go through the stricter [`FromStr`] instead.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Money {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        parse_decimal(&cleaned).unwrap_or(Money::ZERO)
    }
}

/// Parses a cleaned decimal string (`-123.45`) into cents.
///
/// Fractions longer than two digits are rounded half away from zero.
fn parse_decimal(s: &str) -> Result<Money, MoneyError> {
    if s.is_empty() {
        return Err(MoneyError::Empty);
    }

    let invalid = || MoneyError::Invalid(s.to_string());

    let (negative, rest) = match s.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, s),
    };
    if rest.is_empty() || rest.contains('-') {
        return Err(invalid());
    }

    let mut parts = rest.split('.');
    let whole = parts.next().unwrap_or_default();
    let frac = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(invalid());
    }
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let major: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| MoneyError::Overflow)?
    };

    let mut cents: i64 = 0;
    let mut digits = frac.chars();
    for scale in [10, 1] {
        match digits.next() {
            Some(c) => cents += (c as i64 - '0' as i64) * scale,
            None => break,
        }
    }
    // Round half away from zero on the third fractional digit.
    if let Some(c) = digits.next() {
        if c as i64 - '0' as i64 >= 5 {
            cents += 1;
        }
    }

    let total = major
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents))
        .ok_or(MoneyError::Overflow)?;

    Ok(Money(if negative { -total } else { total }))
}

impl fmt::Display for Money {
    /// Formats in the backend's informal style: `-$1,234.56`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}${}.{cents:02}", group_thousands(major))
    }
}

fn group_thousands(mut n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let mut groups = Vec::new();
    while n >= 1000 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    let mut out = n.to_string();
    for group in groups.iter().rev() {
        out.push(',');
        out.push_str(group);
    }
    out
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Strict parse for locally-entered amounts.
    ///
    /// Accepts an optional sign, an optional `$`, thousands separators, and
    /// at most two decimals; anything else is an error. Server-formatted
    /// strings arriving over the wire go through
    /// [`Money::parse_lenient`] instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Empty);
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        if rest.is_empty() {
            return Err(MoneyError::Empty);
        }
        if !rest
            .chars()
            .all(|c| c.is_ascii_digit() || c == ',' || c == '.')
        {
            return Err(MoneyError::Invalid(s.to_string()));
        }

        let cleaned = rest.replace(',', "");
        if let Some((_, frac)) = cleaned.split_once('.') {
            if frac.len() > 2 {
                return Err(MoneyError::TooManyDecimals(s.to_string()));
            }
        }

        let parsed = parse_decimal(&cleaned).map_err(|err| match err {
            MoneyError::Empty => MoneyError::Empty,
            MoneyError::Overflow => MoneyError::Overflow,
            _ => MoneyError::Invalid(s.to_string()),
        })?;
        Ok(if negative { -parsed } else { parsed })
    }
}

impl Serialize for Money {
    /// Serializes to the backend's currency-string form.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    /// Deserializes leniently: currency strings go through
    /// [`Money::parse_lenient`]; bare numbers are taken as major units.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Float(f64),
            Int(i64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(raw) => Money::parse_lenient(&raw),
            Repr::Float(major) => Money((major * 100.0).round() as i64),
            Repr::Int(major) => Money(major.saturating_mul(100)),
        })
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}
