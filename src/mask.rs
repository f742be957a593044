//! Partial redaction of secret values for display.

/// How much of a secret is revealed when it is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskRule {
    /// Number of leading characters shown
    pub prefix_len: usize,
    /// Number of trailing characters shown once the value is long enough
    pub suffix_len: usize,
    /// Minimum length (in characters) before the suffix is revealed
    pub min_len_for_suffix: usize,
}

impl MaskRule {
    /// Show 10 leading characters, plus 4 trailing ones for values over 14 characters.
    pub const DEFAULT: MaskRule = MaskRule {
        prefix_len: 10,
        suffix_len: 4,
        min_len_for_suffix: 15,
    };

    pub fn apply(&self, value: &str) -> String {
        mask(
            value,
            self.prefix_len,
            self.suffix_len,
            self.min_len_for_suffix,
        )
    }
}

impl Default for MaskRule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Render `value` as its first `prefix_len` characters, an ellipsis, and the
/// last `suffix_len` characters when the value has at least
/// `min_len_for_suffix` characters.
///
/// Lengths are counted in `char`s, so multi-byte values are never split
/// inside a code point.
///
/// ```
/// use credcheck::mask;
///
/// assert_eq!(mask("sk-or-v1-abcdefghijklmno1234", 10, 4, 15), "sk-or-v1-a...1234");
/// assert_eq!(mask("short-key12", 10, 4, 15), "short-key1...");
/// ```
pub fn mask(
    value: &str,
    prefix_len: usize,
    suffix_len: usize,
    min_len_for_suffix: usize,
) -> String {
    let len = value.chars().count();

    let mut masked: String = value.chars().take(prefix_len).collect();
    masked.push_str("...");

    if len >= min_len_for_suffix {
        masked.extend(value.chars().skip(len.saturating_sub(suffix_len)));
    }

    masked
}

/// Mask a secret with [`MaskRule::DEFAULT`].
pub fn mask_secret(value: &str) -> String {
    MaskRule::DEFAULT.apply(value)
}
